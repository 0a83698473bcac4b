//! Backend records and write payloads.
//!
//! Field names follow the backend's JSON (snake_case, including its
//! `year_lable` spelling) through serde renames.

pub mod ids;
pub mod payloads;
pub mod profile;
pub mod records;
pub mod reference;

pub use ids::{EntityId, UserId};
pub use payloads::*;
pub use profile::{Credentials, LoginData, Role, SignUp, UserProfile};
pub use records::*;
pub use reference::*;
