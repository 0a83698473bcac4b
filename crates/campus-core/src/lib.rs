//! Client core for the Campus school-management backend.
//!
//! - [`session`]: token lifecycle, sign-in, bootstrap and the 401/403 rule
//! - [`selector`]: cascading dropdown chains
//! - [`api`]: typed endpoints and the per-screen reference cache
//! - [`models`]: backend records and write payloads

pub mod api;
pub mod error;
pub mod models;
pub mod selector;
pub mod session;
pub mod submit;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ReferenceCache, SchoolApi};
pub use error::{CoreError, Result};
pub use selector::{Choice, HierarchicalSelector, LevelSpec};
pub use session::{
    ChannelNavigator, Navigator, Route, Session, SessionManager, SessionStatus, SignInOutcome,
};
pub use submit::{Outcome, SubmitGuard};
pub use validate::{Validate, ValidationErrors};
