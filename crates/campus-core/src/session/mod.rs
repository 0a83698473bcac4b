//! Session lifecycle.
//!
//! ```text
//! SessionManager
//!   ├── SessionHandle     token + user + loading flag, shared
//!   ├── public client     no credentials attached
//!   └── secure client     BearerAuth ─▶ network ─▶ DeauthorizePolicy
//! ```

mod manager;
mod policy;
mod route;
mod state;

pub use manager::{SessionManager, SignInOutcome};
pub use policy::DeauthorizePolicy;
pub use route::{ChannelNavigator, Navigator, Route};
pub use state::{Session, SessionHandle, SessionStatus};
