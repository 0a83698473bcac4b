//! Cascading selection across dependent dropdowns.

mod chain;
mod level;
pub mod presets;
mod scope;

pub use chain::{FetchTicket, HierarchicalSelector};
pub use level::{Choice, LevelSpec, ParentLink, Source};
pub use scope::{RoutineScope, ScopedLevels};
