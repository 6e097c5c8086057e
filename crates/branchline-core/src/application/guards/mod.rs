//! Consistency guards consulted by the services before anything is
//! persisted.

pub mod hierarchy;
pub mod identity;
pub mod uniqueness;

pub use hierarchy::HierarchyChecker;
pub use identity::{ensure_same_identity, ensure_unassigned};
pub use uniqueness::{NameCheck, UniquenessGuard};
