//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `branchline-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FranchiseRepository`, `OfficeRepository`, `ProductRepository`
//!   - `NameLookup`: the name queries all three share
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The services in `crate::application::services`)

pub mod output;

pub use output::{FranchiseRepository, NameLookup, OfficeRepository, ProductRepository};
