//! Storage adapters for Branchline.
//!
//! This crate implements the repository ports defined in
//! `branchline-core::application::ports`. It owns all storage I/O.

pub mod json_file;
pub mod memory;

// Re-export commonly used adapters
pub use json_file::JsonFileStore;
pub use memory::{
    InMemoryFranchises, InMemoryOffices, InMemoryProducts, InMemoryStore, NextIds, Snapshot,
};
