//! Domain building blocks shared by the catalog crates.

pub mod error;
pub mod types;
pub mod upload;
