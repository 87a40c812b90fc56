//! Shared types and models for the marketplace client
//!
//! This crate contains the domain models and pure validation rules used by the
//! native client, the UI (via WASM), and the tests of both.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
