//! Shared types and models for the Green Flags climate dashboard
//!
//! This crate contains the advisory rule evaluator and the data shapes shared
//! between the backend, the browser front end (via WASM), and the tests.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
