//! Command-line front end for `oxide-dialect-core`.
//!
//! Loads SQL text, JSON schema documents and JSON record values, and hands
//! them to a [`Dialect`](oxide_dialect_core::Dialect). The `oxide-dialect`
//! binary is a thin layer over these functions.

pub mod commands;
pub mod error;
pub mod values;

pub use error::{CliError, Result};
