//! # parsekit-core
//!
//! Core crate for parsekit. Contains the unified error system, source
//! locations used by parse diagnostics, configuration schemas, and tracing
//! initialisation.
//!
//! This crate has **no** internal dependencies on other parsekit crates.

pub mod config;
pub mod error;
pub mod location;
pub mod result;
pub mod telemetry;

pub use error::{AppError, ErrorKind};
pub use location::{Position, SourceLocation};
pub use result::AppResult;
