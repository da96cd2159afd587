//! # folderkit-core
//!
//! Core crate for Folderkit. Contains the backend trait, configuration
//! schemas, typed identifiers and the unified error system.
//!
//! This crate has **no** internal dependencies on other Folderkit crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
