//! # folderkit-backend
//!
//! Backend implementations for the provisioning workflow: a client for a
//! SharePoint-style REST API and an in-memory folder store.

pub mod factory;
pub mod providers;

pub use factory::build_backend;
