//! Core traits defined in `folderkit-core` and implemented by other crates.

pub mod backend;

pub use backend::{MetadataFields, ProvisioningBackend};
