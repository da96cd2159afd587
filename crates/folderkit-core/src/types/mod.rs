//! Shared domain types.

pub mod id;
pub mod kind;

pub use id::{ItemHandle, ItemId};
pub use kind::ResourceKind;
