//! Backend provider implementations.

pub mod memory;
#[cfg(feature = "rest")]
pub mod rest;

pub use memory::MemoryBackend;
#[cfg(feature = "rest")]
pub use rest::RestBackend;
