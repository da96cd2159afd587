//! The provisioning workflow: duplicate check, template copy, item
//! resolution and metadata tagging, run strictly in sequence.

pub mod error;
pub mod request;
pub mod service;
pub mod state;

pub use error::ProvisioningError;
pub use request::ProvisioningRequest;
pub use service::{Provisioned, ProvisioningResult, ProvisioningWorkflow};
pub use state::{WorkflowState, WorkflowStep};
