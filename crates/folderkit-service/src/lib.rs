//! # folderkit-service
//!
//! Use-case layer for Folderkit: the name sanitizer, the provisioning
//! workflow, request context resolution, and the presentation-free state
//! of the command bar and the name dialog.
//!
//! The workflow takes its backend by injection (`Arc<dyn
//! ProvisioningBackend>`); nothing here reads global state.

pub mod command;
pub mod context;
pub mod dialog;
pub mod name;
pub mod workflow;

pub use command::{Command, CommandSet};
pub use context::RequestContext;
pub use dialog::{DialogOutcome, DialogState, DialogView, render};
pub use name::{ResourceName, is_submittable, sanitize};
pub use workflow::{
    Provisioned, ProvisioningError, ProvisioningRequest, ProvisioningResult, ProvisioningWorkflow,
    WorkflowState, WorkflowStep,
};
