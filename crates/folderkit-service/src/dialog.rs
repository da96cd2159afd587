//! State of the name dialog, kept as a plain value.
//!
//! Input and submit produce a new [`DialogState`]; [`render`] turns a
//! state into what the host should draw. Nothing here touches a UI.

use serde::{Deserialize, Serialize};

use folderkit_core::types::ResourceKind;

use crate::name::{NAME_CHARACTER_LIMIT, ResourceName};
use crate::workflow::{ProvisioningResult, WorkflowStep};

/// The dialog's form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogState {
    kind: ResourceKind,
    name: ResourceName,
    is_valid: bool,
    is_loading: bool,
    limit: usize,
}

impl DialogState {
    /// A freshly opened, empty dialog.
    pub fn open(kind: ResourceKind) -> Self {
        Self::with_limit(kind, NAME_CHARACTER_LIMIT)
    }

    /// A freshly opened dialog with a custom name length limit.
    pub fn with_limit(kind: ResourceKind, limit: usize) -> Self {
        Self {
            kind,
            name: ResourceName::default(),
            is_valid: false,
            is_loading: false,
            limit,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The state after the text field changed to `raw`.
    pub fn on_input(&self, raw: &str) -> Self {
        Self {
            kind: self.kind,
            name: ResourceName::with_limit(raw, self.limit),
            is_valid: crate::name::is_submittable(raw),
            is_loading: false,
            limit: self.limit,
        }
    }

    /// Whether the create button is enabled.
    pub fn can_submit(&self) -> bool {
        self.is_valid && !self.is_loading
    }

    /// The loading state entered on submit, or `None` if the create
    /// button is disabled.
    pub fn on_submit(&self) -> Option<Self> {
        self.can_submit().then(|| Self {
            is_loading: true,
            ..self.clone()
        })
    }
}

/// What the host should draw for a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogView {
    pub title: &'static str,
    /// Text field label, or the progress caption while loading.
    pub label: &'static str,
    /// Current text field value (sanitized).
    pub value: String,
    pub show_spinner: bool,
    pub create_enabled: bool,
}

/// Render a dialog state.
pub fn render(state: &DialogState) -> DialogView {
    let (title, prompt, progress) = match state.kind {
        ResourceKind::Project => (
            "New Project",
            "What is your project's name?",
            "Creating project...",
        ),
        ResourceKind::Client => (
            "New Client",
            "What is your client's name?",
            "Creating client...",
        ),
    };

    DialogView {
        title,
        label: if state.is_loading { progress } else { prompt },
        value: state.name.sanitized().to_string(),
        show_spinner: state.is_loading,
        create_enabled: state.can_submit(),
    }
}

/// What the host does once the workflow finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DialogOutcome {
    /// Close the dialog and open the new folder.
    Navigate { url: String },
    /// Show a notice naming the existing folder, then close.
    AlertAndClose { message: String },
    /// Show a generic failure naming the step.
    Failed { message: String, step: WorkflowStep },
}

impl DialogOutcome {
    pub fn from_result(result: &ProvisioningResult) -> Self {
        match result {
            Ok(provisioned) => Self::Navigate {
                url: provisioned.destination_url.clone(),
            },
            Err(err @ crate::workflow::ProvisioningError::DuplicateName { .. }) => {
                Self::AlertAndClose {
                    message: err.user_message(),
                }
            }
            Err(err) => Self::Failed {
                message: err.user_message(),
                step: err.step(),
            },
        }
    }
}
