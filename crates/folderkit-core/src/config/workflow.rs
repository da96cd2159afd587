//! Provisioning workflow configuration.

use serde::{Deserialize, Serialize};

/// Tuning for the provisioning workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Upper bound for each backend call, in seconds.
    #[serde(default = "default_step_timeout")]
    pub step_timeout_seconds: u64,
    /// Refuse to patch metadata when the backend reported no item version.
    #[serde(default = "default_true")]
    pub require_version_guard: bool,
    /// Carry editor/modified fields from the template onto the copy.
    #[serde(default = "default_true")]
    pub preserve_provenance: bool,
    /// Maximum number of characters kept from a typed name.
    #[serde(default = "default_name_limit")]
    pub name_character_limit: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            step_timeout_seconds: default_step_timeout(),
            require_version_guard: true,
            preserve_provenance: true,
            name_character_limit: default_name_limit(),
        }
    }
}

fn default_step_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_name_limit() -> usize {
    255
}
