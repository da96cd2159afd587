//! Terminal failures of a provisioning run.

use thiserror::Error;

use folderkit_core::error::AppError;
use folderkit_core::types::ItemId;

use super::state::{WorkflowState, WorkflowStep};

/// Why a provisioning run stopped.
///
/// Every variant is terminal for its run; nothing is retried or rolled
/// back.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// A folder with the requested name already exists.
    #[error("A folder with the name '{name}' already exists")]
    DuplicateName { name: String },

    /// The existence check itself failed, so it is unknown whether the
    /// name is taken.
    #[error("duplicate check for '{path}' failed")]
    DuplicateCheckFailed {
        path: String,
        #[source]
        source: AppError,
    },

    /// The template could not be copied.
    #[error("copying '{template}' to '{destination}' failed")]
    CopyFailed {
        template: String,
        destination: String,
        #[source]
        source: AppError,
    },

    /// The copy exists but its item id (or version) could not be read.
    #[error("could not resolve the item behind '{path}'")]
    IdentifierResolutionFailed {
        path: String,
        #[source]
        source: Option<AppError>,
    },

    /// The marker field could not be written.
    #[error("metadata update of item {id} failed")]
    PatchFailed {
        id: ItemId,
        #[source]
        source: AppError,
    },
}

impl ProvisioningError {
    /// The step that failed.
    pub fn step(&self) -> WorkflowStep {
        match self {
            Self::DuplicateName { .. } | Self::DuplicateCheckFailed { .. } => {
                WorkflowStep::CheckDuplicate
            }
            Self::CopyFailed { .. } => WorkflowStep::Copy,
            Self::IdentifierResolutionFailed { .. } => WorkflowStep::ResolveIdentifier,
            Self::PatchFailed { .. } => WorkflowStep::PatchMetadata,
        }
    }

    /// The state the run ended in.
    pub fn terminal_state(&self) -> WorkflowState {
        match self {
            Self::DuplicateName { .. } => WorkflowState::DuplicateFound,
            Self::DuplicateCheckFailed { .. } => WorkflowState::DuplicateCheckFailed,
            Self::CopyFailed { .. } => WorkflowState::CopyFailed,
            Self::IdentifierResolutionFailed { .. } => WorkflowState::IdFailed,
            Self::PatchFailed { .. } => WorkflowState::PatchFailed,
        }
    }

    /// Whether the run left a copied folder without its marker field.
    pub fn leaves_untagged_copy(&self) -> bool {
        matches!(
            self,
            Self::IdentifierResolutionFailed { .. } | Self::PatchFailed { .. }
        )
    }

    /// Whether the failure was a version mismatch on the metadata update.
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::PatchFailed { source, .. } if source.is_conflict())
    }

    /// Text to show the user.
    ///
    /// Names the conflicting folder for duplicates; otherwise a generic
    /// message with the failed step and no backend detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::DuplicateName { .. } => self.to_string(),
            other => format!(
                "The folder could not be created: the {} step failed.",
                other.step()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_the_folder() {
        let err = ProvisioningError::DuplicateName {
            name: "Acme Launch".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "A folder with the name 'Acme Launch' already exists"
        );
        assert_eq!(err.step(), WorkflowStep::CheckDuplicate);
        assert!(!err.leaves_untagged_copy());
    }

    #[test]
    fn test_generic_message_hides_backend_detail() {
        let err = ProvisioningError::CopyFailed {
            template: "/Docs/Template".to_string(),
            destination: "/Docs/Acme".to_string(),
            source: AppError::backend("HTTP 500: <stack trace>"),
        };
        let message = err.user_message();
        assert!(message.contains("copy"));
        assert!(!message.contains("stack trace"));
    }

    #[test]
    fn test_untagged_copy_states() {
        let resolve = ProvisioningError::IdentifierResolutionFailed {
            path: "/Docs/Acme".to_string(),
            source: None,
        };
        let patch = ProvisioningError::PatchFailed {
            id: ItemId(42),
            source: AppError::conflict("version changed"),
        };
        assert!(resolve.leaves_untagged_copy());
        assert!(patch.leaves_untagged_copy());
        assert!(patch.is_version_conflict());
        assert_eq!(patch.terminal_state(), WorkflowState::PatchFailed);
        assert_eq!(resolve.terminal_state(), WorkflowState::IdFailed);
    }
}
