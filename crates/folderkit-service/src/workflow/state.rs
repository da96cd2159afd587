//! Workflow states and steps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One backend call in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    /// Does the destination already exist?
    CheckDuplicate,
    /// Copy the template to the destination.
    Copy,
    /// Read back the new folder's item id.
    ResolveIdentifier,
    /// Set the marker field on the new item.
    PatchMetadata,
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckDuplicate => write!(f, "duplicate check"),
            Self::Copy => write!(f, "copy"),
            Self::ResolveIdentifier => write!(f, "identifier resolution"),
            Self::PatchMetadata => write!(f, "metadata update"),
        }
    }
}

/// States a single provisioning run moves through.
///
/// ```text
/// Idle → CheckingDuplicate → {DuplicateFound | DuplicateCheckFailed | Copying}
/// Copying → {CopyFailed | Copied}
/// Copied → ResolvingId → {IdFailed | IdResolved}        (projects only)
/// IdResolved → PatchingMetadata → {PatchFailed | Done}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Idle,
    CheckingDuplicate,
    DuplicateFound,
    DuplicateCheckFailed,
    Copying,
    CopyFailed,
    Copied,
    ResolvingId,
    IdFailed,
    IdResolved,
    PatchingMetadata,
    PatchFailed,
    Done,
}

impl WorkflowState {
    /// Whether `next` may follow `self`.
    pub fn can_transition_to(self, next: WorkflowState) -> bool {
        use WorkflowState::*;
        matches!(
            (self, next),
            (Idle, CheckingDuplicate)
                | (CheckingDuplicate, DuplicateFound | DuplicateCheckFailed | Copying)
                | (Copying, CopyFailed | Copied)
                | (Copied, ResolvingId)
                | (ResolvingId, IdFailed | IdResolved)
                | (IdResolved, PatchingMetadata)
                | (PatchingMetadata, PatchFailed | Done)
        )
    }

    /// Whether no further transition can happen from here.
    ///
    /// `Copied` is terminal for client folders only, so it is not listed.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::DuplicateFound
                | Self::DuplicateCheckFailed
                | Self::CopyFailed
                | Self::IdFailed
                | Self::PatchFailed
                | Self::Done
        )
    }
}
