//! Runs a provisioning request against a backend.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use folderkit_core::config::AppConfig;
use folderkit_core::error::AppError;
use folderkit_core::result::AppResult;
use folderkit_core::traits::backend::{MetadataFields, ProvisioningBackend};
use folderkit_core::types::{ItemId, ResourceKind};

use super::error::ProvisioningError;
use super::request::ProvisioningRequest;
use super::state::{WorkflowState, WorkflowStep};

/// A successfully provisioned folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provisioned {
    /// Correlation id of the request.
    pub request_id: Uuid,
    /// Kind of folder created.
    pub kind: ResourceKind,
    /// Server-relative path of the new folder.
    pub destination_path: String,
    /// Absolute URL to navigate to.
    pub destination_url: String,
    /// Item id, for tagged (project) folders.
    pub identifier: Option<ItemId>,
}

impl Provisioned {
    /// The state the run ended in.
    pub fn terminal_state(&self) -> WorkflowState {
        if self.kind.requires_tagging() {
            WorkflowState::Done
        } else {
            WorkflowState::Copied
        }
    }
}

/// Outcome of one provisioning run.
pub type ProvisioningResult = Result<Provisioned, ProvisioningError>;

/// Orchestrates duplicate check, copy, resolution and tagging.
#[derive(Debug, Clone)]
pub struct ProvisioningWorkflow {
    /// Backend the steps run against.
    backend: Arc<dyn ProvisioningBackend>,
    /// Prefix turning server-relative paths into URLs.
    tenant_root: String,
    /// Boolean field set on project folders.
    marker_field: String,
    /// Budget for each backend call.
    step_timeout: Duration,
    /// Refuse to patch without a version to guard on.
    require_version_guard: bool,
    /// Keep the template's editor/modified fields on the copy.
    preserve_provenance: bool,
}

impl ProvisioningWorkflow {
    /// Creates a workflow with default tuning.
    pub fn new(backend: Arc<dyn ProvisioningBackend>, tenant_root: &str) -> Self {
        Self {
            backend,
            tenant_root: tenant_root.trim_end_matches('/').to_string(),
            marker_field: "IsProjectFolder".to_string(),
            step_timeout: Duration::from_secs(30),
            require_version_guard: true,
            preserve_provenance: true,
        }
    }

    /// Creates a workflow tuned from configuration.
    pub fn from_config(backend: Arc<dyn ProvisioningBackend>, config: &AppConfig) -> Self {
        Self::new(backend, &config.site.tenant_root())
            .with_marker_field(&config.metadata.marker_field)
            .with_step_timeout(Duration::from_secs(config.workflow.step_timeout_seconds))
            .with_version_guard(config.workflow.require_version_guard)
            .with_preserve_provenance(config.workflow.preserve_provenance)
    }

    pub fn with_marker_field(mut self, field: &str) -> Self {
        self.marker_field = field.to_string();
        self
    }

    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    pub fn with_version_guard(mut self, required: bool) -> Self {
        self.require_version_guard = required;
        self
    }

    pub fn with_preserve_provenance(mut self, preserve: bool) -> Self {
        self.preserve_provenance = preserve;
        self
    }

    /// Provision one folder.
    ///
    /// Each step starts only after the previous one has succeeded; the
    /// first failure ends the run. A copy that succeeded is never undone.
    pub async fn provision(&self, request: &ProvisioningRequest) -> ProvisioningResult {
        let destination = request.destination_path();
        let mut run = Run::new(request.id());

        info!(
            request_id = %request.id(),
            kind = %request.kind(),
            destination = %destination,
            backend = self.backend.backend_type(),
            "Provisioning folder"
        );

        let result = self.execute(request, &destination, &mut run).await;

        match &result {
            Ok(provisioned) => info!(
                request_id = %request.id(),
                url = %provisioned.destination_url,
                item_id = ?provisioned.identifier,
                "Folder provisioned"
            ),
            Err(err) => {
                warn!(
                    request_id = %request.id(),
                    step = %err.step(),
                    error = %err,
                    "Provisioning failed"
                );
                if err.leaves_untagged_copy() {
                    warn!(
                        request_id = %request.id(),
                        destination = %destination,
                        field = %self.marker_field,
                        "Folder was copied but not tagged; set the field by hand"
                    );
                }
            }
        }

        result
    }

    async fn execute(
        &self,
        request: &ProvisioningRequest,
        destination: &str,
        run: &mut Run,
    ) -> ProvisioningResult {
        run.advance(WorkflowState::CheckingDuplicate);
        let exists = self
            .call(WorkflowStep::CheckDuplicate, self.backend.exists(destination))
            .await
            .map_err(|source| {
                run.advance(WorkflowState::DuplicateCheckFailed);
                ProvisioningError::DuplicateCheckFailed {
                    path: destination.to_string(),
                    source,
                }
            })?;

        if exists {
            run.advance(WorkflowState::DuplicateFound);
            return Err(ProvisioningError::DuplicateName {
                name: request.name().to_string(),
            });
        }

        run.advance(WorkflowState::Copying);
        self.call(
            WorkflowStep::Copy,
            self.backend
                .copy(request.template_path(), destination, self.preserve_provenance),
        )
        .await
        .map_err(|source| {
            run.advance(WorkflowState::CopyFailed);
            ProvisioningError::CopyFailed {
                template: request.template_path().to_string(),
                destination: destination.to_string(),
                source,
            }
        })?;
        run.advance(WorkflowState::Copied);

        let identifier = if request.kind().requires_tagging() {
            Some(self.tag(destination, run).await?)
        } else {
            None
        };

        Ok(Provisioned {
            request_id: request.id(),
            kind: request.kind(),
            destination_path: destination.to_string(),
            destination_url: format!("{}{}", self.tenant_root, destination),
            identifier,
        })
    }

    /// Resolve the new folder's item and set the marker field on it.
    async fn tag(&self, destination: &str, run: &mut Run) -> Result<ItemId, ProvisioningError> {
        run.advance(WorkflowState::ResolvingId);
        let resolved = self
            .call(
                WorkflowStep::ResolveIdentifier,
                self.backend.resolve_identifier(destination),
            )
            .await;

        let handle = match resolved {
            Ok(Some(handle)) if handle.version.is_some() || !self.require_version_guard => handle,
            Ok(Some(_)) => {
                run.advance(WorkflowState::IdFailed);
                return Err(ProvisioningError::IdentifierResolutionFailed {
                    path: destination.to_string(),
                    source: Some(AppError::conflict(
                        "backend returned no item version to guard the update",
                    )),
                });
            }
            Ok(None) => {
                run.advance(WorkflowState::IdFailed);
                return Err(ProvisioningError::IdentifierResolutionFailed {
                    path: destination.to_string(),
                    source: None,
                });
            }
            Err(source) => {
                run.advance(WorkflowState::IdFailed);
                return Err(ProvisioningError::IdentifierResolutionFailed {
                    path: destination.to_string(),
                    source: Some(source),
                });
            }
        };
        run.advance(WorkflowState::IdResolved);

        let mut fields = MetadataFields::new();
        fields.insert(self.marker_field.clone(), Value::Bool(true));

        run.advance(WorkflowState::PatchingMetadata);
        self.call(
            WorkflowStep::PatchMetadata,
            self.backend
                .patch_metadata(handle.id, &fields, handle.version.as_deref()),
        )
        .await
        .map_err(|source| {
            run.advance(WorkflowState::PatchFailed);
            ProvisioningError::PatchFailed {
                id: handle.id,
                source,
            }
        })?;
        run.advance(WorkflowState::Done);

        Ok(handle.id)
    }

    /// Await a backend call within the step timeout.
    async fn call<T>(
        &self,
        step: WorkflowStep,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.step_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::timeout(format!(
                "{step} did not finish within {}s",
                self.step_timeout.as_secs_f64()
            ))),
        }
    }
}

/// Tracks the current state of one run.
struct Run {
    request_id: Uuid,
    state: WorkflowState,
}

impl Run {
    fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            state: WorkflowState::Idle,
        }
    }

    fn advance(&mut self, next: WorkflowState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {:?} -> {next:?}",
            self.state
        );
        debug!(
            request_id = %self.request_id,
            from = ?self.state,
            to = ?next,
            "Workflow transition"
        );
        self.state = next;
    }
}
