//! An immutable provisioning request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folderkit_core::error::AppError;
use folderkit_core::types::ResourceKind;

use crate::context::RequestContext;
use crate::name::ResourceName;

/// One submitted request to create a folder from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningRequest {
    id: Uuid,
    kind: ResourceKind,
    template_path: String,
    parent_path: String,
    name: String,
}

impl ProvisioningRequest {
    /// Build a request from explicit paths.
    ///
    /// The name is taken in its submitted form (sanitized and trimmed) and
    /// must not be empty.
    pub fn new(
        kind: ResourceKind,
        template_path: impl Into<String>,
        parent_path: impl Into<String>,
        name: &ResourceName,
    ) -> Result<Self, AppError> {
        let submitted = name.submitted();
        if submitted.is_empty() {
            return Err(AppError::validation(format!(
                "'{}' is empty once reserved characters and whitespace are removed",
                name.raw()
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            template_path: template_path.into(),
            parent_path: parent_path.into().trim_end_matches('/').to_string(),
            name: submitted.to_string(),
        })
    }

    /// Build a request using the context's parent and template paths.
    pub fn from_context(
        ctx: &RequestContext,
        kind: ResourceKind,
        name: &ResourceName,
    ) -> Result<Self, AppError> {
        Self::new(kind, ctx.template_path(kind), ctx.parent_path(kind), name)
    }

    /// Correlation id for logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn template_path(&self) -> &str {
        &self.template_path
    }

    pub fn parent_path(&self) -> &str {
        &self.parent_path
    }

    /// Submitted folder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `parent_path/name`.
    pub fn destination_path(&self) -> String {
        format!("{}/{}", self.parent_path, self.name)
    }
}
