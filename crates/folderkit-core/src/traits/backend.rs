//! Backend trait for the provisioning workflow.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::result::AppResult;
use crate::types::{ItemHandle, ItemId};

/// Field name to value map sent in a partial metadata update.
pub type MetadataFields = Map<String, Value>;

/// The four operations the provisioning workflow needs from a backend.
///
/// Paths are server-relative (`/sites/x/Docs/Acme`). Implementations
/// exist for a SharePoint-style REST API and an in-memory store, both in
/// `folderkit-backend`.
#[async_trait]
pub trait ProvisioningBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g. "rest", "memory").
    fn backend_type(&self) -> &str;

    /// Check whether a folder exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Copy the folder at `source` (and its contents) to `destination`.
    ///
    /// With `preserve_provenance` the copy keeps the source's editor and
    /// modified fields instead of stamping the caller.
    async fn copy(&self, source: &str, destination: &str, preserve_provenance: bool)
    -> AppResult<()>;

    /// Look up the item behind the folder at `path`.
    ///
    /// Returns `Ok(None)` when the folder exists but carries no item id.
    async fn resolve_identifier(&self, path: &str) -> AppResult<Option<ItemHandle>>;

    /// Merge `fields` into the item, leaving other fields untouched.
    ///
    /// When `expected_version` is given the update only applies if the
    /// item is still at that version; otherwise a conflict error is
    /// returned.
    async fn patch_metadata(
        &self,
        id: ItemId,
        fields: &MetadataFields,
        expected_version: Option<&str>,
    ) -> AppResult<()>;
}
