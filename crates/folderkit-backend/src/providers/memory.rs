//! In-memory backend.
//!
//! Keeps a folder tree keyed by server-relative path. Used for dry runs
//! from the CLI and as a realistic backend in tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use folderkit_core::error::AppError;
use folderkit_core::result::AppResult;
use folderkit_core::traits::backend::{MetadataFields, ProvisioningBackend};
use folderkit_core::types::{ItemHandle, ItemId};

/// A stored folder and its list item.
#[derive(Debug, Clone)]
pub struct FolderRecord {
    /// Item identifier.
    pub id: ItemId,
    /// Item version, bumped on every metadata update.
    pub version: u64,
    /// Item fields.
    pub fields: MetadataFields,
    /// Who last edited the folder.
    pub editor: String,
    /// When the folder was last modified.
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    folders: BTreeMap<String, FolderRecord>,
    next_id: u64,
}

impl State {
    fn insert(&mut self, path: String, editor: &str) {
        self.next_id += 1;
        self.folders.insert(
            path,
            FolderRecord {
                id: ItemId(self.next_id),
                version: 1,
                fields: MetadataFields::new(),
                editor: editor.to_string(),
                modified: Utc::now(),
            },
        );
    }
}

/// In-memory folder store.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    state: Arc<RwLock<State>>,
    /// Editor stamped on copies that do not preserve provenance.
    actor: String,
}

impl MemoryBackend {
    /// Create a store with the given folders already present.
    pub fn seeded<I, S>(actor: &str, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = State::default();
        for path in paths {
            let path = normalize(path.as_ref());
            if !state.folders.contains_key(&path) {
                state.insert(path, actor);
            }
        }
        Self {
            state: Arc::new(RwLock::new(state)),
            actor: actor.to_string(),
        }
    }

    /// Snapshot of the folder at `path`.
    pub async fn folder(&self, path: &str) -> Option<FolderRecord> {
        self.state.read().await.folders.get(&normalize(path)).cloned()
    }

    /// All folder paths, sorted.
    pub async fn paths(&self) -> Vec<String> {
        self.state.read().await.folders.keys().cloned().collect()
    }

    /// Overwrite a field outside the workflow, bumping the version.
    pub async fn set_field(&self, path: &str, field: &str, value: Value) -> AppResult<()> {
        let mut state = self.state.write().await;
        let record = state
            .folders
            .get_mut(&normalize(path))
            .ok_or_else(|| AppError::not_found(format!("Folder not found: {path}")))?;
        record.fields.insert(field.to_string(), value);
        record.version += 1;
        record.modified = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ProvisioningBackend for MemoryBackend {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.state.read().await.folders.contains_key(&normalize(path)))
    }

    async fn copy(
        &self,
        source: &str,
        destination: &str,
        preserve_provenance: bool,
    ) -> AppResult<()> {
        let source = normalize(source);
        let destination = normalize(destination);

        if destination == source || destination.starts_with(&format!("{source}/")) {
            return Err(AppError::validation(format!(
                "Cannot copy '{source}' into itself"
            )));
        }

        let mut state = self.state.write().await;

        if !state.folders.contains_key(&source) {
            return Err(AppError::not_found(format!("Folder not found: {source}")));
        }
        if state.folders.contains_key(&destination) {
            return Err(AppError::conflict(format!(
                "Destination already exists: {destination}"
            )));
        }
        if let Some(parent) = parent_of(&destination)
            && !state.folders.contains_key(parent)
        {
            return Err(AppError::not_found(format!(
                "Destination parent not found: {parent}"
            )));
        }

        let prefix = format!("{source}/");
        let copies: Vec<(String, FolderRecord)> = state
            .folders
            .iter()
            .filter(|(path, _)| **path == source || path.starts_with(&prefix))
            .map(|(path, record)| {
                let suffix = &path[source.len()..];
                (format!("{destination}{suffix}"), record.clone())
            })
            .collect();

        for (path, original) in copies {
            state.next_id += 1;
            let (editor, modified) = if preserve_provenance {
                (original.editor, original.modified)
            } else {
                (self.actor.clone(), Utc::now())
            };
            debug!(path = %path, item_id = state.next_id, "Copied folder");
            let id = ItemId(state.next_id);
            state.folders.insert(
                path,
                FolderRecord {
                    id,
                    version: 1,
                    fields: original.fields,
                    editor,
                    modified,
                },
            );
        }

        Ok(())
    }

    async fn resolve_identifier(&self, path: &str) -> AppResult<Option<ItemHandle>> {
        let state = self.state.read().await;
        let record = state
            .folders
            .get(&normalize(path))
            .ok_or_else(|| AppError::not_found(format!("Folder not found: {path}")))?;
        Ok(Some(ItemHandle::new(record.id, record.version.to_string())))
    }

    async fn patch_metadata(
        &self,
        id: ItemId,
        fields: &MetadataFields,
        expected_version: Option<&str>,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        let record = state
            .folders
            .values_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| AppError::not_found(format!("Item not found: {id}")))?;

        if let Some(expected) = expected_version
            && expected != record.version.to_string()
        {
            return Err(AppError::conflict(format!(
                "Item {id} is at version {}, expected {expected}",
                record.version
            )));
        }

        for (key, value) in fields {
            record.fields.insert(key.clone(), value.clone());
        }
        record.version += 1;
        record.modified = Utc::now();
        Ok(())
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn parent_of(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(0) | None => None,
        Some(idx) => Some(&path[..idx]),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn backend() -> MemoryBackend {
        MemoryBackend::seeded(
            "template-owner",
            [
                "/sites/x/Docs",
                "/sites/x/Docs/02. Project Folder Template",
                "/sites/x/Docs/02. Project Folder Template/Contracts",
            ],
        )
    }

    #[tokio::test]
    async fn test_copy_includes_descendants() {
        let backend = backend();
        backend
            .copy(
                "/sites/x/Docs/02. Project Folder Template",
                "/sites/x/Docs/Acme",
                true,
            )
            .await
            .unwrap();

        assert!(backend.exists("/sites/x/Docs/Acme").await.unwrap());
        assert!(backend.exists("/sites/x/Docs/Acme/Contracts").await.unwrap());
        assert!(
            backend
                .exists("/sites/x/Docs/02. Project Folder Template")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_copy_provenance() {
        let backend = MemoryBackend::seeded("owner", ["/Docs", "/Docs/Template"]);
        let copier = MemoryBackend {
            actor: "copier".to_string(),
            ..backend.clone()
        };

        copier.copy("/Docs/Template", "/Docs/Kept", true).await.unwrap();
        copier.copy("/Docs/Template", "/Docs/Reset", false).await.unwrap();

        assert_eq!(backend.folder("/Docs/Kept").await.unwrap().editor, "owner");
        assert_eq!(backend.folder("/Docs/Reset").await.unwrap().editor, "copier");
    }

    #[tokio::test]
    async fn test_copy_rejects_existing_destination() {
        let backend = backend();
        let err = backend
            .copy(
                "/sites/x/Docs/02. Project Folder Template",
                "/sites/x/Docs",
                true,
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_copy_requires_source_and_parent() {
        let backend = backend();
        assert!(backend.copy("/sites/x/Docs/Missing", "/sites/x/Docs/A", true).await.is_err());
        assert!(
            backend
                .copy(
                    "/sites/x/Docs/02. Project Folder Template",
                    "/sites/x/Other/A",
                    true
                )
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_patch_checks_version() {
        let backend = backend();
        let handle = backend
            .resolve_identifier("/sites/x/Docs")
            .await
            .unwrap()
            .unwrap();

        let mut fields = MetadataFields::new();
        fields.insert("IsProjectFolder".to_string(), json!(true));

        backend.set_field("/sites/x/Docs", "Title", json!("Docs")).await.unwrap();

        let err = backend
            .patch_metadata(handle.id, &fields, handle.version.as_deref())
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let fresh = backend
            .resolve_identifier("/sites/x/Docs")
            .await
            .unwrap()
            .unwrap();
        backend
            .patch_metadata(fresh.id, &fields, fresh.version.as_deref())
            .await
            .unwrap();

        let record = backend.folder("/sites/x/Docs").await.unwrap();
        assert_eq!(record.fields["IsProjectFolder"], json!(true));
        assert_eq!(record.fields["Title"], json!("Docs"));
        assert_eq!(record.version, 3);
    }

    #[test]
    fn test_normalize_and_parent() {
        assert_eq!(normalize("sites/x/"), "/sites/x");
        assert_eq!(parent_of("/sites/x"), Some("/sites"));
        assert_eq!(parent_of("/sites"), None);
    }
}
