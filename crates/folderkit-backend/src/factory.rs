//! Builds the configured backend.

use std::sync::Arc;

use tracing::info;

use folderkit_core::config::AppConfig;
use folderkit_core::error::AppError;
use folderkit_core::result::AppResult;
use folderkit_core::traits::backend::ProvisioningBackend;

use crate::providers::MemoryBackend;

/// Instantiate the backend named by `backend.provider`.
///
/// The in-memory backend is seeded with the list root and both template
/// folders so a dry run can provision without further setup.
pub fn build_backend(config: &AppConfig) -> AppResult<Arc<dyn ProvisioningBackend>> {
    let backend: Arc<dyn ProvisioningBackend> = match config.backend.provider.as_str() {
        "memory" => {
            let list_root = config.list.server_relative_url.trim_end_matches('/');
            let mut seeds = vec![
                list_root.to_string(),
                format!("{list_root}/{}", config.templates.project),
                format!("{list_root}/{}", config.templates.client),
            ];
            seeds.extend(config.backend.memory.seed_folders.iter().cloned());
            Arc::new(MemoryBackend::seeded(&config.backend.memory.actor, seeds))
        }
        #[cfg(feature = "rest")]
        "rest" => Arc::new(crate::providers::RestBackend::from_config(config)?),
        other => {
            return Err(AppError::configuration(format!(
                "Backend provider '{other}' is not available"
            )));
        }
    };

    info!(
        backend = backend.backend_type(),
        web = %config.site.web_url(),
        "Backend initialized"
    );
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use folderkit_core::config::site::SiteConfig;

    use super::*;

    fn config(provider: &str) -> AppConfig {
        AppConfig {
            site: SiteConfig {
                absolute_url: "https://tenant.example.com/sites/x".to_string(),
                server_relative_url: "/sites/x".to_string(),
            },
            list: folderkit_core::config::site::ListConfig {
                server_relative_url: "/sites/x/Docs".to_string(),
                ..Default::default()
            },
            templates: Default::default(),
            metadata: Default::default(),
            workflow: Default::default(),
            backend: folderkit_core::config::backend::BackendConfig {
                provider: provider.to_string(),
                ..Default::default()
            },
            logging: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_memory_backend_is_seeded_with_templates() {
        let backend = build_backend(&config("memory")).unwrap();
        assert_eq!(backend.backend_type(), "memory");
        assert!(backend.exists("/sites/x/Docs").await.unwrap());
        assert!(
            backend
                .exists("/sites/x/Docs/02. Project Folder Template")
                .await
                .unwrap()
        );
        assert!(
            backend
                .exists("/sites/x/Docs/01. Client Folder Template")
                .await
                .unwrap()
        );
    }

    #[test]
    fn test_rest_backend_from_config() {
        let backend = build_backend(&config("rest")).unwrap();
        assert_eq!(backend.backend_type(), "rest");
    }

    #[test]
    fn test_unknown_provider() {
        assert!(build_backend(&config("ftp")).is_err());
    }
}
