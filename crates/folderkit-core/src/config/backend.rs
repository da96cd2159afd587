//! Backend provider configuration.

use serde::{Deserialize, Serialize};

/// Which backend the workflow talks to, and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend provider: `"rest"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Bearer token sent with every REST request.
    #[serde(default)]
    pub access_token: Option<String>,
    /// User-Agent header for REST requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// In-memory backend settings.
    #[serde(default)]
    pub memory: MemoryBackendConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            access_token: None,
            user_agent: default_user_agent(),
            memory: MemoryBackendConfig::default(),
        }
    }
}

/// In-memory backend configuration, used for dry runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryBackendConfig {
    /// Editor recorded on copies made without provenance preservation.
    #[serde(default = "default_actor")]
    pub actor: String,
    /// Server-relative folder paths that exist at startup.
    #[serde(default)]
    pub seed_folders: Vec<String>,
}

impl Default for MemoryBackendConfig {
    fn default() -> Self {
        Self {
            actor: default_actor(),
            seed_folders: Vec::new(),
        }
    }
}

fn default_provider() -> String {
    "rest".to_string()
}

fn default_user_agent() -> String {
    concat!("folderkit/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_actor() -> String {
    "folderkit".to_string()
}
