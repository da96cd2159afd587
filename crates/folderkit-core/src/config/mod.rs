//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod backend;
pub mod logging;
pub mod site;
pub mod workflow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::backend::BackendConfig;
use self::logging::LoggingConfig;
use self::site::{ListConfig, MetadataConfig, SiteConfig, TemplateConfig};
use self::workflow::WorkflowConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (`config/default.toml`, an explicit file, then `FOLDERKIT__*`
/// environment variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The site the folders live in.
    pub site: SiteConfig,
    /// The hosting list.
    #[serde(default)]
    pub list: ListConfig,
    /// Template folder names.
    #[serde(default)]
    pub templates: TemplateConfig,
    /// Metadata tagging for project folders.
    #[serde(default)]
    pub metadata: MetadataConfig,
    /// Workflow tuning.
    #[serde(default)]
    pub workflow: WorkflowConfig,
    /// Backend selection.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges the optional `config/default.toml`, the file at `path` (which
    /// must exist when given), and environment variables prefixed with
    /// `FOLDERKIT__`.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::new(path, config::FileFormat::Toml).required(true),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("FOLDERKIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        debug!(
            path = ?path,
            web = %config.site.web_url(),
            provider = %config.backend.provider,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.site.absolute_url.starts_with("http://")
            && !self.site.absolute_url.starts_with("https://")
        {
            return Err(AppError::configuration(format!(
                "site.absolute_url must be an http(s) URL, got '{}'",
                self.site.absolute_url
            )));
        }
        if !self.site.server_relative_url.starts_with('/') {
            return Err(AppError::configuration(
                "site.server_relative_url must start with '/'",
            ));
        }
        if !self.list.server_relative_url.starts_with('/') {
            return Err(AppError::configuration(format!(
                "list.server_relative_url must be a server-relative path starting with '/', got '{}'",
                self.list.server_relative_url
            )));
        }
        if self.workflow.step_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "workflow.step_timeout_seconds must be greater than zero",
            ));
        }
        match self.backend.provider.as_str() {
            "rest" | "memory" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown backend provider '{other}' (expected 'rest' or 'memory')"
            ))),
        }
    }
}
