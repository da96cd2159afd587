//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use folderkit_core::config::AppConfig;
use folderkit_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: Result<AppConfig, AppError>,
    config_label: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redact(config?);
            match format {
                OutputFormat::Json => output::print_json(&config, "{}"),
                OutputFormat::Table => println!("{:#?}", config),
            }
        }
        ConfigCommand::Validate => match config {
            Ok(config) => {
                output::print_success(&format!("Configuration '{}' is valid", config_label));
                output::print_kv("Web", config.site.web_url());
                output::print_kv("Tenant root", &config.site.tenant_root());
                output::print_kv("List", &config.list.title);
                output::print_kv("Backend", &config.backend.provider);
                output::print_kv(
                    "Step timeout",
                    &format!("{}s", config.workflow.step_timeout_seconds),
                );
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Mask secrets before display
fn redact(mut config: AppConfig) -> AppConfig {
    if config.backend.access_token.is_some() {
        config.backend.access_token = Some("****".to_string());
    }
    config
}
