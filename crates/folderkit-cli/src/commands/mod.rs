//! CLI command definitions and dispatch.

pub mod config;
pub mod list;
pub mod provision;
pub mod sanitize;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use folderkit_core::config::AppConfig;
use folderkit_core::error::AppError;

/// Folderkit: create project and client folders from templates
#[derive(Debug, Parser)]
#[command(name = "folderkit", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file, merged over config/default.toml
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a project or client folder
    Provision(provision::ProvisionArgs),
    /// Show how a folder name would be sanitized
    Sanitize(sanitize::SanitizeArgs),
    /// List the commands shown on a list
    Commands(list::CommandsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: Result<AppConfig, AppError>) -> Result<(), AppError> {
        match &self.command {
            Commands::Provision(args) => provision::execute(args, config?, self.format).await,
            Commands::Sanitize(args) => sanitize::execute(args, config.ok(), self.format),
            Commands::Commands(args) => list::execute(args, config.ok(), self.format),
            Commands::Config(args) => config::execute(args, config, self.config_label(), self.format),
        }
    }

    fn config_label(&self) -> &str {
        self.config.as_deref().unwrap_or("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use folderkit_core::types::ResourceKind;

    use super::*;

    #[test]
    fn test_parse_provision() {
        let cli = Cli::try_parse_from([
            "folderkit",
            "-f",
            "json",
            "provision",
            "project",
            "--name",
            "Acme Launch",
            "--page-url",
            "https://tenant/sites/x/Docs/Forms/AllItems.aspx?ID=%2Fsites%2Fx%2FDocs%2FAcme",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Provision(args) => {
                assert_eq!(args.kind, ResourceKind::Project);
                assert_eq!(args.name.as_deref(), Some("Acme Launch"));
                assert!(args.page_url.is_some());
            }
            other => panic!("expected provision, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_kind_case_insensitive() {
        let cli = Cli::try_parse_from(["folderkit", "provision", "Client"]).unwrap();
        match cli.command {
            Commands::Provision(args) => assert_eq!(args.kind, ResourceKind::Client),
            other => panic!("expected provision, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["folderkit", "provision", "vendor"]).is_err());
    }

    #[test]
    fn test_config_path_defaults() {
        let cli = Cli::try_parse_from(["folderkit", "sanitize", "a*b"]).unwrap();
        assert!(cli.config.is_none());
        assert_eq!(cli.config_label(), "config/default.toml");
    }
}
