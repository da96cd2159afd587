//! Command bar listing.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use folderkit_core::config::AppConfig;
use folderkit_core::config::site::ListConfig;
use folderkit_core::error::AppError;
use folderkit_service::CommandSet;
use folderkit_service::name::NAME_CHARACTER_LIMIT;

/// Arguments for the commands listing
#[derive(Debug, Args)]
pub struct CommandsArgs {
    /// Title of the list being viewed; defaults to the configured list
    #[arg(short, long)]
    pub list_title: Option<String>,
}

/// Command row for table output
#[derive(Debug, Serialize, Tabled)]
struct CommandRow {
    /// Host command id
    id: &'static str,
    /// Button caption
    title: &'static str,
    /// Folder kind created
    kind: String,
}

/// Execute the commands listing
pub fn execute(
    args: &CommandsArgs,
    config: Option<AppConfig>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let set = match &config {
        Some(config) => CommandSet::from_config(config),
        None => CommandSet::new(&ListConfig::default().title, NAME_CHARACTER_LIMIT),
    };
    let configured_title = config
        .map(|c| c.list.title)
        .unwrap_or_else(|| ListConfig::default().title);
    let title = args.list_title.as_deref().unwrap_or(&configured_title);

    let rows: Vec<CommandRow> = set
        .visible_commands(title)
        .into_iter()
        .map(|command| CommandRow {
            id: command.id(),
            title: command.title(),
            kind: command.kind().to_string(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
