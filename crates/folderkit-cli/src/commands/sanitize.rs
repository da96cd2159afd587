//! Name sanitizing preview.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use folderkit_core::config::AppConfig;
use folderkit_core::error::AppError;
use folderkit_service::ResourceName;
use folderkit_service::name::NAME_CHARACTER_LIMIT;

/// Arguments for the sanitize command
#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// Text as it would be typed into the dialog
    pub text: String,

    /// Character limit; defaults to the configured one
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SanitizeReport<'a> {
    raw: &'a str,
    sanitized: &'a str,
    submitted: &'a str,
    submittable: bool,
}

/// Execute the sanitize command
pub fn execute(
    args: &SanitizeArgs,
    config: Option<AppConfig>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let limit = args
        .limit
        .or_else(|| config.map(|c| c.workflow.name_character_limit))
        .unwrap_or(NAME_CHARACTER_LIMIT);
    let name = ResourceName::with_limit(args.text.as_str(), limit);

    let report = SanitizeReport {
        raw: name.raw(),
        sanitized: name.sanitized(),
        submitted: name.submitted(),
        submittable: name.is_submittable(),
    };

    match format {
        OutputFormat::Json => output::print_json(&report, "{}"),
        OutputFormat::Table => {
            output::print_kv("Raw", report.raw);
            output::print_kv("Sanitized", report.sanitized);
            output::print_kv("Submitted", report.submitted);
            output::print_kv("Submittable", if report.submittable { "yes" } else { "no" });
        }
    }

    Ok(())
}
