//! Folder provisioning command.

use clap::Args;
use dialoguer::Input;

use crate::output::{self, OutputFormat};
use folderkit_backend::build_backend;
use folderkit_core::config::AppConfig;
use folderkit_core::error::{AppError, ErrorKind};
use folderkit_core::types::ResourceKind;
use folderkit_service::{
    Command, CommandSet, DialogOutcome, DialogState, ProvisioningRequest, ProvisioningWorkflow,
    RequestContext, render,
};

/// Arguments for the provision command
#[derive(Debug, Args)]
pub struct ProvisionArgs {
    /// Kind of folder: project or client
    pub kind: ResourceKind,

    /// Folder name; prompted for when omitted
    #[arg(short, long)]
    pub name: Option<String>,

    /// URL of the list page the user is on; its ID parameter picks the
    /// parent folder for projects
    #[arg(long)]
    pub page_url: Option<String>,
}

/// Execute the provision command
pub async fn execute(
    args: &ProvisionArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let command = Command::ALL
        .into_iter()
        .find(|command| command.kind() == args.kind)
        .ok_or_else(|| AppError::internal(format!("No command creates {}", args.kind)))?;
    let dialog = CommandSet::from_config(&config).execute(command.id())?;

    let raw = match &args.name {
        Some(name) => name.clone(),
        None => prompt(&dialog)?,
    };
    let loading = dialog
        .on_input(&raw)
        .on_submit()
        .ok_or_else(|| AppError::validation("A folder name is required"))?;

    if format == OutputFormat::Table {
        eprintln!("{}", render(&loading).label);
    }

    let ctx = RequestContext::from_config(&config, args.page_url.as_deref())?;
    let request = ProvisioningRequest::from_context(&ctx, loading.kind(), loading.name())?;
    let workflow = ProvisioningWorkflow::from_config(build_backend(&config)?, &config);

    let result = workflow.provision(&request).await;
    let outcome = DialogOutcome::from_result(&result);

    match format {
        OutputFormat::Json => output::print_json(&outcome, "{}"),
        OutputFormat::Table => match &result {
            Ok(provisioned) => {
                output::print_success(&format!("Created {}", request.name()));
                output::print_kv("Path", &provisioned.destination_path);
                output::print_kv("URL", &provisioned.destination_url);
                if let Some(id) = provisioned.identifier {
                    output::print_kv("Item ID", &id.to_string());
                }
            }
            Err(err) if err.leaves_untagged_copy() => {
                output::print_warning(&format!(
                    "'{}' was created but {} is not set on it",
                    request.destination_path(),
                    config.metadata.marker_field
                ));
            }
            Err(_) => {}
        },
    }

    match outcome {
        DialogOutcome::Navigate { .. } => Ok(()),
        DialogOutcome::AlertAndClose { message } => Err(AppError::conflict(message)),
        DialogOutcome::Failed { message, .. } => {
            let kind = match &result {
                Err(err) if err.is_version_conflict() => ErrorKind::Conflict,
                _ => ErrorKind::Backend,
            };
            Err(AppError::new(kind, message))
        }
    }
}

/// Ask for the folder name using the dialog's label.
fn prompt(dialog: &DialogState) -> Result<String, AppError> {
    let view = render(dialog);
    Input::<String>::new()
        .with_prompt(view.label)
        .interact_text()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to read folder name", e))
}
