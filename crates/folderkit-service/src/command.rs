//! List view commands and their visibility.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use folderkit_core::config::AppConfig;
use folderkit_core::error::AppError;
use folderkit_core::types::ResourceKind;

use crate::dialog::DialogState;

/// A command shown in the list view's command bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Opens the new-project dialog.
    NewProject,
    /// Opens the new-client dialog.
    NewClient,
}

impl Command {
    /// Every command, in command bar order.
    pub const ALL: [Command; 2] = [Command::NewProject, Command::NewClient];

    /// Identifier the host uses for this command.
    pub fn id(self) -> &'static str {
        match self {
            Self::NewProject => "COMMAND_1",
            Self::NewClient => "COMMAND_2",
        }
    }

    /// Button caption.
    pub fn title(self) -> &'static str {
        match self {
            Self::NewProject => "New Project",
            Self::NewClient => "New Client",
        }
    }

    /// Kind of folder the command provisions.
    pub fn kind(self) -> ResourceKind {
        match self {
            Self::NewProject => ResourceKind::Project,
            Self::NewClient => ResourceKind::Client,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.id() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown command '{s}'")))
    }
}

/// The command bar: which commands show, and what executing one does.
#[derive(Debug, Clone)]
pub struct CommandSet {
    /// Commands are only visible on the list with this title.
    list_title: String,
    /// Name length limit passed to opened dialogs.
    name_limit: usize,
}

impl CommandSet {
    pub fn new(list_title: &str, name_limit: usize) -> Self {
        Self {
            list_title: list_title.to_string(),
            name_limit,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.list.title, config.workflow.name_character_limit)
    }

    /// Whether a command shows on the list titled `current_list_title`.
    ///
    /// Both commands share the same rule; the selection is irrelevant.
    pub fn is_visible(&self, _command: Command, current_list_title: &str) -> bool {
        current_list_title == self.list_title
    }

    /// Commands visible on the given list, in command bar order.
    pub fn visible_commands(&self, current_list_title: &str) -> Vec<Command> {
        Command::ALL
            .into_iter()
            .filter(|command| self.is_visible(*command, current_list_title))
            .collect()
    }

    /// Execute a command by host id, returning the freshly opened dialog.
    pub fn execute(&self, command_id: &str) -> Result<DialogState, AppError> {
        let command: Command = command_id.parse()?;
        Ok(DialogState::with_limit(command.kind(), self.name_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_only_on_configured_list() {
        let set = CommandSet::new("Client & Partner Data", 255);
        assert_eq!(
            set.visible_commands("Client & Partner Data"),
            vec![Command::NewProject, Command::NewClient]
        );
        assert!(set.visible_commands("Documents").is_empty());
        assert!(set.visible_commands("client & partner data").is_empty());
    }

    #[test]
    fn test_execute_opens_matching_dialog() {
        let set = CommandSet::new("Docs", 255);
        assert_eq!(set.execute("COMMAND_1").unwrap().kind(), ResourceKind::Project);
        assert_eq!(set.execute("COMMAND_2").unwrap().kind(), ResourceKind::Client);
    }

    #[test]
    fn test_unknown_command() {
        let set = CommandSet::new("Docs", 255);
        let err = set.execute("COMMAND_3").unwrap_err();
        assert!(err.message.contains("COMMAND_3"));
    }
}
