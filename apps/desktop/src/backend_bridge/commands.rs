//! Backend commands queued from the terminal to the session worker.

use shared::protocol::{Action, FormField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    SetField { field: FormField, value: String },
    Act(Action),
    Refresh,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SetField { .. } => "set_field",
            BackendCommand::Act(_) => "act",
            BackendCommand::Refresh => "refresh",
        }
    }
}
