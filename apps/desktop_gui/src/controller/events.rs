//! Surface events and user-facing notices for the item manager controller.

use shared::error::{ErrorKind, ItemError};

/// Events emitted by the presentation surface and dispatched to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    AddClicked,
    DeleteClicked,
    UpdateClicked,
    SelectionChanged,
}

impl ViewEvent {
    pub fn name(self) -> &'static str {
        match self {
            ViewEvent::AddClicked => "add_clicked",
            ViewEvent::DeleteClicked => "delete_clicked",
            ViewEvent::UpdateClicked => "update_clicked",
            ViewEvent::SelectionChanged => "selection_changed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Success,
    Warning,
    Error,
}

impl NoticeSeverity {
    pub fn title(self) -> &'static str {
        match self {
            NoticeSeverity::Success => "Success",
            NoticeSeverity::Warning => "Warning",
            NoticeSeverity::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.severity.title()
    }
}

/// The store operation a failure happened in; picks the wording of the error notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Add,
    Update,
    Delete,
    Select,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Load => "load items",
            Operation::Add => "add item",
            Operation::Update => "update item",
            Operation::Delete => "delete item",
            Operation::Select => "get item",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Operation::Select => "Selected item not found.",
            _ => "Item not found.",
        }
    }
}

/// Maps a store failure onto the notice shown to the user, branching on kind only.
pub fn notice_for_failure(operation: Operation, err: &ItemError) -> Notice {
    match err.kind {
        ErrorKind::NotFound => Notice::error(operation.not_found_message()),
        ErrorKind::ValidationFault => Notice::warning(err.message.clone()),
        ErrorKind::StorageFault => {
            Notice::error(format!("Failed to {}: {}", operation.verb(), err.message))
        }
    }
}
