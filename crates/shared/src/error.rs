use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    StorageFault,
    ValidationFault,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct ItemError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ItemError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(item_id: ItemId) -> Self {
        Self::new(ErrorKind::NotFound, format!("item {item_id} not found"))
    }

    pub fn storage_fault(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageFault, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationFault, message)
    }
}
