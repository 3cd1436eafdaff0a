use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{domain::ScreenTag, protocol::Capability};

pub const EMAIL_MISSING_AT: &str = "Email must contain @";
pub const RESET_EMAIL_INVALID: &str = "Enter a valid email address";
pub const WEAK_PASSWORD: &str =
    "Password must be at least 8 characters long and contain at least one number";
pub const MISSING_FIELDS: &str = "All fields are required!";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const INVALID_OTP: &str = "Invalid OTP";
pub const UPLOAD_INCOMPLETE: &str =
    "Please select an image and extract location before uploading.";
pub const NO_UPLOADS: &str = "No uploads available";
pub const NO_IMAGE_TO_RETAKE: &str = "No image has been captured yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    PermissionDenied,
    Precondition,
    Collaborator,
    UnavailableAction,
}

/// A handler failure. Never fatal; the screen stays where it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{}", .0.denial_message())]
    PermissionDenied(Capability),
    #[error("{0}")]
    Precondition(&'static str),
    #[error("{0}")]
    Collaborator(String),
    #[error("action `{action}` is not available on screen `{screen}`")]
    UnavailableAction { action: String, screen: ScreenTag },
}

impl FlowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::Validation(_) => ErrorCode::Validation,
            FlowError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            FlowError::Precondition(_) => ErrorCode::Precondition,
            FlowError::Collaborator(_) => ErrorCode::Collaborator,
            FlowError::UnavailableAction { .. } => ErrorCode::UnavailableAction,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FlowError::PermissionDenied(_) => "Permission Denied",
            _ => "Error",
        }
    }
}

/// A user-facing alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub code: Option<ErrorCode>,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            code: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.code.is_some()
    }
}

impl From<&FlowError> for Notice {
    fn from(value: &FlowError) -> Self {
        Self {
            title: value.title().to_string(),
            message: value.to_string(),
            code: Some(value.code()),
        }
    }
}
