//! Backend-to-terminal events and error modeling for the terminal controller.

use serde::Serialize;
use session_core::ScreenView;
use shared::{
    domain::SubmissionId,
    error::{ErrorCode, FlowError, Notice},
};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum UiEvent {
    Info(String),
    Notice(Notice),
    UploadStored { submission_id: SubmissionId },
    Error(UiError),
    View(ScreenView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiErrorCategory {
    Validation,
    Permission,
    Precondition,
    Device,
    Input,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiErrorContext {
    BackendStartup,
    Input,
    FormEdit,
    General,
}

#[derive(Debug, Clone, Serialize)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_flow(context: UiErrorContext, err: &FlowError) -> Self {
        let category = match err.code() {
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::PermissionDenied => UiErrorCategory::Permission,
            ErrorCode::Precondition => UiErrorCategory::Precondition,
            ErrorCode::Collaborator => UiErrorCategory::Device,
            ErrorCode::UnavailableAction => UiErrorCategory::Input,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("permission")
            || message_lower.contains("access is required")
        {
            UiErrorCategory::Permission
        } else if message_lower.contains("unknown command")
            || message_lower.contains("no option")
            || message_lower.contains("missing value")
            || message_lower.contains("not available")
        {
            UiErrorCategory::Input
        } else if message_lower.contains("invalid") || message_lower.contains("must") {
            UiErrorCategory::Validation
        } else if message_lower.contains("camera")
            || message_lower.contains("location")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Device
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use shared::{error::WEAK_PASSWORD, protocol::Capability};

    use super::*;

    #[test]
    fn flow_errors_map_by_code() {
        let err = UiError::from_flow(
            UiErrorContext::General,
            &FlowError::PermissionDenied(Capability::Camera),
        );
        assert_eq!(err.category(), UiErrorCategory::Permission);
        assert_eq!(err.message(), "Camera permission is required to take pictures.");

        let err = UiError::from_flow(UiErrorContext::FormEdit, &FlowError::Validation(WEAK_PASSWORD));
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.context(), UiErrorContext::FormEdit);
    }

    #[test]
    fn free_text_messages_are_classified() {
        let cases = [
            ("unknown command `fly`", UiErrorCategory::Input),
            ("no option 7 on this screen", UiErrorCategory::Input),
            ("backend worker startup failure: failed to build runtime", UiErrorCategory::Device),
            ("something odd", UiErrorCategory::Unknown),
        ];
        for (message, expected) in cases {
            assert_eq!(
                UiError::from_message(UiErrorContext::Input, message).category(),
                expected,
                "{message}"
            );
        }
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_value(UiEvent::Info("ready".into())).expect("serialize");
        assert_eq!(json["event"], "info");
        assert_eq!(json["data"], "ready");
    }
}
