use std::fmt::Write as _;

use session_core::ScreenView;
use shared::error::Notice;

use crate::controller::events::{UiError, UiEvent};

pub fn render_view(view: &ScreenView) -> String {
    let mut out = String::new();
    let rule = "=".repeat(view.title.chars().count().max(12));
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{rule}");
    for line in &view.details {
        let _ = writeln!(out, "  {line}");
    }
    for field in &view.fields {
        let _ = writeln!(out, "  {:<20} {}", format!("{}:", field.label), field.value);
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "  ! {error}");
    }
    for (index, action) in view.actions.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", index + 1, action.label());
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    format!("*** {}: {} ***", notice.title, notice.message)
}

pub fn render_error(err: &UiError) -> String {
    format!(
        "error [{:?}/{:?}]: {}",
        err.context(),
        err.category(),
        err.message()
    )
}

pub fn render_event(event: &UiEvent) -> Option<String> {
    match event {
        UiEvent::Info(message) => Some(format!("-- {message}")),
        UiEvent::Notice(notice) => Some(render_notice(notice)),
        UiEvent::UploadStored { submission_id } => {
            Some(format!("-- submission {submission_id} stored"))
        }
        UiEvent::Error(err) => Some(render_error(err)),
        UiEvent::View(view) => Some(render_view(view)),
    }
}

#[cfg(test)]
mod tests {
    use session_core::FieldView;
    use shared::{
        domain::ScreenTag,
        protocol::{Action, FormField},
    };

    use super::*;

    #[test]
    fn view_lists_numbered_actions_and_masked_fields() {
        let view = ScreenView {
            tag: ScreenTag::Login,
            title: "Worker Login".into(),
            fields: vec![
                FieldView::new(FormField::Email, "a@b.com"),
                FieldView::new(FormField::Password, "abcd1234"),
            ],
            details: Vec::new(),
            actions: vec![Action::SubmitLogin, Action::Back],
            error: Some("Email must contain @".into()),
        };
        let text = render_view(&view);
        assert!(text.contains("Worker Login"));
        assert!(text.contains("a@b.com"));
        assert!(text.contains("********"));
        assert!(!text.contains("abcd1234"));
        assert!(text.contains("! Email must contain @"));
        assert!(text.contains("[1] Submit"));
        assert!(text.contains("[2] Back"));
    }

    #[test]
    fn notices_are_framed() {
        let notice = Notice::info("Success", "Sent to the Supervisor");
        assert_eq!(render_notice(&notice), "*** Success: Sent to the Supervisor ***");
    }
}
