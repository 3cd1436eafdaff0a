//! Runtime bridge between the terminal command queue and the session worker.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use session_core::{AppContext, ScreenController, SessionEvent};
use tokio::sync::broadcast;

use crate::{
    backend_bridge::commands::BackendCommand,
    config::Settings,
    controller::events::{UiError, UiErrorContext, UiEvent},
    simulated::devices_from_settings,
};

/// Owns the session and turns each command into the events the terminal prints.
/// Every batch ends with a [`UiEvent::View`].
pub struct SessionWorker {
    controller: ScreenController,
    events: broadcast::Receiver<SessionEvent>,
}

impl SessionWorker {
    pub fn new(controller: ScreenController) -> Self {
        let events = controller.subscribe_events();
        Self { controller, events }
    }

    pub async fn process(&mut self, cmd: BackendCommand) -> Vec<UiEvent> {
        let mut out = Vec::new();
        match cmd {
            BackendCommand::SetField { field, value } => {
                if let Err(err) = self.controller.set_field(field, value) {
                    out.push(UiEvent::Error(UiError::from_flow(UiErrorContext::FormEdit, &err)));
                }
            }
            BackendCommand::Act(action) => {
                // Failures already surface as a notice or as the inline error.
                let _ = self.controller.handle(action).await;
            }
            BackendCommand::Refresh => {}
        }
        self.drain_session_events(&mut out);
        out.push(UiEvent::View(self.controller.view().await));
        out
    }

    pub async fn current_view(&self) -> UiEvent {
        UiEvent::View(self.controller.view().await)
    }

    fn drain_session_events(&mut self, out: &mut Vec<UiEvent>) {
        loop {
            match self.events.try_recv() {
                Ok(SessionEvent::Notice(notice)) => out.push(UiEvent::Notice(notice)),
                Ok(SessionEvent::UploadStored(submission)) => out.push(UiEvent::UploadStored {
                    submission_id: submission.submission_id,
                }),
                Ok(SessionEvent::ScreenChanged { .. }) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "session event receiver lagged");
                }
                Err(_) => break,
            }
        }
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("session worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build session runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let context = AppContext::new();
            let controller = context.session(devices_from_settings(&settings));
            let mut worker = SessionWorker::new(controller);
            tracing::info!("session worker ready");
            let _ = ui_tx.send(UiEvent::Info("Session ready; type `help` for commands".to_string()));
            let _ = ui_tx.send(worker.current_view().await);

            while let Ok(cmd) = cmd_rx.recv() {
                for event in worker.process(cmd).await {
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("terminal closed; stopping session worker");
                        return;
                    }
                }
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use shared::{
        domain::Role,
        protocol::{Action, FormField},
    };

    use super::*;

    fn worker() -> SessionWorker {
        let controller = AppContext::new().session(devices_from_settings(&Settings::default()));
        SessionWorker::new(controller)
    }

    fn last_view_tag(events: &[UiEvent]) -> Option<shared::domain::ScreenTag> {
        match events.last() {
            Some(UiEvent::View(view)) => Some(view.tag),
            _ => None,
        }
    }

    #[tokio::test]
    async fn every_batch_ends_with_a_view() {
        let mut worker = worker();
        let events = worker.process(BackendCommand::Act(Action::Start)).await;
        assert_eq!(
            last_view_tag(&events),
            Some(shared::domain::ScreenTag::RoleSelection)
        );
    }

    #[tokio::test]
    async fn field_edits_off_screen_report_input_errors() {
        let mut worker = worker();
        let events = worker
            .process(BackendCommand::SetField {
                field: FormField::Email,
                value: "a@b.com".into(),
            })
            .await;
        assert!(matches!(events.first(), Some(UiEvent::Error(_))));
    }

    #[tokio::test]
    async fn worker_upload_emits_notice_and_stored_event() {
        let mut worker = worker();
        for cmd in [
            BackendCommand::Act(Action::Start),
            BackendCommand::Act(Action::SelectRole(Role::Worker)),
            BackendCommand::Act(Action::OpenLogin),
            BackendCommand::SetField {
                field: FormField::Email,
                value: "a@b.com".into(),
            },
            BackendCommand::SetField {
                field: FormField::Password,
                value: "abcd1234".into(),
            },
            BackendCommand::Act(Action::SubmitLogin),
            BackendCommand::Act(Action::UploadPicture),
            BackendCommand::Act(Action::TakePicture),
            BackendCommand::Act(Action::GetLocation),
        ] {
            worker.process(cmd).await;
        }

        let events = worker.process(BackendCommand::Act(Action::Upload)).await;
        assert!(events
            .iter()
            .any(|e| matches!(e, UiEvent::UploadStored { .. })));
        assert!(events.iter().any(|e| matches!(
            e,
            UiEvent::Notice(notice) if notice.message == "Sent to the Supervisor"
        )));
        assert_eq!(
            last_view_tag(&events),
            Some(shared::domain::ScreenTag::WorkerDashboard)
        );
    }
}
