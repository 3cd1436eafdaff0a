//! Command orchestration helpers from terminal input to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd`; returns false and fills `status` when the worker cannot take it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "Command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Session worker disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::protocol::Action;

    use super::*;

    #[test]
    fn queued_commands_leave_status_untouched() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status));
        assert!(status.is_empty());
        assert_eq!(rx.try_recv().ok(), Some(BackendCommand::Refresh));
    }

    #[test]
    fn full_queue_reports_retry() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status));
        assert!(!dispatch_backend_command(
            &tx,
            BackendCommand::Act(Action::Start),
            &mut status
        ));
        assert!(status.contains("full"));
    }

    #[test]
    fn disconnected_worker_is_reported() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        assert!(!dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status));
        assert!(status.contains("disconnected"));
    }
}
