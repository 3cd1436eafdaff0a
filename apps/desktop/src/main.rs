use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::{bounded, Receiver};
use shared::protocol::Action;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;
mod render;
mod simulated;

use backend_bridge::commands::BackendCommand;
use controller::{
    events::{UiError, UiErrorContext, UiEvent},
    input::{parse_line, InputCommand, HELP},
    orchestration::dispatch_backend_command,
};

#[derive(Parser, Debug)]
#[command(name = "safe_street", about = "Safe Street field reporting session")]
struct Args {
    /// TOML settings file (defaults to ./safe_street.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log at debug level regardless of RUST_LOG and the configured filter
    #[arg(long, short)]
    verbose: bool,
    /// Print backend events as JSON lines instead of text
    #[arg(long)]
    json_events: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref())?;

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let mut terminal = Terminal {
        json_events: args.json_events,
        offered: Vec::new(),
    };
    if !terminal.pump_until_view(&ui_rx)? {
        anyhow::bail!("session worker exited before showing the first screen");
    }

    let stdin = io::stdin();
    let mut status = String::new();
    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = match parse_line(&line, &terminal.offered) {
            Ok(InputCommand::Backend(cmd)) => cmd,
            Ok(InputCommand::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(InputCommand::Quit) => break,
            Ok(InputCommand::Empty) => continue,
            Err(err) => {
                terminal.emit(&UiEvent::Error(UiError::from_message(
                    UiErrorContext::Input,
                    err.to_string(),
                )))?;
                continue;
            }
        };

        if !dispatch_backend_command(&cmd_tx, cmd, &mut status) {
            terminal.emit(&UiEvent::Error(UiError::from_message(
                UiErrorContext::General,
                std::mem::take(&mut status),
            )))?;
            break;
        }
        if !terminal.pump_until_view(&ui_rx)? {
            break;
        }
    }

    tracing::debug!("terminal session ended");
    Ok(())
}

struct Terminal {
    json_events: bool,
    offered: Vec<Action>,
}

impl Terminal {
    /// Prints events until the next screen view; false once the worker is gone.
    fn pump_until_view(&mut self, ui_rx: &Receiver<UiEvent>) -> Result<bool> {
        while let Ok(event) = ui_rx.recv() {
            self.emit(&event)?;
            if let UiEvent::View(view) = event {
                self.offered = view.actions;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn emit(&self, event: &UiEvent) -> Result<()> {
        let mut stdout = io::stdout().lock();
        if self.json_events {
            writeln!(stdout, "{}", serde_json::to_string(event)?)?;
        } else if let Some(text) = render::render_event(event) {
            writeln!(stdout, "{text}")?;
        }
        stdout.flush()?;
        Ok(())
    }
}
