//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::DefinitionSource;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Spawns the backend worker thread. It owns its own Tokio runtime and runs
/// until the command queue disconnects.
pub fn launch(
    source: Arc<dyn DefinitionSource>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(serve(source, cmd_rx, ui_tx));
    })
}

/// Serves queued commands one at a time. Each fetch is awaited before the next
/// command is taken, so at most one outbound call is in flight.
pub async fn serve(
    source: Arc<dyn DefinitionSource>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

    while let Ok(cmd) = cmd_rx.recv() {
        let event = match cmd {
            BackendCommand::FetchDefinition { term } => match source.fetch(term.as_str()).await {
                Ok(text) => UiEvent::DefinitionReady(text),
                Err(err) => UiEvent::DefinitionFailed(err),
            },
        };

        if ui_tx.send(event).is_err() {
            tracing::debug!("ui event queue closed; stopping backend worker");
            break;
        }
    }

    tracing::debug!("backend worker finished");
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
