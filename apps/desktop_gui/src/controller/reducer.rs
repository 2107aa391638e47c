//! Search state machine owned by the UI thread.
//!
//! `submit` moves the state to `Loading` and queues exactly one fetch; the
//! worker's answer comes back as a [`UiEvent`] and completes the cycle. While
//! a fetch is in flight further submissions are ignored.

use crossbeam_channel::Sender;
use shared::{
    domain::{SearchState, SearchTerm},
    error::{failure_message, UNKNOWN_FAILURE_MESSAGE},
};
use tracing::{debug, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

pub struct SearchController {
    state: SearchState,
    cmd_tx: Sender<BackendCommand>,
    status: String,
}

impl SearchController {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            state: SearchState::Idle,
            cmd_tx,
            status: String::new(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Last operator facing status line (worker lifecycle, queue problems).
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_loading()
    }

    /// Whether the submit control should accept input for the current draft.
    pub fn can_submit(&self, draft: &str) -> bool {
        !self.is_busy() && SearchTerm::parse(draft).is_some()
    }

    /// Starts a lookup for `raw`. Returns `true` when a fetch was queued.
    pub fn submit(&mut self, raw: &str) -> bool {
        if self.is_busy() {
            debug!("ignoring submit while a lookup is in flight");
            return false;
        }
        let Some(term) = SearchTerm::parse(raw) else {
            return false;
        };

        info!(%term, "starting lookup");
        self.state = SearchState::Loading;
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchDefinition { term },
            &mut self.status,
        ) {
            true
        } else {
            self.state = SearchState::Failed(UNKNOWN_FAILURE_MESSAGE.to_string());
            false
        }
    }

    pub fn on_fetch_resolved(&mut self, text: String) {
        if !self.is_busy() {
            warn!("dropping definition that arrived outside of a lookup");
            return;
        }
        self.state = SearchState::Success(text);
    }

    pub fn on_fetch_rejected(&mut self, err: &anyhow::Error) {
        if !self.is_busy() {
            warn!(error = %err, "dropping failure that arrived outside of a lookup");
            return;
        }
        self.state = SearchState::Failed(failure_message(err));
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::DefinitionReady(text) => self.on_fetch_resolved(text),
            UiEvent::DefinitionFailed(err) => self.on_fetch_rejected(&err),
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
