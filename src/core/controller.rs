//! Turn orchestration.
//!
//! A turn is accepted by [`TurnController::begin`], which records the user
//! turn and marks the conversation busy, and finished by
//! [`TurnController::resolve`], which records the reply (or raises an error
//! notification) and clears the busy flag. [`TurnController::submit`] runs
//! both halves around a single awaited completion.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::client::{ApiError, CompletionClient};
use crate::core::constants::{GENERIC_ERROR_DESCRIPTION, SUGGESTED_PROMPTS};
use crate::core::conversation::ConversationState;
use crate::core::message::ChatTurn;
use crate::core::notification::{Notification, Notifier};
use crate::core::turn_service::TurnResolution;
use crate::utils::clipboard::{Clipboard, SystemClipboard};

/// Handle for a dispatched request. The matching [`TurnController::resolve`]
/// call must pass the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    id: u64,
    prompt: String,
}

impl PendingTurn {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn into_prompt(self) -> String {
        self.prompt
    }
}

pub struct TurnController<N: Notifier> {
    state: ConversationState,
    client: Arc<dyn CompletionClient>,
    clipboard: Box<dyn Clipboard>,
    notifier: N,
    in_flight: Option<u64>,
    last_turn_id: u64,
}

impl<N: Notifier> TurnController<N> {
    pub fn new(client: Arc<dyn CompletionClient>, notifier: N) -> Self {
        Self {
            state: ConversationState::new(),
            client,
            clipboard: Box::new(SystemClipboard),
            notifier,
            in_flight: None,
            last_turn_id: 0,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn client(&self) -> Arc<dyn CompletionClient> {
        Arc::clone(&self.client)
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Accept `text` as a new turn.
    ///
    /// Returns `None` without touching state when the trimmed text is empty
    /// or another turn is still in flight.
    pub fn begin(&mut self, text: &str) -> Option<PendingTurn> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return None;
        }
        if self.state.is_busy() {
            debug!(
                in_flight = ?self.in_flight,
                "ignoring submission while a request is in flight"
            );
            return None;
        }

        self.state.push(ChatTurn::user(prompt));
        self.state.set_busy(true);
        self.last_turn_id += 1;
        let id = self.last_turn_id;
        self.in_flight = Some(id);
        info!(turn_id = id, model = %self.client.model(), "turn dispatched");

        Some(PendingTurn {
            id,
            prompt: prompt.to_string(),
        })
    }

    /// Finish the in-flight turn. Returns `false` if `id` is not the turn
    /// currently in flight, in which case nothing changes.
    pub fn resolve(&mut self, id: u64, outcome: Result<String, ApiError>) -> bool {
        if self.in_flight != Some(id) {
            warn!(turn_id = id, in_flight = ?self.in_flight, "dropping stale turn outcome");
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(text) => {
                info!(turn_id = id, "turn completed");
                self.state.push(ChatTurn::assistant(text));
                self.notifier.notify(Notification::success(
                    "Response generated",
                    "The AI has responded to your message.",
                ));
            }
            Err(err) => {
                warn!(turn_id = id, error = %err, "turn failed");
                let description = err.to_string();
                let description = if description.trim().is_empty() {
                    GENERIC_ERROR_DESCRIPTION.to_string()
                } else {
                    description
                };
                self.notifier.notify(Notification::error("Error", description));
            }
        }

        self.state.set_busy(false);
        true
    }

    pub fn apply(&mut self, resolution: TurnResolution) -> bool {
        self.resolve(resolution.id, resolution.outcome)
    }

    /// Run a whole turn: record the prompt, await the completion, record the
    /// outcome. If this future is dropped before the completion returns, the
    /// busy flag is still released.
    pub async fn submit(&mut self, text: &str) {
        let Some(pending) = self.begin(text) else {
            return;
        };

        let client = self.client();
        let guard = InFlightGuard {
            controller: self,
            id: pending.id,
        };
        let outcome = client.complete(&pending.prompt).await;
        guard.finish(outcome);
    }

    pub fn begin_suggestion(&mut self, index: usize) -> Option<PendingTurn> {
        let prompt = SUGGESTED_PROMPTS.get(index)?;
        self.begin(prompt)
    }

    pub async fn submit_suggestion(&mut self, index: usize) {
        if let Some(prompt) = SUGGESTED_PROMPTS.get(index) {
            self.submit(prompt).await;
        }
    }

    /// Remove every turn. An in-flight request is left running and its
    /// reply lands in the emptied transcript.
    pub fn clear(&mut self) {
        self.state.clear();
        self.notifier.notify(Notification::success(
            "Chat cleared",
            "All messages have been removed.",
        ));
    }

    /// Copy the text of turn `index`. Returns `false` when there is no such
    /// turn.
    pub fn copy_turn(&mut self, index: usize) -> bool {
        let Some(text) = self.state.turns().get(index).map(|t| t.text().to_owned()) else {
            return false;
        };
        self.copy_text(&text);
        true
    }

    pub fn copy_last_reply(&mut self) -> bool {
        let Some(text) = self.state.last_assistant_turn().map(|t| t.text().to_owned()) else {
            return false;
        };
        self.copy_text(&text);
        true
    }

    fn copy_text(&mut self, text: &str) {
        match self.clipboard.copy(text) {
            Ok(()) => self.notifier.notify(Notification::success(
                "Copied to clipboard",
                "The message has been copied to your clipboard.",
            )),
            Err(err) => {
                warn!(error = %err, "clipboard copy failed");
                self.notifier
                    .notify(Notification::error("Copy failed", err.to_string()));
            }
        }
    }

    fn abandon(&mut self, id: u64) {
        if self.in_flight == Some(id) {
            debug!(turn_id = id, "turn abandoned before completion");
            self.in_flight = None;
            self.state.set_busy(false);
        }
    }
}

struct InFlightGuard<'a, N: Notifier> {
    controller: &'a mut TurnController<N>,
    id: u64,
}

impl<N: Notifier> InFlightGuard<'_, N> {
    fn finish(self, outcome: Result<String, ApiError>) {
        self.controller.resolve(self.id, outcome);
    }
}

impl<N: Notifier> Drop for InFlightGuard<'_, N> {
    fn drop(&mut self) {
        self.controller.abandon(self.id);
    }
}
