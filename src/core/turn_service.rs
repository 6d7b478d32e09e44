use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::core::client::{ApiError, CompletionClient};
use crate::core::controller::PendingTurn;

/// Result of a dispatched turn, tagged with the id from [`PendingTurn`].
#[derive(Debug)]
pub struct TurnResolution {
    pub id: u64,
    pub outcome: Result<String, ApiError>,
}

/// Runs completions on the tokio runtime and reports back over a channel so
/// the event loop can keep drawing while a request is in flight.
#[derive(Clone)]
pub struct TurnService {
    tx: mpsc::UnboundedSender<TurnResolution>,
}

impl TurnService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TurnResolution>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Spawn the request for `pending`. Exactly one resolution is sent per
    /// call, including when the request task panics.
    pub fn dispatch(&self, client: Arc<dyn CompletionClient>, pending: PendingTurn) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let id = pending.id();
            let prompt = pending.into_prompt();
            let request = tokio::spawn(async move { client.complete(&prompt).await });

            let outcome = match request.await {
                Ok(outcome) => outcome,
                Err(join_err) => Err(ApiError::Aborted(join_err.to_string())),
            };

            if tx.send(TurnResolution { id, outcome }).is_err() {
                debug!(turn_id = id, "event loop gone before turn resolved");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::TurnController;
    use crate::core::notification::RecordingNotifier;
    use async_trait::async_trait;

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
            Ok(format!("echo: {prompt}"))
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    struct PanickingClient;

    #[async_trait]
    impl CompletionClient for PanickingClient {
        async fn complete(&self, _prompt: &str) -> Result<String, ApiError> {
            panic!("transport exploded");
        }

        fn model(&self) -> &str {
            "panic"
        }
    }

    #[tokio::test]
    async fn dispatch_reports_outcome_with_turn_id() {
        let client: Arc<dyn CompletionClient> = Arc::new(EchoClient);
        let mut controller = TurnController::new(client, RecordingNotifier::default());
        let (service, mut rx) = TurnService::new();

        let pending = controller.begin("Hello").expect("turn should start");
        let id = pending.id();
        service.dispatch(controller.client(), pending);

        let resolution = rx.recv().await.expect("resolution");
        assert_eq!(resolution.id, id);
        assert_eq!(resolution.outcome.as_deref().ok(), Some("echo: Hello"));

        assert!(controller.apply(resolution));
        assert!(!controller.state().is_busy());
        assert_eq!(controller.state().len(), 2);
    }

    #[tokio::test]
    async fn panicking_request_still_resolves() {
        let client: Arc<dyn CompletionClient> = Arc::new(PanickingClient);
        let mut controller = TurnController::new(client, RecordingNotifier::default());
        let (service, mut rx) = TurnService::new();

        let pending = controller.begin("Hello").expect("turn should start");
        service.dispatch(controller.client(), pending);

        let resolution = rx.recv().await.expect("resolution");
        assert!(matches!(resolution.outcome, Err(ApiError::Aborted(_))));

        controller.apply(resolution);
        assert!(!controller.state().is_busy());
        assert_eq!(controller.state().len(), 1);
        assert_eq!(controller.notifier().errors().count(), 1);
    }
}
