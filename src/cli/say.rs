//! TUI-less "say" command

use std::error::Error;
use std::sync::Arc;

use crate::core::client::{CompletionClient, GeminiClient};
use crate::core::config::Settings;
use crate::core::controller::TurnController;
use crate::core::notification::{Notification, RecordingNotifier};

pub async fn run_say(prompt: Vec<String>, settings: Settings) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: gemchat say <prompt>");
        std::process::exit(1);
    }

    let client = Arc::new(GeminiClient::new(
        settings.base_url,
        settings.model,
        settings.api_key,
    ));

    match say_once(client, &prompt).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(notification) => {
            eprintln!("❌ {}: {}", notification.title, notification.description);
            std::process::exit(1);
        }
    }
}

/// Run one turn and return the reply, or the error notification it raised.
pub async fn say_once(
    client: Arc<dyn CompletionClient>,
    prompt: &str,
) -> Result<String, Notification> {
    let mut controller = TurnController::new(client, RecordingNotifier::default());
    controller.submit(prompt).await;

    if let Some(error) = controller.notifier().errors().next() {
        return Err(error.clone());
    }

    Ok(controller
        .state()
        .last_assistant_turn()
        .map(|turn| turn.text().to_string())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::ApiError;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    struct StatusClient(Option<StatusCode>);

    #[async_trait]
    impl CompletionClient for StatusClient {
        async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
            match self.0 {
                None => Ok(prompt.to_uppercase()),
                Some(status) => Err(ApiError::Status {
                    status,
                    message: "quota exceeded".into(),
                }),
            }
        }

        fn model(&self) -> &str {
            "status"
        }
    }

    #[tokio::test]
    async fn say_once_returns_reply() {
        let reply = say_once(Arc::new(StatusClient(None)), "hello").await;
        assert_eq!(reply, Ok("HELLO".to_string()));
    }

    #[tokio::test]
    async fn say_once_returns_error_notification() {
        let err = say_once(
            Arc::new(StatusClient(Some(StatusCode::TOO_MANY_REQUESTS))),
            "hello",
        )
        .await
        .expect_err("should fail");
        assert_eq!(err.title, "Error");
        assert_eq!(
            err.description,
            "Request failed with status code 429: quota exceeded"
        );
    }
}
