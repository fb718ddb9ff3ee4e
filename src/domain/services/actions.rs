#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendError;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::NO_RESPONSE_FALLBACK;
use crate::infrastructure::secrets::GEMINI_API_KEY;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /context (/ctx) - Toggles whether the processed table preview is attached to your next question.
- /clear (/reset) - Clears the conversation and starts fresh.
- /quit /exit (/q) - Exit FinTalk.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

fn failure_message(err: &BackendError) -> Message {
    let text = match err {
        BackendError::Config(detail) => {
            format!("Configuration error: {detail}. Add the `{GEMINI_API_KEY}` secret to your environment and restart.")
        }
        BackendError::Api(detail) => format!("The Gemini API call failed: {detail}"),
        BackendError::Other(detail) => {
            format!("An unexpected error occurred while calling the model: {detail}")
        }
    };

    return Message::new_with_type(Author::Assistant, MessageType::Error, &text);
}

async fn process_action(
    backend: &BackendBox,
    action: Action,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match action {
        Action::BackendRequest(prompt) => match backend.generate(prompt).await {
            Ok(text) => {
                let mut text = text.trim().to_string();
                if text.is_empty() {
                    text = NO_RESPONSE_FALLBACK.to_string();
                }

                tx.send(Event::BackendMessage(Message::new(
                    Author::Assistant,
                    &text,
                )))?;
            }
            Err(err) => {
                tracing::error!(error = %err, "backend request failed");
                tx.send(Event::BackendMessage(failure_message(&err)))?;
            }
        },
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Drains the action channel one request at a time. There is never more
    /// than one in-flight backend call; the UI blocks until the matching
    /// event arrives.
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = rx.recv().await;
            if action.is_none() {
                return Ok(());
            }

            process_action(&backend, action.unwrap(), &tx).await?;
        }
    }
}
