use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::failure_message;
use super::process_action;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendError;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::NO_RESPONSE_FALLBACK;

struct StubBackend {
    response: Result<String, BackendError>,
}

#[async_trait]
impl Backend for StubBackend {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn generate(&self, _prompt: BackendPrompt) -> Result<String, BackendError> {
        return self.response.clone();
    }
}

fn to_message(event: Option<Event>) -> Message {
    match event.unwrap() {
        Event::BackendMessage(msg) => return msg,
    }
}

async fn run(response: Result<String, BackendError>) -> Result<Message> {
    let backend: BackendBox = Box::new(StubBackend { response });
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let prompt = BackendPrompt::new("How did cash evolve?".to_string());

    process_action(&backend, Action::BackendRequest(prompt), &tx).await?;

    return Ok(to_message(rx.recv().await));
}

#[tokio::test]
async fn it_forwards_generated_text() -> Result<()> {
    let msg = run(Ok("Cash grew by 50%.".to_string())).await?;

    assert_eq!(msg.author, Author::Assistant);
    assert_eq!(msg.text, "Cash grew by 50%.");
    assert_eq!(msg.message_type(), MessageType::Normal);

    return Ok(());
}

#[tokio::test]
async fn it_substitutes_the_fallback_for_empty_text() -> Result<()> {
    let msg = run(Ok("  \n".to_string())).await?;

    assert_eq!(msg.text, NO_RESPONSE_FALLBACK);
    assert_eq!(msg.message_type(), MessageType::Normal);

    return Ok(());
}

#[tokio::test]
async fn it_maps_config_errors_to_transcript_messages() -> Result<()> {
    let msg = run(Err(BackendError::Config(
        "the 'GEMINI_API_KEY' secret is not set".to_string(),
    )))
    .await?;

    assert_eq!(msg.author, Author::Assistant);
    assert_eq!(msg.message_type(), MessageType::Error);
    assert!(msg.text.contains("Configuration error"));
    assert!(msg.text.contains("GEMINI_API_KEY"));

    return Ok(());
}

#[tokio::test]
async fn it_maps_api_errors_to_transcript_messages() -> Result<()> {
    let msg = run(Err(BackendError::Api("quota exceeded".to_string()))).await?;

    assert_eq!(msg.message_type(), MessageType::Error);
    assert!(msg.text.contains("quota exceeded"));

    return Ok(());
}

#[tokio::test]
async fn it_maps_unclassified_errors_to_transcript_messages() -> Result<()> {
    let msg = run(Err(BackendError::Other("connection reset".to_string()))).await?;

    assert_eq!(msg.message_type(), MessageType::Error);
    assert!(msg.text.contains("connection reset"));

    return Ok(());
}

#[test]
fn it_references_the_secret_in_config_failures() {
    let msg = failure_message(&BackendError::Config("missing key".to_string()));

    assert!(msg.text.contains(super::GEMINI_API_KEY));
}
