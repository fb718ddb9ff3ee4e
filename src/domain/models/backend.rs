#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::Display;
use strum::EnumString;
use strum::EnumVariantNames;
use thiserror::Error;

use super::FinancialTable;
use super::PREVIEW_MAX_ROWS;

/// Literal shown in place of an empty or missing model response.
pub const NO_RESPONSE_FALLBACK: &str = "No response received from the model.";

pub const SYSTEM_INSTRUCTIONS: &str = "You are an expert in corporate financial analysis. Keep answers short, clear, and structured. When the user asks about figures, reference columns such as 'Prior year', 'Current year', and 'Growth (%)' when the context includes them.";

pub const CONTEXT_NO_DATA_NOTE: &str =
    "### Data context: no processed table is available in this session.";
pub const CONTEXT_UNAVAILABLE_NOTE: &str =
    "### Data context: the processed table could not be read.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumVariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Gemini,
}

/// Classified backend failures. Every kind carries a human-readable detail
/// string and maps to a transcript message rather than propagating.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BackendError {
    /// A required piece of configuration is missing, such as the API key.
    #[error("{0}")]
    Config(String),
    /// The remote service reported an error for the request.
    #[error("{0}")]
    Api(String),
    /// Anything else that went wrong while talking to the service.
    #[error("{0}")]
    Other(String),
}

pub struct BackendPrompt {
    pub text: String,
}

impl BackendPrompt {
    pub fn new(text: String) -> BackendPrompt {
        return BackendPrompt { text };
    }

    /// Builds the full prompt for one turn from the static instruction block,
    /// the user's raw text, and an optional markdown preview of the processed
    /// table. The prompt is rebuilt from scratch on every request.
    pub fn compose(
        user_text: &str,
        attach_context: bool,
        table: Option<&FinancialTable>,
    ) -> BackendPrompt {
        let mut text = format!("{SYSTEM_INSTRUCTIONS}\n\n## User question:\n{user_text}");

        if attach_context {
            text += &format!("\n\n{}", context_block(table));
        }

        return BackendPrompt { text };
    }
}

fn context_block(table: Option<&FinancialTable>) -> String {
    let rendered = match table {
        Some(table) if !table.is_empty() => table.to_markdown(PREVIEW_MAX_ROWS),
        _ => return CONTEXT_NO_DATA_NOTE.to_string(),
    };

    // A table that fails to render must never block the chat turn.
    match rendered {
        Ok(markdown) => {
            return format!(
                "### Data context (truncated excerpt):\n{markdown}\n\nNote: the table above is an excerpt of the data processed in this session. Refer to it when answering."
            );
        }
        Err(err) => {
            tracing::warn!(error = ?err, "failed to render the table context");
            return CONTEXT_UNAVAILABLE_NOTE.to_string();
        }
    }
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify the backend is reachable before chatting.
    async fn health_check(&self) -> Result<()>;

    /// Sends a single composed prompt and returns the generated text in one
    /// shot. Failures are classified so the caller can map each kind to a
    /// transcript message.
    async fn generate(&self, prompt: BackendPrompt) -> Result<String, BackendError>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
