#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendError;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::infrastructure::secrets::Secrets;
use crate::infrastructure::secrets::GEMINI_API_KEY;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    contents: Vec<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: ApiErrorDetail,
}

pub struct Gemini {
    url: String,
    model: String,
    token: String,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            model: Config::get(ConfigKey::Model),
            token: Secrets::get(GEMINI_API_KEY).unwrap_or_default(),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Backend for Gemini {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!(format!("The '{GEMINI_API_KEY}' secret is not set"));
        }

        let url = format!(
            "{url}/v1beta/models/{model}?key={key}",
            url = self.url,
            model = self.model,
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Gemini is not reachable");
            bail!("Gemini is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    async fn generate(&self, prompt: BackendPrompt) -> Result<String, BackendError> {
        if self.token.is_empty() {
            return Err(BackendError::Config(format!(
                "the '{GEMINI_API_KEY}' secret is not set"
            )));
        }

        let req = CompletionRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![ContentPart { text: prompt.text }],
            }],
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent?key={key}",
                url = self.url,
                model = self.model,
                key = self.token,
            ))
            .json(&req)
            .send()
            .await
            .map_err(|err| {
                return BackendError::Other(err.to_string());
            })?;

        let status = res.status().as_u16();
        if status >= 400 {
            let detail = match res.json::<ApiErrorResponse>().await {
                Ok(body) if !body.error.message.is_empty() => body.error.message,
                _ => format!("request failed with status {status}"),
            };

            tracing::error!(
                status = status,
                detail = detail.as_str(),
                "Gemini completion request failed"
            );
            return Err(BackendError::Api(detail));
        }

        let body = res
            .json::<GenerateContentResponse>()
            .await
            .map_err(|err| {
                return BackendError::Other(err.to_string());
            })?;

        let text = body
            .candidates
            .iter()
            .flat_map(|candidate| {
                return candidate.content.parts.iter();
            })
            .map(|part| {
                return part.text.as_str();
            })
            .collect::<Vec<&str>>()
            .join("");

        return Ok(text);
    }
}
