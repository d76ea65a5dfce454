use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remote text-completion boundary. The terminal only ever sees this trait,
/// which keeps the chat path testable without a network.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    async fn complete(&self, message: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected our credentials. Never retried.
    #[error("Authentication failed")]
    Auth { details: Option<String> },
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    /// Provider-reported failure that isn't auth or rate limiting.
    #[error("{message}")]
    Api {
        message: String,
        details: Option<String>,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ProviderError {
    /// HTTP-style status for each failure class.
    pub fn http_status(&self) -> u16 {
        match self {
            ProviderError::Auth { .. } => 401,
            ProviderError::RateLimited => 429,
            ProviderError::Api { .. } => 500,
            ProviderError::Transport(_) => 502,
        }
    }

    /// Provider-supplied detail text, when there is any.
    pub fn details(&self) -> Option<&str> {
        match self {
            ProviderError::Auth { details } | ProviderError::Api { details, .. } => {
                details.as_deref()
            }
            _ => None,
        }
    }
}

/// System prompt pinned to every chat round-trip.
const SYSTEM_PROMPT: &str = "You are a helpful AI assistant embedded in Quinn's portfolio website, displayed in a terminal-style interface. You can:
- Answer questions about Quinn's background, projects, and skills
- Help visitors navigate the portfolio
- Discuss technology, coding, and software development
- Provide general knowledge and factual information
- Engage in natural conversation while maintaining a tech-savvy tone

Be direct about your capabilities:
- For real-time data (weather, stocks, current events), provide general information but note it may not be up-to-the-minute
- For specific local queries (weather, local events), suggest checking dedicated services
- Answer general knowledge questions to the best of your ability
- Focus on being helpful while maintaining accuracy

Format your responses in a terminal-friendly way:
- Use markdown for code or technical terms with backticks
- Keep formatting clean and monospace-friendly
- Use emoji sparingly but effectively
- Break up long responses into readable chunks

You're knowledgeable about software development, AI, technology, and general topics. When discussing these subjects, provide detailed, accurate information while maintaining the terminal aesthetic.";

const KEY_FORMAT_HINT: &str =
    "Please provide a valid OpenAI API key (should start with \"sk-\" or \"sk-proj-\")";

/// One-shot chat against an OpenAI-style `/chat/completions` endpoint.
pub struct OpenAiChat {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

impl OpenAiChat {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiChat {
    async fn complete(&self, message: &str) -> Result<String, ProviderError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
            temperature: 0.7,
            max_tokens: 500,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::Auth {
                details: Some(KEY_FORMAT_HINT.to_string()),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            // Surface the provider's own message when the body carries one.
            let details = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|err| err.message);
            return Err(ProviderError::Api {
                message: "Failed to get AI response".to_string(),
                details,
            });
        }

        let body: CompletionResponse = response.json().await?;
        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| "No response generated".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let auth = ProviderError::Auth { details: None };
        assert_eq!(auth.http_status(), 401);
        assert_eq!(ProviderError::RateLimited.http_status(), 429);
        let api = ProviderError::Api {
            message: "boom".into(),
            details: None,
        };
        assert_eq!(api.http_status(), 500);
    }

    #[test]
    fn display_strings_match_wire_messages() {
        let auth = ProviderError::Auth {
            details: Some(KEY_FORMAT_HINT.into()),
        };
        assert_eq!(auth.to_string(), "Authentication failed");
        assert_eq!(
            ProviderError::RateLimited.to_string(),
            "Rate limit exceeded. Please try again later."
        );
        let api = ProviderError::Api {
            message: "Failed to get AI response".into(),
            details: Some("model overloaded".into()),
        };
        assert_eq!(api.to_string(), "Failed to get AI response");
        assert_eq!(api.details(), Some("model overloaded"));
    }

    #[test]
    fn request_body_shape() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "s",
                },
                ChatMessage {
                    role: "user",
                    content: "hello",
                },
            ],
            temperature: 0.7,
            max_tokens: 500,
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["max_tokens"], 500);
        assert_eq!(value["stream"], false);
    }

    #[test]
    fn response_body_parses_with_and_without_choices() {
        let full: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"hi"}}]}"#).unwrap();
        assert_eq!(
            full.choices.into_iter().next().unwrap().message.content,
            Some("hi".to_string())
        );

        let empty: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(empty.choices.is_empty());
    }

    #[test]
    fn error_body_detail_extraction() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":{"message":"model overloaded","type":"server_error"}}"#)
                .unwrap();
        assert_eq!(
            body.error.and_then(|e| e.message).as_deref(),
            Some("model overloaded")
        );
    }
}
