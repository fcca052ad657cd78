use crate::error::{Result, StarError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged conversation turn. Fields are private so a turn cannot be
/// edited once it sits in a ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Body of a chat-completions call: model, full context, sampling temperature.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletion {
    /// Build a completion holding a single choice, mostly useful for stubs.
    pub fn single(content: Option<&str>, usage: Option<Usage>) -> Self {
        Self {
            choices: vec![Choice {
                message: ChoiceMessage {
                    content: content.map(str::to_string),
                },
            }],
            usage,
        }
    }

    /// Validate the response shape and pull out the first reply and its usage.
    ///
    /// Missing choices or usage are `MalformedResponse`; a first choice with no
    /// text (absent or empty) is `EmptyResponse`.
    pub fn into_reply(self) -> Result<(String, Usage)> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| StarError::malformed("response contains no choices"))?;

        let reply = match choice.message.content {
            Some(text) if !text.is_empty() => text,
            _ => return Err(StarError::EmptyResponse),
        };

        let usage = self
            .usage
            .ok_or_else(|| StarError::malformed("response is missing usage counters"))?;

        Ok((reply, usage))
    }
}

/// The external completion service. One synchronous request/response per call,
/// no retries, errors surfaced as-is.
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &ChatRequest<'_>) -> Result<ChatCompletion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_value(Message::assistant("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "hello"}));
    }

    #[test]
    fn test_into_reply_happy_path() {
        let usage = Usage {
            prompt_tokens: 12,
            completion_tokens: 7,
        };
        let (reply, got) = ChatCompletion::single(Some("Hi!"), Some(usage))
            .into_reply()
            .unwrap();
        assert_eq!(reply, "Hi!");
        assert_eq!(got, usage);
    }

    #[test]
    fn test_into_reply_missing_or_empty_content() {
        let usage = Some(Usage::default());
        assert!(matches!(
            ChatCompletion::single(None, usage).into_reply(),
            Err(StarError::EmptyResponse)
        ));
        assert!(matches!(
            ChatCompletion::single(Some(""), usage).into_reply(),
            Err(StarError::EmptyResponse)
        ));
    }

    #[test]
    fn test_into_reply_shape_violations() {
        assert!(matches!(
            ChatCompletion::default().into_reply(),
            Err(StarError::MalformedResponse(_))
        ));
        assert!(matches!(
            ChatCompletion::single(Some("text"), None).into_reply(),
            Err(StarError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_completion_parses_null_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":null}}],
                      "usage":{"prompt_tokens":3,"completion_tokens":0,"total_tokens":3}}"#;
        let completion: ChatCompletion = serde_json::from_str(raw).unwrap();
        assert!(completion.choices[0].message.content.is_none());
        assert_eq!(completion.usage.unwrap().prompt_tokens, 3);
    }
}
