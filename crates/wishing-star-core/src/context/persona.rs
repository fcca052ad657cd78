use crate::constants::persona;
use crate::llm::Message;

/// The character the assistant plays: the name users address it by and the
/// system prompt that opens every ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    name: String,
    system_prompt: String,
    prefix: String,
}

impl Persona {
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        let name = name.into();
        let prefix = format!("{name}, ");
        Self {
            name,
            system_prompt: system_prompt.into(),
            prefix,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// The literal every stored user turn starts with, e.g. `"Jirachi, "`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn system_turn(&self) -> Message {
        Message::system(&self.system_prompt)
    }

    /// Address the message to the persona unless it already is.
    pub fn address(&self, message: &str) -> String {
        if message.starts_with(&self.prefix) {
            message.to_string()
        } else {
            format!("{}{}", self.prefix, message)
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new(persona::NAME, persona::SYSTEM_PROMPT)
    }
}
