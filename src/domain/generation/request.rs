//! Generation request - one fully assembled call to the text backend.

use serde::{Deserialize, Serialize};

/// A single generation attempt for one tool.
///
/// Built by [`super::build_request`] and consumed by an `AIProvider`; never
/// reused across tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    /// Tool that produced the instructions
    pub tool_name: String,
    /// Persona, rules, tool instructions and output schema, in that order
    pub system_instructions: String,
    /// Confidential preface followed by the user's text verbatim
    pub user_content: String,
    /// Sampling temperature, always within [0, 1]
    pub temperature: f32,
    /// Backend model identifier
    pub model_id: String,
}

impl GenerationRequest {
    /// The role-tagged message list sent to the backend: system, then user.
    pub fn messages(&self) -> [Message; 2] {
        [
            Message::system(self.system_instructions.clone()),
            Message::user(self.user_content.clone()),
        ]
    }
}

/// A message in the backend conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message.
    pub role: MessageRole,
    /// Message content.
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions (guides model behavior).
    System,
    /// User input.
    User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_system_then_user() {
        let request = GenerationRequest {
            tool_name: "T".to_string(),
            system_instructions: "rules".to_string(),
            user_content: "brief".to_string(),
            temperature: 0.2,
            model_id: "m".to_string(),
        };

        let [system, user] = request.messages();
        assert_eq!(system, Message::system("rules"));
        assert_eq!(user, Message::user("brief"));
    }

    #[test]
    fn message_role_serializes_lowercase() {
        let json = serde_json::to_string(&MessageRole::User).unwrap();
        assert_eq!(json, "\"user\"");

        let json = serde_json::to_string(&MessageRole::System).unwrap();
        assert_eq!(json, "\"system\"");
    }
}
