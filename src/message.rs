use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One turn of a chat transcript. `content` should be non-empty for a
/// well-formed request; the backend rejects empty turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// What callers may hand to the chat entry points: bare text, a single
/// message, or a full transcript. Everything normalizes to a message list
/// before the request goes out.
#[derive(Debug, Clone)]
pub enum ChatInput {
    Text(String),
    Message(ChatMessage),
    Messages(Vec<ChatMessage>),
}

impl ChatInput {
    /// Bare text becomes a single user message.
    pub fn into_messages(self) -> Vec<ChatMessage> {
        match self {
            Self::Text(content) => vec![ChatMessage::user(content)],
            Self::Message(message) => vec![message],
            Self::Messages(messages) => messages,
        }
    }
}

impl From<&str> for ChatInput {
    fn from(content: &str) -> Self {
        Self::Text(content.to_string())
    }
}

impl From<String> for ChatInput {
    fn from(content: String) -> Self {
        Self::Text(content)
    }
}

impl From<ChatMessage> for ChatInput {
    fn from(message: ChatMessage) -> Self {
        Self::Message(message)
    }
}

impl From<Vec<ChatMessage>> for ChatInput {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self::Messages(messages)
    }
}

/// Outbound body shared by the chat and streamed-chat endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub enable_web_search: bool,
}

impl ChatRequest {
    pub fn new(input: impl Into<ChatInput>) -> Self {
        Self {
            messages: input.into().into_messages(),
            enable_web_search: false,
        }
    }

    pub fn with_web_search(mut self, enable: bool) -> Self {
        self.enable_web_search = enable;
        self
    }
}
