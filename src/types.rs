use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

/// The outbound payload for one completion call.
///
/// Constructed once per request by the composer and sent exactly once by the
/// gateway. The message list always holds a `system` message followed by a
/// `user` message; the composer refuses to emit anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// The extracted text of a successful completion, returned verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub text: String,
}
