use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BridgeError;

/// Completion callback for a bridge call. The call itself returns before
/// the completion fires; only the completion carries the true result.
pub type Completion = Box<dyn FnOnce(std::result::Result<Value, BridgeError>) + Send + 'static>;

/// Structured form of a viewer command: tagged name plus a serialized
/// argument record. This is the primary wire shape; transports that can
/// only evaluate script render it into a call expression instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEnvelope {
    pub command: String,
    pub args: Vec<Value>,
}

impl CommandEnvelope {
    pub fn new(command: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

/// A one-way door to the embedded viewer surface. Implementations deliver
/// the envelope and eventually invoke the completion exactly once.
pub trait BridgeTransport: Send + Sync {
    fn send(&self, envelope: &CommandEnvelope, completion: Completion);
}
