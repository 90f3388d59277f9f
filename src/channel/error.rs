use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChannelError>;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("no responder registered for operation: {0}")]
    UnknownOperation(String),

    #[error("operation responder failed: {0}")]
    Responder(String),

    #[error("command queue closed")]
    Closed,

    #[error("command payload serialization failure: {0}")]
    Payload(#[from] serde_json::Error),
}
