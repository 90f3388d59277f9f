use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("script evaluation failed: {0}")]
    Evaluation(String),

    #[error("argument serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}
