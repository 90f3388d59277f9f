use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommsError>;

#[derive(Debug, Error)]
pub enum CommsError {
    #[error("file server connection parameters not published within {0:?}")]
    NotReady(Duration),
}
