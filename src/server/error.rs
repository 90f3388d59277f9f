use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to launch file server subprocess: {0}")]
    Launch(#[source] std::io::Error),

    #[error("failed to bind file server listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("file server I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("file server HTTP failure: {0}")]
    Http(String),
}
