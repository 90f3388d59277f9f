use thiserror::Error;

use crate::channel::ChannelError;
use crate::comms::CommsError;
use crate::drawing::DrawingError;
use crate::server::ServerError;

pub type Result<T> = std::result::Result<T, HostError>;

/// Top-level host failure, aggregating the subsystem errors.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("comms failure: {0}")]
    Comms(#[from] CommsError),

    #[error("file server failure: {0}")]
    Server(#[from] ServerError),

    #[error("command channel failure: {0}")]
    Channel(#[from] ChannelError),

    #[error("drawing failure: {0}")]
    Drawing(#[from] DrawingError),
}
