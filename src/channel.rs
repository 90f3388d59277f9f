mod bus;
mod command;
mod error;

#[cfg(test)]
mod tests;

pub use bus::CommandChannel;
pub use command::{ColormapSelection, Command, DragMode, ViewMode};
pub use error::{ChannelError, Result};
