mod actions;
mod context;
mod error;


pub use context::HostContext;
pub use error::{HostError, Result};
