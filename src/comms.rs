mod error;
mod info;
mod state;

#[cfg(test)]
mod tests;

pub use error::{CommsError, Result};
pub use info::{CommsInfo, DEFAULT_HOST, FILENAME_QUERY_KEY, FILE_ROUTE};
pub use state::CommsState;
