mod error;
mod file_server;
mod message;
mod supervisor;


pub use error::{Result, ServerError};
pub use file_server::serve;
pub use message::{FILE_SERVER_PORT, SubprocessMessage};
pub use supervisor::{Supervisor, file_server_command};
