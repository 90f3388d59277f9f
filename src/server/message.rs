use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Message tag announcing the file server's listening port.
pub const FILE_SERVER_PORT: &str = "fileServerPort";

/// One line of the subprocess-to-supervisor protocol. Only the port
/// announcement is consumed today; unknown tags are ignored so the
/// protocol can grow without breaking older hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubprocessMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}

impl SubprocessMessage {
    pub fn file_server_port(port: u16) -> Self {
        Self {
            kind: FILE_SERVER_PORT.to_string(),
            value: json!(port),
        }
    }

    /// The announced port, if this is a port announcement.
    pub fn port(&self) -> Option<u16> {
        if self.kind != FILE_SERVER_PORT {
            return None;
        }
        self.value.as_u64().and_then(|port| u16::try_from(port).ok())
    }
}
