use serde::{Deserialize, Serialize};

/// Address the viewer uses to reach the local file server.
pub const DEFAULT_HOST: &str = "localhost";

/// Route the file server answers file requests on.
pub const FILE_ROUTE: &str = "file";

/// Query key carrying the requested file path.
pub const FILENAME_QUERY_KEY: &str = "filename";

/// Connection parameters negotiated at startup. Published exactly once per
/// host lifetime, after the file-server subprocess announces its port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommsInfo {
    pub host: String,
    pub file_server_port: u16,
    pub route: String,
    pub query_key: String,
}

impl CommsInfo {
    /// Parameters for a file server listening on `port` at the local host.
    pub fn local(port: u16) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            file_server_port: port,
            route: FILE_ROUTE.to_string(),
            query_key: FILENAME_QUERY_KEY.to_string(),
        }
    }

    /// Derives the URL the viewer fetches a local file through.
    ///
    /// The path is embedded verbatim; the HTTP client is responsible for any
    /// percent-encoding it needs on the wire.
    pub fn file_url(&self, path: &str) -> String {
        format!(
            "http://{}:{}/{}?{}={}",
            self.host, self.file_server_port, self.route, self.query_key, path
        )
    }
}
