use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

use super::{Result, ServerError, SubprocessMessage};
use crate::comms::{CommsInfo, CommsState};

/// Spawn command for the file-serving subprocess: this executable in
/// `file-server` mode.
pub fn file_server_command() -> Result<Command> {
    let exe = std::env::current_exe().map_err(ServerError::Launch)?;
    let mut command = Command::new(exe);
    command.arg("file-server");
    Ok(command)
}

/// Owns the file-server subprocess for the lifetime of the host. Launch
/// failure is fatal to the caller; a crash after startup is only logged,
/// there is no restart path.
pub struct Supervisor {
    child: Child,
    reader: Option<JoinHandle<()>>,
}

impl Supervisor {
    /// Launches the subprocess and returns immediately; readiness is not
    /// awaited. A background thread consumes the child's stdout and
    /// publishes the port announcement into `comms` when it arrives.
    pub fn start(mut command: Command, comms: &CommsState) -> Result<Self> {
        command.stdout(Stdio::piped());
        let mut child = command.spawn().map_err(ServerError::Launch)?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ServerError::Launch(std::io::Error::other("stdout not captured")))?;

        let comms = comms.clone();
        let reader = thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                let message: SubprocessMessage = match serde_json::from_str(line.trim()) {
                    Ok(message) => message,
                    Err(error) => {
                        tracing::debug!(%error, "unparseable subprocess line");
                        continue;
                    }
                };
                match message.port() {
                    Some(port) => comms.publish(CommsInfo::local(port)),
                    // Extension point: other tags are ignored.
                    None => tracing::debug!(tag = %message.kind, "ignoring subprocess message"),
                }
            }
            tracing::error!("file server subprocess stdout closed");
        });

        Ok(Self {
            child,
            reader: Some(reader),
        })
    }

    /// Terminates the subprocess, best effort. Must be called on host
    /// exit; also runs on drop.
    pub fn shutdown(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
