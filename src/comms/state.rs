use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use super::{CommsError, CommsInfo, Result};

/// Shared connection-parameter state, written once by the process supervisor
/// and read by any number of broker calls. Constructed explicitly and passed
/// by reference; there is no ambient global equivalent.
#[derive(Debug, Clone, Default)]
pub struct CommsState {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    info: Mutex<Option<CommsInfo>>,
    ready: Condvar,
}

impl CommsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the negotiated parameters. First write wins: once the port
    /// is known it does not change for the remainder of the host lifetime,
    /// so a second publish is logged and dropped.
    pub fn publish(&self, info: CommsInfo) {
        let mut slot = self.inner.info.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = slot.as_ref() {
            tracing::warn!(
                existing = existing.file_server_port,
                ignored = info.file_server_port,
                "comms info already published, ignoring"
            );
            return;
        }
        *slot = Some(info);
        self.inner.ready.notify_all();
    }

    /// Non-blocking read of the published parameters.
    pub fn get(&self) -> Option<CommsInfo> {
        self.inner
            .info
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Blocks until the parameters are published. Callers racing the port
    /// announcement get a bounded wait and an explicit not-ready error
    /// instead of an invalid port.
    pub fn wait(&self, timeout: Duration) -> Result<CommsInfo> {
        let slot = self.inner.info.lock().unwrap_or_else(|e| e.into_inner());
        let (slot, _) = self
            .inner
            .ready
            .wait_timeout_while(slot, timeout, |info| info.is_none())
            .unwrap_or_else(|e| e.into_inner());
        match slot.clone() {
            Some(info) => Ok(info),
            None => Err(CommsError::NotReady(timeout)),
        }
    }
}
