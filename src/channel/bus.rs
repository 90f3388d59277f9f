use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use serde_json::Value;

use super::{ChannelError, Command, Result};

type CommandHandler = Arc<dyn Fn(&Value) + Send + Sync + 'static>;
type OperationResponder = Box<dyn Fn(&Value) -> Result<Value> + Send + Sync + 'static>;

enum Delivery {
    Command { name: String, payload: Value },
    Flush(Sender<()>),
}

/// Bidirectional named-event bus between the host and the viewer surface.
///
/// Host-initiated commands go through `dispatch` and are delivered in FIFO
/// order on a single worker thread. Viewer-initiated request/response
/// operations go through `invoke` and are resolved synchronously against
/// host-registered responders; the two paths never mix.
pub struct CommandChannel {
    handlers: Arc<Mutex<HashMap<String, CommandHandler>>>,
    responders: Mutex<HashMap<String, OperationResponder>>,
    queue: Option<Sender<Delivery>>,
    worker: Option<JoinHandle<()>>,
}

impl CommandChannel {
    pub fn new() -> Self {
        let handlers: Arc<Mutex<HashMap<String, CommandHandler>>> =
            Arc::new(Mutex::new(HashMap::new()));
        let (queue, deliveries) = mpsc::channel::<Delivery>();

        let delivery_handlers = Arc::clone(&handlers);
        let worker = thread::spawn(move || {
            while let Ok(delivery) = deliveries.recv() {
                match delivery {
                    Delivery::Command { name, payload } => {
                        // The lock is released before the handler runs, so
                        // handlers may themselves register handlers.
                        let handler = {
                            let handlers = delivery_handlers
                                .lock()
                                .unwrap_or_else(|e| e.into_inner());
                            handlers.get(&name).cloned()
                        };
                        match handler {
                            Some(handler) => handler(&payload),
                            None => {
                                tracing::debug!(command = %name, "no handler registered, dropping");
                            }
                        }
                    }
                    Delivery::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self {
            handlers,
            responders: Mutex::new(HashMap::new()),
            queue: Some(queue),
            worker: Some(worker),
        }
    }

    /// Registers `handler` as the sole receiver for `name`. A second
    /// registration for the same name replaces the first without error:
    /// last write wins, there is no handler queue.
    pub fn on_command(
        &self,
        name: impl Into<String>,
        handler: impl Fn(&Value) + Send + Sync + 'static,
    ) {
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        handlers.insert(name.into(), Arc::new(handler));
    }

    /// Queues a command for asynchronous delivery to the currently
    /// registered handler. Commands from one source arrive in dispatch
    /// order; a command with no handler is dropped silently.
    pub fn dispatch(&self, command: &Command) -> Result<()> {
        let queue = self.queue.as_ref().ok_or(ChannelError::Closed)?;
        queue
            .send(Delivery::Command {
                name: command.name().to_string(),
                payload: command.payload(),
            })
            .map_err(|_| ChannelError::Closed)
    }

    /// Registers the host-side responder for a viewer-initiated operation.
    pub fn respond_to(
        &self,
        operation: impl Into<String>,
        responder: impl Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    ) {
        let mut responders = self.responders.lock().unwrap_or_else(|e| e.into_inner());
        responders.insert(operation.into(), Box::new(responder));
    }

    /// Viewer-initiated request/response: resolves against the registered
    /// responder and returns its single result. Not routed through the
    /// dispatch queue.
    pub fn invoke(&self, operation: &str, args: &Value) -> Result<Value> {
        let responders = self.responders.lock().unwrap_or_else(|e| e.into_inner());
        let responder = responders
            .get(operation)
            .ok_or_else(|| ChannelError::UnknownOperation(operation.to_string()))?;
        responder(args)
    }

    /// Blocks until every command queued so far has been delivered.
    pub fn flush(&self) -> Result<()> {
        let queue = self.queue.as_ref().ok_or(ChannelError::Closed)?;
        let (ack, acked) = mpsc::channel();
        queue
            .send(Delivery::Flush(ack))
            .map_err(|_| ChannelError::Closed)?;
        acked.recv().map_err(|_| ChannelError::Closed)
    }
}

impl Default for CommandChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CommandChannel {
    fn drop(&mut self) {
        drop(self.queue.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
