mod envelope;
mod error;
mod facade;
mod script;

#[cfg(test)]
mod tests;

pub use envelope::{BridgeTransport, CommandEnvelope, Completion};
pub use error::{BridgeError, Result};
pub use facade::NativeBridge;
pub use script::{ScriptEvaluator, ScriptTransport, render_call};
