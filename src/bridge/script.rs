use super::{BridgeTransport, CommandEnvelope, Completion, Result};

/// Evaluates a script expression against the viewer page and reports the
/// outcome through the completion. Backed by whatever the embedding shell
/// provides (a web view's evaluate-JavaScript hook in production, a mock
/// in tests).
pub trait ScriptEvaluator: Send + Sync {
    fn evaluate(&self, script: &str, completion: Completion);
}

/// Fallback transport for viewers reachable only through script injection.
/// The envelope is rendered as a call to a global function of the same
/// name; structured transports should be preferred wherever available.
pub struct ScriptTransport<E> {
    evaluator: E,
}

impl<E: ScriptEvaluator> ScriptTransport<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl<E: ScriptEvaluator> BridgeTransport for ScriptTransport<E> {
    fn send(&self, envelope: &CommandEnvelope, completion: Completion) {
        match render_call(envelope) {
            Ok(script) => self.evaluator.evaluate(&script, completion),
            Err(error) => completion(Err(error)),
        }
    }
}

/// Renders the envelope as a script call expression. Every argument is
/// embedded as a JSON literal, which is also a valid script literal, so
/// strings arrive pre-escaped and binary payloads ride along as base64
/// strings. Nothing is concatenated unescaped.
pub fn render_call(envelope: &CommandEnvelope) -> Result<String> {
    let mut rendered = Vec::with_capacity(envelope.args.len());
    for arg in &envelope.args {
        rendered.push(serde_json::to_string(arg)?);
    }
    Ok(format!("{}({})", envelope.command, rendered.join(", ")))
}
