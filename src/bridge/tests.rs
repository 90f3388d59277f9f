use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use super::{
    BridgeError, CommandEnvelope, Completion, NativeBridge, ScriptEvaluator, ScriptTransport,
    render_call,
};

/// Records evaluated scripts and answers each with a canned result.
#[derive(Clone, Default)]
struct RecordingEvaluator {
    scripts: Arc<Mutex<Vec<String>>>,
    answer: Arc<Mutex<Option<Result<Value, String>>>>,
}

impl RecordingEvaluator {
    fn answer_with(&self, result: Result<Value, String>) {
        *self.answer.lock().unwrap() = Some(result);
    }

    fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }
}

impl ScriptEvaluator for RecordingEvaluator {
    fn evaluate(&self, script: &str, completion: Completion) {
        self.scripts.lock().unwrap().push(script.to_string());
        let answer = self
            .answer
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(Value::Null));
        completion(answer.map_err(BridgeError::Evaluation));
    }
}

#[test]
fn render_call_embeds_arguments_as_literals() {
    let envelope = CommandEnvelope::new(
        "setPenValue",
        vec![json!(2), json!(true), json!(false)],
    );
    assert_eq!(
        render_call(&envelope).expect("render"),
        "setPenValue(2, true, false)"
    );
}

#[test]
fn render_call_escapes_string_arguments() {
    let envelope = CommandEnvelope::new(
        "loadBase64Image",
        vec![json!("AAA=\"); doEvil(\"")],
    );
    let script = render_call(&envelope).expect("render");
    // The quote and backslash stay inside one string literal.
    assert_eq!(script, r#"loadBase64Image("AAA=\"); doEvil(\"")"#);
}

#[test]
fn envelope_round_trips_through_json() {
    let envelope = CommandEnvelope::new("setLayout", vec![json!(2)]);
    let encoded = serde_json::to_string(&envelope).expect("encode");
    assert_eq!(encoded, r#"{"command":"setLayout","args":[2]}"#);
    let decoded: CommandEnvelope = serde_json::from_str(&encoded).expect("decode");
    assert_eq!(decoded, envelope);
}

#[test]
fn facade_issues_catalog_calls_over_script_transport() {
    let evaluator = RecordingEvaluator::default();
    let bridge = NativeBridge::new(ScriptTransport::new(evaluator.clone()));

    bridge.set_slice_type(3);
    bridge.set_3d_crosshair_visible(true);
    bridge.set_pen_value(1, false, true);
    bridge.move_crosshair_in_vox(1, 2, 3);

    assert_eq!(
        evaluator.scripts(),
        vec![
            "setSliceType(3)",
            "set3dCrosshairVisible(true)",
            "setPenValue(1, false, true)",
            "moveCrosshairInVox(1, 2, 3)",
        ]
    );
}

#[test]
fn evaluation_failure_is_logged_not_raised() {
    let evaluator = RecordingEvaluator::default();
    evaluator.answer_with(Err("no such function".to_string()));
    let bridge = NativeBridge::new(ScriptTransport::new(evaluator.clone()));

    // Must not panic or surface anything to the caller.
    bridge.set_corner_text(true);
    assert_eq!(evaluator.scripts(), vec!["setCornerText(true)"]);
}

#[test]
fn save_drawing_result_arrives_only_via_completion() {
    let evaluator = RecordingEvaluator::default();
    evaluator.answer_with(Ok(json!("AAA=")));
    let bridge = NativeBridge::new(ScriptTransport::new(evaluator));

    let (tx, rx) = std::sync::mpsc::channel();
    bridge.save_drawing(Box::new(move |result| {
        let _ = tx.send(result);
    }));
    let result = rx.recv().expect("completion fired").expect("result ok");
    assert_eq!(result, json!("AAA="));
}
