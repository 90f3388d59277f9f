use serde_json::{Value, json};

use super::{BridgeTransport, CommandEnvelope, Completion};

/// Typed facade over the viewer's global entry points. The command set is
/// closed: every operation the host may issue is a named method here, so
/// nothing is dispatched reflectively.
///
/// Calls are fire-and-forget from the caller's perspective; evaluation
/// failures are logged and never surfaced to the dispatching control flow.
/// Callers that need the true outcome (drawing save) must pass an explicit
/// completion and treat only that as the result.
pub struct NativeBridge<T> {
    transport: T,
}

impl<T: BridgeTransport> NativeBridge<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn call(&self, command: &str, args: Vec<Value>) {
        let name = command.to_string();
        self.call_with(
            command,
            args,
            Box::new(move |result| {
                if let Err(error) = result {
                    tracing::warn!(command = %name, %error, "viewer command failed");
                }
            }),
        );
    }

    fn call_with(&self, command: &str, args: Vec<Value>, completion: Completion) {
        let envelope = CommandEnvelope::new(command, args);
        self.transport.send(&envelope, completion);
    }

    /// Replaces the viewer's volume list with one image delivered inline.
    pub fn load_base64_image(&self, base64: &str) {
        self.call("loadBase64Image", vec![json!(base64)]);
    }

    /// Asks the viewer to export the current drawing. The completion value
    /// is the base64-encoded image; the immediate return carries nothing.
    pub fn save_drawing(&self, completion: Completion) {
        self.call_with("saveDrawing", Vec::new(), completion);
    }

    pub fn set_slice_type(&self, code: i32) {
        self.call("setSliceType", vec![json!(code)]);
    }

    pub fn set_layout(&self, code: i32) {
        self.call("setLayout", vec![json!(code)]);
    }

    pub fn set_3d_crosshair_visible(&self, visible: bool) {
        self.call("set3dCrosshairVisible", vec![json!(visible)]);
    }

    pub fn set_2d_crosshair_visible(&self, visible: bool) {
        self.call("set2dCrosshairVisible", vec![json!(visible)]);
    }

    pub fn set_drag_mode(&self, code: i32) {
        self.call("setDragMode", vec![json!(code)]);
    }

    pub fn set_pen_value(&self, value: i32, is_filled: bool, drawing_enabled: bool) {
        self.call(
            "setPenValue",
            vec![json!(value), json!(is_filled), json!(drawing_enabled)],
        );
    }

    pub fn set_corner_text(&self, corners: bool) {
        self.call("setCornerText", vec![json!(corners)]);
    }

    pub fn set_orientation_cube(&self, visible: bool) {
        self.call("setOrientationCube", vec![json!(visible)]);
    }

    pub fn set_radiological(&self, radiological: bool) {
        self.call("setRadiological", vec![json!(radiological)]);
    }

    pub fn set_crosshair_color(&self, rgba: [f64; 4]) {
        self.call("setCrosshairColor", vec![json!(rgba)]);
    }

    pub fn move_crosshair_in_vox(&self, x: i32, y: i32, z: i32) {
        self.call("moveCrosshairInVox", vec![json!(x), json!(y), json!(z)]);
    }
}
