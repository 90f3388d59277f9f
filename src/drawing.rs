use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde_json::Value;
use thiserror::Error;

use crate::bridge::{BridgeError, BridgeTransport, NativeBridge};

pub type Result<T> = std::result::Result<T, DrawingError>;

#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("malformed drawing payload: {0}")]
    MalformedPayload(#[from] base64::DecodeError),

    #[error("unexpected drawing result: {0}")]
    UnexpectedResult(String),

    #[error("drawing write failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("viewer bridge failure: {0}")]
    Bridge(#[from] BridgeError),
}

/// Drawing export delivered by the viewer, plus the host-side naming
/// context. The encoded bytes stay base64 until the moment of persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingPayload {
    pub encoded: String,
    pub base_image_name: String,
    pub timestamp: String,
}

impl DrawingPayload {
    pub fn new(encoded: String, base_image_name: String) -> Self {
        Self {
            encoded,
            base_image_name,
            timestamp: chrono::Local::now().format("%Y%m%dT%H%M%S").to_string(),
        }
    }

    /// Builds the payload from a bridge completion value, which carries
    /// the base64 string.
    pub fn from_bridge_result(value: &Value, base_image_name: &str) -> Result<Self> {
        match value.as_str() {
            Some(encoded) if !encoded.is_empty() => {
                Ok(Self::new(encoded.to_string(), base_image_name.to_string()))
            }
            Some(_) => Err(DrawingError::UnexpectedResult(
                "viewer returned an empty drawing".to_string(),
            )),
            None => Err(DrawingError::UnexpectedResult(format!(
                "expected a base64 string, got {value}"
            ))),
        }
    }

    /// File name convention for persisted drawings.
    pub fn file_name(&self) -> String {
        format!("drawing_{}_{}", self.timestamp, self.base_image_name)
    }

    /// Decodes and persists the drawing under `dir`. The payload is decoded
    /// in full before the file is created, so a malformed payload leaves no
    /// partial file behind.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let bytes = BASE64_STANDARD.decode(self.encoded.as_bytes())?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Requests a drawing export from the viewer and persists it. The returned
/// receiver is the only success indicator: an `Ok(path)` arrives after the
/// decode-and-write step completes, never at call-issue time.
pub fn save_drawing<T: BridgeTransport>(
    bridge: &NativeBridge<T>,
    dir: PathBuf,
    base_image_name: String,
) -> Receiver<Result<PathBuf>> {
    let (tx, rx) = mpsc::channel();
    bridge.save_drawing(Box::new(move |result| {
        let outcome = result.map_err(DrawingError::from).and_then(|value| {
            let payload = DrawingPayload::from_bridge_result(&value, &base_image_name)?;
            payload.write_to(&dir)
        });
        if let Err(error) = &outcome {
            tracing::warn!(%error, "drawing save failed");
        }
        let _ = tx.send(outcome);
    }));
    rx
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use serde_json::{Value, json};

    use super::{DrawingError, DrawingPayload, save_drawing};
    use crate::bridge::{BridgeTransport, CommandEnvelope, Completion, NativeBridge};

    /// Completes every call with a canned value after a delay, off-thread,
    /// mimicking an embedded web view's asynchronous evaluation.
    struct DelayedTransport {
        value: Value,
    }

    impl BridgeTransport for DelayedTransport {
        fn send(&self, _envelope: &CommandEnvelope, completion: Completion) {
            let value = self.value.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                completion(Ok(value));
            });
        }
    }

    fn payload(encoded: &str) -> DrawingPayload {
        DrawingPayload {
            encoded: encoded.to_string(),
            base_image_name: "brain.nii.gz".to_string(),
            timestamp: "20240101T120000".to_string(),
        }
    }

    #[test]
    fn file_name_follows_convention() {
        assert_eq!(
            payload("AAA=").file_name(),
            "drawing_20240101T120000_brain.nii.gz"
        );
    }

    #[test]
    fn write_decodes_before_persisting() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = payload("AAECAw==").write_to(dir.path()).expect("write");
        assert_eq!(std::fs::read(path).expect("read back"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn malformed_payload_leaves_no_file_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = payload("not base64 !!!").write_to(dir.path());
        assert!(matches!(result, Err(DrawingError::MalformedPayload(_))));
        let leftovers = std::fs::read_dir(dir.path()).expect("read dir").count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn non_string_result_is_rejected() {
        let result = DrawingPayload::from_bridge_result(&json!(42), "brain.nii.gz");
        assert!(matches!(result, Err(DrawingError::UnexpectedResult(_))));
    }

    #[test]
    fn success_arrives_only_after_decode_and_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bridge = NativeBridge::new(DelayedTransport {
            value: json!("AAA="),
        });

        let saved = save_drawing(&bridge, dir.path().to_path_buf(), "brain.nii.gz".to_string());
        // Nothing has completed at call-issue time.
        assert!(saved.try_recv().is_err());

        let path = saved
            .recv_timeout(Duration::from_secs(5))
            .expect("completion fired")
            .expect("save succeeded");
        assert!(path.exists());
        assert_eq!(std::fs::read(path).expect("read back"), vec![0, 0]);
    }

    #[test]
    fn empty_drawing_reports_failure_without_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bridge = NativeBridge::new(DelayedTransport { value: json!("") });

        let saved = save_drawing(&bridge, dir.path().to_path_buf(), "brain.nii.gz".to_string());
        let result = saved
            .recv_timeout(Duration::from_secs(5))
            .expect("completion fired");
        assert!(matches!(result, Err(DrawingError::UnexpectedResult(_))));
        assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
    }
}
