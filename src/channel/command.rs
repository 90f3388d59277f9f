use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// View layouts the viewer canvas can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[serde(rename = "axial")]
    Axial,
    #[serde(rename = "coronal")]
    Coronal,
    #[serde(rename = "sagittal")]
    Sagittal,
    #[serde(rename = "multiPlanarACS")]
    MultiPlanarAcs,
    #[serde(rename = "multiPlanarACSR")]
    MultiPlanarAcsr,
    #[serde(rename = "render")]
    Render,
    #[serde(rename = "mosaic")]
    Mosaic,
}

/// Behavior of a mouse/touch drag on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    Pan,
    Measure,
    Contrast,
    None,
}

/// Payload of `setColormaps`: which image, which colormap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColormapSelection {
    pub name: String,
    pub colormap: String,
}

/// Host-to-viewer command catalog. Each variant maps to a named event on
/// the wire; the payload shapes are fixed by the viewer side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    LoadVolumes(Vec<String>),
    LoadSurfaces(Vec<String>),
    AddVolumeOverlay(String),
    SetView(ViewMode),
    SetDragMode(DragMode),
    SetFrame(i32),
    SetColormaps(ColormapSelection),
    SetOptions(Map<String, Value>),
}

impl Command {
    /// Unique wire name; at most one handler is active per name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadVolumes(_) => "loadVolumes",
            Self::LoadSurfaces(_) => "loadSurfaces",
            Self::AddVolumeOverlay(_) => "addVolumeOverlay",
            Self::SetView(_) => "setView",
            Self::SetDragMode(_) => "setDragMode",
            Self::SetFrame(_) => "setFrame",
            Self::SetColormaps(_) => "setColormaps",
            Self::SetOptions(_) => "setOptions",
        }
    }

    /// Wire payload delivered to the registered handler.
    pub fn payload(&self) -> Value {
        match self {
            Self::LoadVolumes(paths) => json!(paths),
            Self::LoadSurfaces(paths) => json!(paths),
            Self::AddVolumeOverlay(path) => json!(path),
            Self::SetView(view) => json!(view),
            Self::SetDragMode(mode) => json!(mode),
            Self::SetFrame(delta) => json!(delta),
            Self::SetColormaps(selection) => json!(selection),
            Self::SetOptions(options) => Value::Object(options.clone()),
        }
    }
}
