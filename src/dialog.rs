use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One entry of a file-dialog filter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    pub label: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(label: &str, extensions: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// Volume formats the viewer can load.
pub fn volume_filters() -> Vec<FileFilter> {
    vec![FileFilter::new(
        "Volume types",
        &[
            "nii", "nii.gz", "mih", "mif", "nrrd", "nhdr", "mhd", "mha", "mgh", "mgz", "v", "v16",
            "vmr", "HEAD",
        ],
    )]
}

/// Surface and tractography formats the viewer can load.
pub fn surface_filters() -> Vec<FileFilter> {
    vec![FileFilter::new(
        "Surface types",
        &[
            "gz", "jcon", "json", "tck", "trk", "trx", "tract", "gii", "mz3", "asc", "dfs", "byu",
            "geo", "ico", "off", "nv", "obj", "ply", "x3d", "fib", "vtk", "srf", "stl",
        ],
    )]
}

/// Outcome of an open dialog. Cancellation is not an error: `canceled`
/// implies an empty path list, and no load command may follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDialogResult {
    pub canceled: bool,
    pub file_paths: Vec<String>,
}

impl FileDialogResult {
    pub fn canceled() -> Self {
        Self {
            canceled: true,
            file_paths: Vec::new(),
        }
    }

    pub fn selected(paths: Vec<PathBuf>) -> Self {
        Self {
            canceled: false,
            file_paths: paths
                .into_iter()
                .map(|path| path.display().to_string())
                .collect(),
        }
    }
}

/// Outcome of a save dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDialogResult {
    pub canceled: bool,
    pub file_path: Option<String>,
}

impl SaveDialogResult {
    pub fn canceled() -> Self {
        Self {
            canceled: true,
            file_path: None,
        }
    }

    pub fn selected(path: PathBuf) -> Self {
        Self {
            canceled: false,
            file_path: Some(path.display().to_string()),
        }
    }
}

/// Host-mediated filesystem access for the sandboxed viewer. The trait
/// seam exists so tests can simulate user choices without a desktop
/// session.
pub trait DialogProvider: Send + Sync {
    /// Presents a multi-selection open dialog restricted to `filters`.
    fn open_file_dialog(&self, filters: &[FileFilter]) -> FileDialogResult;

    /// Presents a save dialog; overwrite confirmation is the platform's.
    fn open_save_file_dialog(&self) -> SaveDialogResult;
}

/// Native dialogs via the platform file picker.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDialogs;

impl DialogProvider for NativeDialogs {
    fn open_file_dialog(&self, filters: &[FileFilter]) -> FileDialogResult {
        let mut dialog = rfd::FileDialog::new();
        for filter in filters {
            let extensions: Vec<&str> =
                filter.extensions.iter().map(String::as_str).collect();
            dialog = dialog.add_filter(&filter.label, &extensions);
        }
        match dialog.pick_files() {
            Some(paths) => FileDialogResult::selected(paths),
            None => FileDialogResult::canceled(),
        }
    }

    fn open_save_file_dialog(&self) -> SaveDialogResult {
        match rfd::FileDialog::new().save_file() {
            Some(path) => SaveDialogResult::selected(path),
            None => SaveDialogResult::canceled(),
        }
    }
}
