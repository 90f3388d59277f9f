use serde::Serialize;

const DEFAULT_COLORMAP: &str = "gray";

/// Host/viewer shared record of an image currently available for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedImage {
    pub path: String,
    pub display_name: String,
    pub index: usize,
    pub colormap: String,
    pub visible: bool,
    pub active: bool,
}

impl LoadedImage {
    fn new(path: &str, index: usize, active: bool) -> Self {
        let display_name = path
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(path)
            .to_string();
        Self {
            path: path.to_string(),
            display_name,
            index,
            colormap: DEFAULT_COLORMAP.to_string(),
            visible: true,
            active,
        }
    }
}

/// Insertion-ordered list of loaded images. At most one image is active;
/// none when the list is empty. Images are removed only by a full reload,
/// there is no partial delete.
#[derive(Debug, Clone, Default)]
pub struct ImageList {
    images: Vec<LoadedImage>,
}

impl ImageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[LoadedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Replaces the whole list; the first image becomes active.
    pub fn load(&mut self, paths: &[String]) {
        self.images = paths
            .iter()
            .enumerate()
            .map(|(index, path)| LoadedImage::new(path, index, index == 0))
            .collect();
    }

    /// Appends one overlay at the next index. The active flag is untouched
    /// unless the list was empty, in which case the overlay becomes active.
    pub fn add_overlay(&mut self, path: &str) -> &LoadedImage {
        let index = self.images.len();
        let active = self.images.is_empty();
        self.images.push(LoadedImage::new(path, index, active));
        &self.images[index]
    }

    /// Makes the image at `index` the single active one.
    pub fn set_active(&mut self, index: usize) {
        for image in &mut self.images {
            image.active = image.index == index;
        }
    }

    pub fn set_colormap(&mut self, name: &str, colormap: &str) {
        for image in &mut self.images {
            if image.display_name == name || image.path == name {
                image.colormap = colormap.to_string();
            }
        }
    }
}
