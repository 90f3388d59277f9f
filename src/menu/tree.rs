use serde::Serialize;

use crate::channel::{ColormapSelection, Command, DragMode, ViewMode};

use super::LoadedImage;

/// Placeholder entry id shown while no images are loaded. Excluded from
/// image-entry counting.
pub const NO_IMAGES_ID: &str = "noImages";

/// Colormap choices offered per image. The viewer knows many more; this
/// set only feeds the menu projection.
pub const DEFAULT_COLORMAPS: &[&str] = &[
    "gray", "viridis", "inferno", "plasma", "magma", "hot", "cool", "jet", "turbo", "bone",
    "copper", "winter",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    Item,
    Radio,
    Separator,
}

/// One node of the host-side menu tree. Plain data: the windowing shell
/// walks this to build its native menu, and activation resolves to the
/// command carried on the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub kind: MenuKind,
    pub checked: bool,
    pub command: Option<Command>,
    pub submenu: Vec<MenuItem>,
}

impl MenuItem {
    fn item(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: MenuKind::Item,
            checked: false,
            command: None,
            submenu: Vec::new(),
        }
    }

    fn radio(id: &str, label: &str, checked: bool, command: Command) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: MenuKind::Radio,
            checked,
            command: Some(command),
            submenu: Vec::new(),
        }
    }

    fn command(id: &str, label: &str, command: Command) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: MenuKind::Item,
            checked: false,
            command: Some(command),
            submenu: Vec::new(),
        }
    }

    fn separator() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            kind: MenuKind::Separator,
            checked: false,
            command: None,
            submenu: Vec::new(),
        }
    }

    /// Finds the command carried by the node with `id`, searching the
    /// whole subtree.
    pub fn resolve(&self, id: &str) -> Option<&Command> {
        if self.id == id {
            return self.command.as_ref();
        }
        self.submenu.iter().find_map(|child| child.resolve(id))
    }
}

/// Pure projection of the image list into the `Images` menu. Rebuilt in
/// full on every list change, so the menu is always a deterministic
/// function of current state: entry order equals image order, entry count
/// equals image count.
pub fn render_images_menu(images: &[LoadedImage], colormaps: &[&str]) -> MenuItem {
    let mut menu = MenuItem::item("images", "Images");
    if images.is_empty() {
        menu.submenu.push(MenuItem::item(NO_IMAGES_ID, "No images loaded"));
        return menu;
    }
    for image in images {
        menu.submenu.push(image_entry(image, colormaps));
    }
    menu
}

/// Incremental special case for a single overlay append: prior entries are
/// preserved as-is and exactly one entry with the next sequential id is
/// appended.
pub fn append_image_entry(menu: &mut MenuItem, image: &LoadedImage, colormaps: &[&str]) {
    menu.submenu.retain(|entry| entry.id != NO_IMAGES_ID);
    menu.submenu.push(image_entry(image, colormaps));
}

fn image_entry(image: &LoadedImage, colormaps: &[&str]) -> MenuItem {
    let mut entry = MenuItem::item(&format!("image-{}", image.index), &image.display_name);
    entry.submenu = colormaps
        .iter()
        .map(|colormap| {
            MenuItem::radio(
                &format!("image-{}-{colormap}", image.index),
                colormap,
                image.colormap == *colormap,
                Command::SetColormaps(ColormapSelection {
                    name: image.display_name.clone(),
                    colormap: colormap.to_string(),
                }),
            )
        })
        .collect();
    entry
}

/// Ids of the real image entries, placeholder excluded.
pub fn image_entry_ids(menu: &MenuItem) -> Vec<String> {
    menu.submenu
        .iter()
        .filter(|entry| entry.id != NO_IMAGES_ID)
        .map(|entry| entry.id.clone())
        .collect()
}

const VIEW_ENTRIES: &[(&str, &str, ViewMode)] = &[
    ("renderView", "Render", ViewMode::Render),
    ("axialView", "Axial", ViewMode::Axial),
    ("sagittalView", "Sagittal", ViewMode::Sagittal),
    ("coronalView", "Coronal", ViewMode::Coronal),
    (
        "multiPlanarViewACS",
        "Multi-planar (A+C+S)",
        ViewMode::MultiPlanarAcs,
    ),
    (
        "multiPlanarViewACSR",
        "Multi-planar (A+C+S+R)",
        ViewMode::MultiPlanarAcsr,
    ),
    ("mosaicView", "Mosaic", ViewMode::Mosaic),
];

/// Projects the full host menu bar. Label text is cosmetic; the ids, the
/// carried commands, and the checked view radio are the contract. The
/// checked state mirrors `current_view`, which the host keeps in sync
/// with both its own view commands and viewer-reported changes.
pub fn render_app_menu(
    images: &[LoadedImage],
    colormaps: &[&str],
    current_view: Option<ViewMode>,
) -> Vec<MenuItem> {
    let mut file = MenuItem::item("file", "File");
    file.submenu = vec![
        MenuItem::item("loadVolumes", "Load volumes"),
        MenuItem::item("loadSurfaces", "Load surfaces"),
        MenuItem::separator(),
        MenuItem::item("addVolumeOverlay", "Add volume overlay"),
    ];

    let mut view = MenuItem::item("views", "View");
    view.submenu = VIEW_ENTRIES
        .iter()
        .map(|(id, label, mode)| {
            MenuItem::radio(
                id,
                label,
                current_view == Some(*mode),
                Command::SetView(*mode),
            )
        })
        .collect();
    view.submenu.push(MenuItem::command(
        "nextFrame",
        "Next frame",
        Command::SetFrame(1),
    ));
    view.submenu.push(MenuItem::command(
        "previousFrame",
        "Previous frame",
        Command::SetFrame(-1),
    ));

    let mut drag = MenuItem::item("drag", "Drag");
    drag.submenu = vec![
        MenuItem::radio(
            "panzoom",
            "Pan/zoom",
            false,
            Command::SetDragMode(DragMode::Pan),
        ),
        MenuItem::radio(
            "measure",
            "Measure",
            false,
            Command::SetDragMode(DragMode::Measure),
        ),
        MenuItem::radio(
            "windowlevel",
            "Window/level",
            false,
            Command::SetDragMode(DragMode::Contrast),
        ),
        MenuItem::radio("none", "None", false, Command::SetDragMode(DragMode::None)),
    ];

    vec![file, render_images_menu(images, colormaps), view, drag]
}
