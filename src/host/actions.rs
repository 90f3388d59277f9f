use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use serde_json::{Map, Value};

use super::{HostContext, Result};
use crate::bridge::{BridgeTransport, NativeBridge};
use crate::channel::{Command, DragMode, ViewMode};
use crate::dialog::{surface_filters, volume_filters};
use crate::drawing;
use crate::menu::{DEFAULT_COLORMAPS, append_image_entry, render_images_menu};

/// Menu and shortcut activations. Every action follows the same shape:
/// gather user input, update host state, then dispatch to the viewer.
/// A canceled dialog short-circuits before any of that.
impl HostContext {
    /// `File > Load volumes`. Replaces the image list and rebuilds the
    /// `Images` menu in full before the viewer hears about the load.
    pub fn on_load_volumes_click(&self) -> Result<()> {
        let selection = self.dialogs.open_file_dialog(&volume_filters());
        if selection.canceled {
            return Ok(());
        }
        self.load_volumes(selection.file_paths)
    }

    /// Programmatic volume load, used by the `open` entry point. Same
    /// effects as the dialog path minus the dialog.
    pub fn load_volumes(&self, paths: Vec<String>) -> Result<()> {
        let mut images = self.images.lock().unwrap_or_else(|e| e.into_inner());
        images.load(&paths);
        let mut menu = self.images_menu.lock().unwrap_or_else(|e| e.into_inner());
        *menu = render_images_menu(images.images(), DEFAULT_COLORMAPS);
        self.channel.dispatch(&Command::LoadVolumes(paths))?;
        Ok(())
    }

    /// `File > Load surfaces`. Surfaces do not join the image list, so the
    /// menu projection is untouched.
    pub fn on_load_surfaces_click(&self) -> Result<()> {
        let selection = self.dialogs.open_file_dialog(&surface_filters());
        if selection.canceled {
            return Ok(());
        }
        self.channel
            .dispatch(&Command::LoadSurfaces(selection.file_paths))?;
        Ok(())
    }

    /// `File > Add volume overlay`. Only the first selected path is taken;
    /// the existing menu entries are preserved and one entry is appended.
    pub fn on_add_volume_overlay_click(&self) -> Result<()> {
        let selection = self.dialogs.open_file_dialog(&volume_filters());
        let Some(path) = selection.file_paths.first() else {
            return Ok(());
        };
        let mut images = self.images.lock().unwrap_or_else(|e| e.into_inner());
        let overlay = images.add_overlay(path).clone();
        let mut menu = self.images_menu.lock().unwrap_or_else(|e| e.into_inner());
        append_image_entry(&mut menu, &overlay, DEFAULT_COLORMAPS);
        self.channel
            .dispatch(&Command::AddVolumeOverlay(path.clone()))?;
        Ok(())
    }

    /// Activation of an `Images` menu entry by id. Colormap selections also
    /// update the host-side record so a later full rebuild keeps the choice.
    pub fn on_images_menu_activate(&self, id: &str) -> Result<()> {
        let command = {
            let menu = self.images_menu.lock().unwrap_or_else(|e| e.into_inner());
            menu.resolve(id).cloned()
        };
        let Some(command) = command else {
            return Ok(());
        };
        if let Command::SetColormaps(selection) = &command {
            let mut images = self.images.lock().unwrap_or_else(|e| e.into_inner());
            images.set_colormap(&selection.name, &selection.colormap);
        }
        Ok(self.channel.dispatch(&command)?)
    }

    /// Host-originated view change; keeps the menu radio in sync too.
    pub fn on_set_view(&self, view: ViewMode) -> Result<()> {
        {
            let mut current = self.current_view.lock().unwrap_or_else(|e| e.into_inner());
            *current = Some(view);
        }
        Ok(self.channel.dispatch(&Command::SetView(view))?)
    }

    pub fn on_set_drag_mode(&self, mode: DragMode) -> Result<()> {
        Ok(self.channel.dispatch(&Command::SetDragMode(mode))?)
    }

    pub fn on_next_frame(&self) -> Result<()> {
        Ok(self.channel.dispatch(&Command::SetFrame(1))?)
    }

    pub fn on_previous_frame(&self) -> Result<()> {
        Ok(self.channel.dispatch(&Command::SetFrame(-1))?)
    }

    pub fn on_set_options(&self, options: Map<String, Value>) -> Result<()> {
        Ok(self.channel.dispatch(&Command::SetOptions(options))?)
    }

    /// Exports the viewer's current drawing into `dir`, named after the
    /// active image. The returned receiver is the only success indicator;
    /// nothing is reported at call-issue time.
    pub fn save_drawing_for_active<T: BridgeTransport>(
        &self,
        bridge: &NativeBridge<T>,
        dir: PathBuf,
    ) -> Receiver<drawing::Result<PathBuf>> {
        let base_image_name = {
            let images = self.images.lock().unwrap_or_else(|e| e.into_inner());
            images
                .images()
                .iter()
                .find(|image| image.active)
                .map(|image| image.display_name.clone())
                .unwrap_or_else(|| "drawing".to_string())
        };
        drawing::save_drawing(bridge, dir, base_image_name)
    }
}
