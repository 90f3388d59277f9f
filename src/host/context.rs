use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use super::Result;
use crate::channel::{ChannelError, CommandChannel, ViewMode};
use crate::comms::CommsState;
use crate::dialog::{DialogProvider, FileFilter, surface_filters, volume_filters};
use crate::menu::{DEFAULT_COLORMAPS, ImageList, MenuItem, render_app_menu, render_images_menu};
use crate::server::{Supervisor, file_server_command};

/// How long a viewer `getCommsInfo` call may wait on the port handshake
/// before reporting not-ready.
const COMMS_WAIT: Duration = Duration::from_secs(5);

/// Aggregates the host-side services behind the viewer surface: the comms
/// broker, the command channel, the file dialogs, and the image list with
/// its menu projection. One context per host window.
pub struct HostContext {
    pub comms: CommsState,
    pub channel: CommandChannel,
    pub dialogs: Arc<dyn DialogProvider>,
    pub(super) images: Mutex<ImageList>,
    pub(super) images_menu: Mutex<MenuItem>,
    pub(super) current_view: Arc<Mutex<Option<ViewMode>>>,
    supervisor: Mutex<Option<Supervisor>>,
}

impl HostContext {
    pub fn new(dialogs: Arc<dyn DialogProvider>) -> Self {
        let context = Self {
            comms: CommsState::new(),
            channel: CommandChannel::new(),
            dialogs,
            images: Mutex::new(ImageList::new()),
            images_menu: Mutex::new(render_images_menu(&[], DEFAULT_COLORMAPS)),
            current_view: Arc::new(Mutex::new(None)),
            supervisor: Mutex::new(None),
        };
        context.register_viewer_operations();
        context
    }

    /// Installs the responders for the viewer-initiated operations. The
    /// viewer may call these at any point after the surface loads, in
    /// particular before the file server has announced its port.
    fn register_viewer_operations(&self) {
        let comms = self.comms.clone();
        self.channel.respond_to("getCommsInfo", move |_args| {
            let info = comms
                .wait(COMMS_WAIT)
                .map_err(|error| ChannelError::Responder(error.to_string()))?;
            serde_json::to_value(info).map_err(ChannelError::from)
        });

        let dialogs = Arc::clone(&self.dialogs);
        self.channel.respond_to("openFileDialog", move |args| {
            let filters = parse_filters(args);
            serde_json::to_value(dialogs.open_file_dialog(&filters)).map_err(ChannelError::from)
        });

        let dialogs = Arc::clone(&self.dialogs);
        self.channel.respond_to("openSaveFileDialog", move |_args| {
            serde_json::to_value(dialogs.open_save_file_dialog()).map_err(ChannelError::from)
        });

        // Viewer-originated view changes (gesture, keyboard) land here so
        // the menu's view radio stays in sync.
        let current_view = Arc::clone(&self.current_view);
        self.channel.respond_to("setViewRadioButton", move |args| {
            let view: ViewMode = serde_json::from_value(args.clone())?;
            let mut slot = current_view.lock().unwrap_or_else(|e| e.into_inner());
            *slot = Some(view);
            Ok(Value::Null)
        });
    }

    /// Launches the file-serving subprocess. Returns as soon as the spawn
    /// succeeds; the port arrives in `comms` asynchronously.
    pub fn start(&self) -> Result<()> {
        let supervisor = Supervisor::start(file_server_command()?, &self.comms)?;
        let mut slot = self.supervisor.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(supervisor);
        Ok(())
    }

    /// Snapshot of the current `Images` menu projection.
    pub fn images_menu(&self) -> MenuItem {
        self.images_menu
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Projects the full menu bar from the current image list and view.
    pub fn app_menu(&self) -> Vec<MenuItem> {
        let images = self.images.lock().unwrap_or_else(|e| e.into_inner());
        let view = *self.current_view.lock().unwrap_or_else(|e| e.into_inner());
        render_app_menu(images.images(), DEFAULT_COLORMAPS, view)
    }

    /// Drains the command queue and terminates the subprocess.
    pub fn shutdown(&self) -> Result<()> {
        self.channel.flush()?;
        let mut slot = self.supervisor.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(supervisor) = slot.as_mut() {
            supervisor.shutdown();
        }
        Ok(())
    }
}

/// Dialog requests either carry an explicit filter list or name a preset;
/// anything else falls back to the volume set.
fn parse_filters(args: &Value) -> Vec<FileFilter> {
    if args.is_array() {
        if let Ok(filters) = serde_json::from_value::<Vec<FileFilter>>(args.clone()) {
            if !filters.is_empty() {
                return filters;
            }
        }
    }
    match args.as_str() {
        Some("surface") => surface_filters(),
        _ => volume_filters(),
    }
}
