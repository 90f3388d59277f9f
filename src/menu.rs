mod image_list;
mod tree;


pub use image_list::{ImageList, LoadedImage};
pub use tree::{
    DEFAULT_COLORMAPS, MenuItem, MenuKind, NO_IMAGES_ID, append_image_entry, image_entry_ids,
    render_app_menu, render_images_menu,
};
