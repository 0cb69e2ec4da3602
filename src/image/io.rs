//! I/O helpers for screenshots and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned 3-channel buffer.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ChannelOrder, ImageRgb8};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 3-channel 8-bit buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbFrame {
    width: usize,
    height: usize,
    order: ChannelOrder,
    data: Vec<[u8; 3]>,
}

impl RgbFrame {
    pub fn new(width: usize, height: usize, order: ChannelOrder, data: Vec<[u8; 3]>) -> Self {
        Self {
            width,
            height,
            order,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Reinterpret the stored channel order without touching the pixels.
    pub fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    /// Borrow as a read-only `ImageRgb8` view
    pub fn as_view(&self) -> ImageRgb8<'_> {
        ImageRgb8::new(self.width, self.height, self.order, &self.data)
    }
}

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbFrame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.pixels().map(|p| p.0).collect();
    Ok(RgbFrame::new(width, height, ChannelOrder::Rgb, data))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
