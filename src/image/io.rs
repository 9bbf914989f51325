//! I/O helpers for RGBA rasters and JSON.
//!
//! - `load_raster` / `decode_raster`: read a PNG/JPEG/etc. into an owned RGBA raster.
//! - `save_raster` / `encode_png`: write a raster as PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::RasterRgba;
use crate::error::{CompactError, Result};
use image::ImageFormat;
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGBA.
pub fn load_raster(path: &Path) -> Result<RasterRgba> {
    let bytes = fs::read(path).map_err(|e| CompactError::io(path, e))?;
    decode_raster(&bytes)
}

/// Decode an in-memory encoded image (format is sniffed from the bytes).
pub fn decode_raster(bytes: &[u8]) -> Result<RasterRgba> {
    let img = image::load_from_memory(bytes)?.into_rgba8();
    Ok(RasterRgba::from_rgba_image(&img))
}

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: &RasterRgba) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    raster.to_rgba_image().write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Save a raster as PNG, creating parent directories.
pub fn save_raster(raster: &RasterRgba, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let bytes = encode_png(raster)?;
    fs::write(path, bytes).map_err(|e| CompactError::io(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| CompactError::io(path, e))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| CompactError::io(parent, e))?;
        }
    }
    Ok(())
}
