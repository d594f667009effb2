use std::fs;
use std::path::{Path, PathBuf};

use image::{ColorType, ImageFormat};

use crate::raster::Raster;

/// Destination for finished rasters. Called once per tile.
pub trait ImageSink: Sync {
    fn write_raster(&self, raster: &Raster, path: &Path) -> Result<(), SinkError>;
}

#[derive(Debug)]
pub enum SinkError {
    Io(PathBuf, std::io::Error),
    Encode(PathBuf, image::ImageError),
}

/// Writes rasters as 8-bit RGB PNG files.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngSink;

impl ImageSink for PngSink {
    fn write_raster(&self, raster: &Raster, path: &Path) -> Result<(), SinkError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SinkError::Io(parent.to_path_buf(), e))?;
        }
        image::save_buffer_with_format(
            path,
            raster.data(),
            raster.width() as u32,
            raster.height() as u32,
            ColorType::Rgb8,
            ImageFormat::Png,
        )
        .map_err(|e| SinkError::Encode(path.to_path_buf(), e))?;
        log::debug!("wrote {}x{} tile to {}", raster.width(), raster.height(), path.display());
        Ok(())
    }
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Io(path, e) => write!(f, "cannot create {}: {}", path.display(), e),
            SinkError::Encode(path, e) => write!(f, "cannot write {}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(_, e) => Some(e),
            SinkError::Encode(_, e) => Some(e),
        }
    }
}
