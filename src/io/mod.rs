extern crate image as image_rs;

use std::fs;
use std::path::{Path,PathBuf};
use image_rs::{ImageError, ImageReader, RgbImage, imageops::{self, FilterType}};
use tracing::{debug,info};

use crate::{AtlasError, Result};

pub mod coordinates;

pub use self::coordinates::{write_coordinates, Coordinate};

/// Reads a newline separated list of image paths. `\n`, `\r\n` and a lone `\r` all end a line.
/// Lines are trimmed and lines that are empty after trimming are dropped, so they do not take up an index.
pub fn load_manifest(file_path: &Path) -> Result<Vec<PathBuf>> {
    let contents = fs::read_to_string(file_path).map_err(|source| AtlasError::ManifestRead { path: file_path.to_path_buf(), source })?;
    let paths = parse_manifest(&contents);
    info!("loaded manifest {:?} with {} entries", file_path, paths.len());
    Ok(paths)
}

pub fn parse_manifest(contents: &str) -> Vec<PathBuf> {
    contents.split(['\n', '\r']).map(|line| line.trim()).filter(|line| !line.is_empty()).map(PathBuf::from).collect()
}

/// Decodes the image at `file_path` as 8 bit RGB and resamples it to `width` x `height`
/// with a bicubic filter. The format is taken from the file contents, not the extension.
pub fn load_image_as_rgb(file_path: &Path, width: u32, height: u32) -> Result<RgbImage> {
    let to_error = |source: ImageError| AtlasError::ImageDecode { path: file_path.to_path_buf(), source };
    let dynamic_image = ImageReader::open(file_path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| to_error(ImageError::IoError(e)))?
        .decode()
        .map_err(to_error)?;
    let rgb = dynamic_image.to_rgb8();
    debug!("decoded {:?} ({}x{})", file_path, rgb.width(), rgb.height());
    Ok(imageops::resize(&rgb, width, height, FilterType::CatmullRom))
}
