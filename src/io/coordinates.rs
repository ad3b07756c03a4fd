use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::{AtlasError, Float, Result};

pub const HEADER: &str = "index,x,y";

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Coordinate {
    pub index: usize,
    pub x: Float,
    pub y: Float
}

/// Writes `index,x,y` rows, truncating any existing file at `file_path`.
/// Coordinates always carry a decimal point or exponent, so `0` is written as `0.0`.
pub fn write_coordinates(file_path: &Path, coordinates: &[Coordinate]) -> Result<()> {
    let to_error = |source: std::io::Error| AtlasError::OutputWrite { path: file_path.to_path_buf(), source };

    let file = File::create(file_path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", HEADER).map_err(to_error)?;
    for coordinate in coordinates {
        writeln!(writer, "{},{:?},{:?}", coordinate.index, coordinate.x, coordinate.y).map_err(to_error)?;
    }
    writer.flush().map_err(to_error)?;

    info!("wrote {} coordinates to {:?}", coordinates.len(), file_path);
    Ok(())
}
