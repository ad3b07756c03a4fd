#![allow(dead_code)]
extern crate image as image_rs;

use std::fs;
use std::path::{Path,PathBuf};
use image_rs::{Rgb, RgbImage};

pub fn write_solid_png(dir: &Path, name: &str, size: u32, color: [u8;3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(size, size, Rgb(color)).save(&path).expect("failed to write fixture");
    path
}

/// Checkerboard with `cell` pixel cells alternating between `dark` and `light`.
pub fn write_checkerboard_png(dir: &Path, name: &str, size: u32, cell: u32, dark: [u8;3], light: [u8;3]) -> PathBuf {
    let path = dir.join(name);
    let image = RgbImage::from_fn(size, size, |x,y| match ((x/cell) + (y/cell)) % 2 {
        0 => Rgb(dark),
        _ => Rgb(light)
    });
    image.save(&path).expect("failed to write fixture");
    path
}

pub fn write_manifest(dir: &Path, lines: &[String]) -> PathBuf {
    let path = dir.join("files.txt");
    fs::write(&path, lines.join("\n")).expect("failed to write manifest");
    path
}

pub fn path_line(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
