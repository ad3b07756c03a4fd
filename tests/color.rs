extern crate image as image_rs;

use image_rs::{Rgb, RgbImage};
use image_atlas::image::color_image::{ColorImage, srgb_to_lab, rgb_to_xyz_matrix};
use nalgebra::Vector3;

fn lab_of(rgb: [f64;3]) -> (f64,f64,f64) {
    srgb_to_lab(&Vector3::new(rgb[0], rgb[1], rgb[2]), &rgb_to_xyz_matrix())
}

#[test]
fn lab_reference_values() {
    let (l, a, b) = lab_of([0.0,0.0,0.0]);
    assert!(l.abs() < 1e-9 && a.abs() < 1e-9 && b.abs() < 1e-9);

    let (l, a, b) = lab_of([1.0,1.0,1.0]);
    assert!((l - 100.0).abs() < 1e-3);
    assert!(a.abs() < 1e-2 && b.abs() < 1e-2);

    let (l, a, b) = lab_of([1.0,0.0,0.0]);
    assert!((l - 53.24).abs() < 0.05);
    assert!((a - 80.09).abs() < 0.1);
    assert!((b - 67.20).abs() < 0.1);
}

#[test]
fn gray_uses_luminance_weights() {
    let image = RgbImage::from_pixel(4, 3, Rgb([255,0,0]));
    let color_image = ColorImage::from_rgb_image(&image);
    let gray = color_image.to_gray();
    assert_eq!(gray.width(), 4);
    assert_eq!(gray.height(), 3);
    assert!(gray.buffer.iter().all(|&v| (v - 0.2125).abs() < 1e-12));
}

#[test]
fn lab_image_keeps_shape() {
    let image = RgbImage::from_fn(5, 7, |x,_| Rgb([(x*50) as u8, 10, 200]));
    let lab = ColorImage::from_rgb_image(&image).to_lab();
    assert_eq!(lab.lightness.width(), 5);
    assert_eq!(lab.lightness.height(), 7);
    assert!(lab.lightness.buffer.iter().all(|&l| l >= 0.0 && l <= 100.0 + 1e-6));
}
