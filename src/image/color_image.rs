extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::RgbImage;
use na::{DMatrix, Matrix3, Vector3};

use crate::Float;
use super::Image;

// D65 reference white
const WHITE_X: Float = 0.95047;
const WHITE_Y: Float = 1.0;
const WHITE_Z: Float = 1.08883;

const LAB_EPSILON: Float = 0.008856;
const LAB_KAPPA: Float = 7.787;

/// RGB image with every channel stored as a [0,1] matrix.
#[derive(Debug,Clone)]
pub struct ColorImage {
    pub red: Image,
    pub green: Image,
    pub blue: Image
}

#[derive(Debug,Clone)]
pub struct LabImage {
    pub lightness: Image,
    pub a: Image,
    pub b: Image
}

impl ColorImage {

    pub fn from_rgb_image(image: &RgbImage) -> ColorImage {
        ColorImage {
            red: Image::channel_from_rgb(image, 0),
            green: Image::channel_from_rgb(image, 1),
            blue: Image::channel_from_rgb(image, 2)
        }
    }

    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }

    /// Luminance weights of ITU-R BT.709 applied to the stored (gamma encoded) values.
    pub fn to_gray(&self) -> Image {
        let buffer = 0.2125*&self.red.buffer + 0.7154*&self.green.buffer + 0.0721*&self.blue.buffer;
        Image{ buffer }
    }

    /// Interprets the channels as sRGB and converts to CIE Lab under D65.
    pub fn to_lab(&self) -> LabImage {
        let rows = self.height();
        let cols = self.width();
        let mut lightness = DMatrix::<Float>::zeros(rows,cols);
        let mut a = DMatrix::<Float>::zeros(rows,cols);
        let mut b = DMatrix::<Float>::zeros(rows,cols);

        let rgb_to_xyz = rgb_to_xyz_matrix();
        for c in 0..cols {
            for r in 0..rows {
                let rgb = Vector3::new(self.red.buffer[(r,c)], self.green.buffer[(r,c)], self.blue.buffer[(r,c)]);
                let (l_val, a_val, b_val) = srgb_to_lab(&rgb, &rgb_to_xyz);
                lightness[(r,c)] = l_val;
                a[(r,c)] = a_val;
                b[(r,c)] = b_val;
            }
        }

        LabImage {
            lightness: Image::from_matrix(&lightness),
            a: Image::from_matrix(&a),
            b: Image::from_matrix(&b)
        }
    }
}

pub fn rgb_to_xyz_matrix() -> Matrix3<Float> {
    Matrix3::new(0.412453, 0.357580, 0.180423,
                 0.212671, 0.715160, 0.072169,
                 0.019334, 0.119193, 0.950227)
}

pub fn srgb_to_linear(value: Float) -> Float {
    match value {
        v if v > 0.04045 => ((v + 0.055) / 1.055).powf(2.4),
        v => v / 12.92
    }
}

fn lab_f(t: Float) -> Float {
    match t {
        t if t > LAB_EPSILON => t.cbrt(),
        t => LAB_KAPPA*t + 16.0/116.0
    }
}

pub fn srgb_to_lab(rgb: &Vector3<Float>, rgb_to_xyz: &Matrix3<Float>) -> (Float,Float,Float) {
    let linear = rgb.map(srgb_to_linear);
    let xyz = rgb_to_xyz*linear;

    let fx = lab_f(xyz.x / WHITE_X);
    let fy = lab_f(xyz.y / WHITE_Y);
    let fz = lab_f(xyz.z / WHITE_Z);

    (116.0*fy - 16.0, 500.0*(fx - fy), 200.0*(fy - fz))
}
