extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::RgbImage;
use na::DMatrix;

use crate::Float;

pub mod color_image;
pub mod filter;
pub mod canny;

/// Single channel image. Rows index y, columns index x.
#[derive(Debug,Clone)]
pub struct Image {
    pub buffer: DMatrix<Float>
}

impl Image {

    pub fn width(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer.nrows()
    }

    pub fn empty(width: usize, height: usize) -> Image {
        Image{ buffer: DMatrix::<Float>::zeros(height,width) }
    }

    pub fn from_matrix(matrix: &DMatrix<Float>) -> Image {
        Image{ buffer: matrix.clone() }
    }

    /// One channel of an 8 bit RGB image scaled into [0,1].
    pub fn channel_from_rgb(image: &RgbImage, channel: usize) -> Image {
        assert!(channel < 3);
        let (width, height) = image.dimensions();
        let buffer = DMatrix::<Float>::from_fn(height as usize, width as usize, |r,c| {
            image.get_pixel(c as u32, r as u32).0[channel] as Float / 255.0
        });
        Image{ buffer }
    }

}
