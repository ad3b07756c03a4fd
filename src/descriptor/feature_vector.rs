extern crate image as image_rs;

use image_rs::RgbImage;

use crate::Float;
use crate::image::{color_image::ColorImage, canny::CannyDetector};
use super::{histogram::DensityHistogram, feature_runtime_parameters::FeatureParameters};

/// Lightness density histogram followed by the edge density of one image.
#[derive(Debug,Clone,PartialEq)]
pub struct FeatureVector {
    pub data: Vec<Float>
}

impl FeatureVector {

    /// `image` is expected to be resized already.
    pub fn from_rgb_image(image: &RgbImage, parameters: &FeatureParameters) -> FeatureVector {
        let color_image = ColorImage::from_rgb_image(image);

        let lab = color_image.to_lab();
        let mut histogram = DensityHistogram::new(parameters.histogram_bins, parameters.lightness_range);
        for &lightness in lab.lightness.buffer.iter() {
            histogram.add_measurement(lightness);
        }

        let detector = CannyDetector::new(parameters.canny_sigma, parameters.canny_low_threshold, parameters.canny_high_threshold);
        let edges = detector.detect(&color_image.to_gray());

        let mut data = histogram.densities();
        data.push(edges.density());
        FeatureVector { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn histogram(&self) -> &[Float] {
        &self.data[..self.data.len()-1]
    }

    pub fn edge_density(&self) -> Float {
        self.data[self.data.len()-1]
    }
}
