use std::fmt;
use serde::{Serialize, Deserialize};

use crate::Float;

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct FeatureParameters {
    pub resize_width: u32,
    pub resize_height: u32,
    pub histogram_bins: usize,
    pub lightness_range: (Float,Float),
    pub canny_sigma: Float,
    pub canny_low_threshold: Float,
    pub canny_high_threshold: Float
}

impl Default for FeatureParameters {
    fn default() -> Self {
        FeatureParameters {
            resize_width: 128,
            resize_height: 128,
            histogram_bins: 16,
            lightness_range: (0.0, 100.0),
            canny_sigma: 1.0,
            canny_low_threshold: 0.1,
            canny_high_threshold: 0.2
        }
    }
}

impl FeatureParameters {
    pub fn feature_length(&self) -> usize {
        self.histogram_bins + 1
    }
}

impl fmt::Display for FeatureParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "size_{}x{}_bins_{}_sigma_{}_low_{}_high_{}", self.resize_width, self.resize_height, self.histogram_bins, self.canny_sigma, self.canny_low_threshold, self.canny_high_threshold)
    }
}
