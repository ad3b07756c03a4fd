extern crate nalgebra as na;

use std::path::{Path,PathBuf};
use na::DMatrix;
use tracing::{debug,info};

use crate::{io, AtlasError, Float, Result};
use self::{feature_vector::FeatureVector, feature_runtime_parameters::FeatureParameters};

pub mod histogram;
pub mod feature_vector;
pub mod feature_runtime_parameters;

pub fn extract_features(file_path: &Path, parameters: &FeatureParameters) -> Result<FeatureVector> {
    let image = io::load_image_as_rgb(file_path, parameters.resize_width, parameters.resize_height)?;
    let feature = FeatureVector::from_rgb_image(&image, parameters);
    debug!("{:?}: edge density {:.4}", file_path, feature.edge_density());
    Ok(feature)
}

/// Row i holds the features of `file_paths[i]`. Extraction runs in order and stops at the first failure.
pub fn extract_feature_matrix(file_paths: &[PathBuf], parameters: &FeatureParameters) -> Result<DMatrix<Float>> {
    let features = file_paths.iter().map(|file_path| extract_features(file_path, parameters)).collect::<Result<Vec<FeatureVector>>>()?;
    let matrix = stack_features(&features, parameters.feature_length())?;
    info!("feature matrix {}x{}", matrix.nrows(), matrix.ncols());
    Ok(matrix)
}

/// Stacks feature vectors as rows of an `n x cols` matrix. Every vector must have `cols` entries.
pub fn stack_features(features: &[FeatureVector], cols: usize) -> Result<DMatrix<Float>> {
    let mut matrix = DMatrix::<Float>::zeros(features.len(), cols);
    for (row, feature) in features.iter().enumerate() {
        if feature.len() != cols {
            return Err(AtlasError::Embedding(format!("feature row {} has {} entries, expected {}", row, feature.len(), cols)));
        }
        for (col, &value) in feature.data.iter().enumerate() {
            matrix[(row,col)] = value;
        }
    }
    Ok(matrix)
}
