extern crate nalgebra as na;

use std::path::Path;
use na::DMatrix;
use tracing::{debug,info};

use crate::{Float, Result};
use crate::io::{self, Coordinate};
use crate::descriptor::{extract_feature_matrix, feature_runtime_parameters::FeatureParameters};
use crate::embedding::{Umap, umap_runtime_parameters::UmapParameters};

pub const MANIFEST_FILE: &str = "files.txt";
pub const OUTPUT_FILE: &str = "coords.csv";

#[derive(Debug,Clone,Default)]
pub struct Pipeline {
    pub feature_parameters: FeatureParameters,
    pub umap_parameters: UmapParameters
}

impl Pipeline {

    /// Reads the manifest, extracts one feature row per entry, embeds the rows and writes
    /// `index,x,y`. Nothing is written unless every earlier stage succeeded.
    /// Returns the number of rows written.
    pub fn run(&self, manifest_path: &Path, output_path: &Path) -> Result<usize> {
        self.log_parameters();

        let file_paths = io::load_manifest(manifest_path)?;
        let features = extract_feature_matrix(&file_paths, &self.feature_parameters)?;
        let embedding = self.project(&features)?;
        let coordinates = to_coordinates(&embedding);
        io::write_coordinates(output_path, &coordinates)?;

        info!("{} images mapped", coordinates.len());
        Ok(coordinates.len())
    }

    pub fn project(&self, features: &DMatrix<Float>) -> Result<DMatrix<Float>> {
        Umap::new(self.umap_parameters.clone()).fit_transform(features)
    }

    fn log_parameters(&self) -> () {
        match serde_yaml::to_string(&self.feature_parameters) {
            Ok(s) => debug!("feature parameters:\n{}", s),
            Err(e) => debug!("feature parameters {} (yaml failed: {})", self.feature_parameters, e)
        }
        match serde_yaml::to_string(&self.umap_parameters) {
            Ok(s) => debug!("umap parameters:\n{}", s),
            Err(e) => debug!("umap parameters {} (yaml failed: {})", self.umap_parameters, e)
        }
    }
}

/// Row i of the embedding becomes index i.
pub fn to_coordinates(embedding: &DMatrix<Float>) -> Vec<Coordinate> {
    assert!(embedding.ncols() >= 2);
    embedding.row_iter().enumerate().map(|(index, row)| Coordinate { index, x: row[0], y: row[1] }).collect()
}

pub fn run(manifest_path: &Path, output_path: &Path) -> Result<usize> {
    Pipeline::default().run(manifest_path, output_path)
}
