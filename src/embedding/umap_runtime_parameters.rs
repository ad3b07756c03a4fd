use std::fmt;
use serde::{Serialize, Deserialize};

use crate::Float;

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct UmapParameters {
    pub n_neighbors: usize,
    pub n_components: usize,
    pub min_dist: Float,
    pub spread: Float,
    pub random_state: u64,
    /// 500 for up to 10000 samples, 200 above that
    pub n_epochs: Option<usize>,
    pub learning_rate: Float,
    pub negative_sample_rate: usize,
    pub repulsion_strength: Float,
    pub local_connectivity: Float,
    pub set_op_mix_ratio: Float
}

impl Default for UmapParameters {
    fn default() -> Self {
        UmapParameters {
            n_neighbors: 25,
            n_components: 2,
            min_dist: 0.12,
            spread: 1.0,
            random_state: 42,
            n_epochs: None,
            learning_rate: 1.0,
            negative_sample_rate: 5,
            repulsion_strength: 1.0,
            local_connectivity: 1.0,
            set_op_mix_ratio: 1.0
        }
    }
}

impl UmapParameters {
    pub fn epochs_for(&self, sample_count: usize) -> usize {
        match self.n_epochs {
            Some(n_epochs) => n_epochs,
            None if sample_count <= 10000 => 500,
            None => 200
        }
    }
}

impl fmt::Display for UmapParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "k_{}_dim_{}_min_dist_{}_spread_{}_seed_{}", self.n_neighbors, self.n_components, self.min_dist, self.spread, self.random_state)
    }
}
