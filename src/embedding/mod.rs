extern crate nalgebra as na;
extern crate nalgebra_sparse;

use na::DMatrix;
use nalgebra_sparse::CsrMatrix;
use rand::{SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug,info,warn};

use crate::{AtlasError, Float, Result};
use self::{
    nearest_neighbors::NearestNeighbors,
    fuzzy_simplicial_set::fuzzy_simplicial_set,
    curve_fit::find_ab_params,
    spectral::{connected_component_count, spectral_layout},
    layout::{Edge, LayoutOptimizer, random_layout, rescale_columns},
    umap_runtime_parameters::UmapParameters
};

pub mod nearest_neighbors;
pub mod fuzzy_simplicial_set;
pub mod curve_fit;
pub mod spectral;
pub mod layout;
pub mod umap_runtime_parameters;

const SPECTRAL_NOISE_STD: Float = 1e-4;

/// Uniform manifold approximation and projection.
/// All randomness comes from one generator seeded with `random_state`, so equal input
/// gives equal output.
pub struct Umap {
    pub parameters: UmapParameters
}

impl Umap {

    pub fn new(parameters: UmapParameters) -> Umap {
        Umap { parameters }
    }

    /// Projects every row of `data` to `n_components` coordinates. Row order is kept.
    ///
    /// One sample is placed at the origin. When there are no more samples than
    /// `n_neighbors` the neighbourhood shrinks to `n - 1`. An empty input, non finite
    /// values or a neighbour graph without edges are errors.
    pub fn fit_transform(&self, data: &DMatrix<Float>) -> Result<DMatrix<Float>> {
        let n = data.nrows();
        let dim = self.parameters.n_components;

        if n == 0 {
            return Err(AtlasError::Embedding("no samples to embed".to_string()));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(AtlasError::Embedding("feature matrix contains non finite values".to_string()));
        }
        if self.parameters.n_neighbors < 2 {
            return Err(AtlasError::Embedding(format!("n_neighbors must be at least 2, got {}", self.parameters.n_neighbors)));
        }
        if n == 1 {
            return Ok(DMatrix::<Float>::zeros(1, dim));
        }

        let k = match n <= self.parameters.n_neighbors {
            true => {
                warn!("n_neighbors {} is not smaller than the sample count {}, using {}", self.parameters.n_neighbors, n, n-1);
                n - 1
            },
            false => self.parameters.n_neighbors
        };

        let mut rng = SmallRng::seed_from_u64(self.parameters.random_state);

        let neighbors = NearestNeighbors::new(data, k);
        let graph = fuzzy_simplicial_set(&neighbors, self.parameters.local_connectivity, self.parameters.set_op_mix_ratio);
        debug!("fuzzy graph: {} vertices, {} edges, k {}", n, graph.nnz(), k);

        let n_epochs = self.parameters.epochs_for(n);
        let graph = prune_graph(&graph, n_epochs);
        if graph.nnz() == 0 {
            return Err(AtlasError::Embedding(format!("neighbour graph of {} samples has no edges", n)));
        }

        let mut embedding = self.initialize(&graph, dim, &mut rng)?;
        rescale_columns(&mut embedding);

        let (a, b) = find_ab_params(self.parameters.spread, self.parameters.min_dist);
        debug!("curve parameters a {:.6} b {:.6}, {} epochs", a, b, n_epochs);

        let edges = graph.triplet_iter().map(|(head, tail, &weight)| Edge { head, tail, weight }).collect::<Vec<Edge>>();
        let optimizer = LayoutOptimizer {
            a,
            b,
            gamma: self.parameters.repulsion_strength,
            initial_alpha: self.parameters.learning_rate,
            negative_sample_rate: self.parameters.negative_sample_rate,
            n_epochs
        };
        optimizer.optimize(&mut embedding, &edges, &mut rng);

        info!("embedded {} samples into {} dimensions", n, dim);
        Ok(embedding)
    }

    fn initialize(&self, graph: &CsrMatrix<Float>, dim: usize, rng: &mut SmallRng) -> Result<DMatrix<Float>> {
        let n = graph.nrows();
        let components = connected_component_count(graph);
        let spectral = match components {
            1 => spectral_layout(graph, dim),
            _ => None
        };

        match spectral {
            Some(layout) => {
                let max_abs = layout.amax();
                let expansion = match max_abs > 0.0 {
                    true => 10.0/max_abs,
                    false => 1.0
                };
                let noise = Normal::new(0.0, SPECTRAL_NOISE_STD).map_err(|e| AtlasError::Embedding(e.to_string()))?;
                Ok(layout.map(|v| v*expansion + noise.sample(&mut *rng)))
            },
            None => {
                warn!("spectral initialisation not possible ({} vertices, {} components), falling back to random initialisation", n, components);
                Ok(random_layout(n, dim, rng))
            }
        }
    }
}

/// Drops edges too weak to be sampled once in `n_epochs`.
fn prune_graph(graph: &CsrMatrix<Float>, n_epochs: usize) -> CsrMatrix<Float> {
    let max = graph.values().iter().cloned().fold(0.0, Float::max);
    let threshold = max/(n_epochs as Float);
    graph.filter(|_, _, &v| v >= threshold && v > 0.0)
}
