extern crate nalgebra as na;

use na::DMatrix;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::Float;

const GRADIENT_CLIP: Float = 4.0;

/// One undirected membership counted in both directions, as the graph stores it.
#[derive(Debug,Clone,Copy)]
pub struct Edge {
    pub head: usize,
    pub tail: usize,
    pub weight: Float
}

pub struct LayoutOptimizer {
    pub a: Float,
    pub b: Float,
    pub gamma: Float,
    pub initial_alpha: Float,
    pub negative_sample_rate: usize,
    pub n_epochs: usize
}

/// Edge i is sampled every `epochs_per_sample[i]` epochs; the heaviest edge every epoch.
/// Edges too light to be sampled once get -1.
pub fn make_epochs_per_sample(weights: &[Float], n_epochs: usize) -> Vec<Float> {
    let max = weights.iter().cloned().fold(0.0, Float::max);
    weights.iter().map(|&w| {
        let n_samples = match max > 0.0 {
            true => n_epochs as Float*(w/max),
            false => 0.0
        };
        match n_samples > 0.0 {
            true => n_epochs as Float/n_samples,
            false => -1.0
        }
    }).collect()
}

fn clip(value: Float) -> Float {
    value.clamp(-GRADIENT_CLIP, GRADIENT_CLIP)
}

pub fn random_layout(n: usize, dim: usize, rng: &mut SmallRng) -> DMatrix<Float> {
    DMatrix::<Float>::from_fn(n, dim, |_,_| rng.gen_range(-10.0..10.0))
}

/// Maps every column linearly onto [0, 10]. Constant columns collapse to 0.
pub fn rescale_columns(embedding: &mut DMatrix<Float>) -> () {
    for mut column in embedding.column_iter_mut() {
        let min = column.min();
        let max = column.max();
        let range = max - min;
        for v in column.iter_mut() {
            *v = match range > 0.0 {
                true => 10.0*(*v - min)/range,
                false => 0.0
            };
        }
    }
}

impl LayoutOptimizer {

    fn attractive_coefficient(&self, dist_squared: Float) -> Float {
        match dist_squared > 0.0 {
            true => -2.0*self.a*self.b*dist_squared.powf(self.b - 1.0)/(self.a*dist_squared.powf(self.b) + 1.0),
            false => 0.0
        }
    }

    fn repulsive_coefficient(&self, dist_squared: Float) -> Float {
        2.0*self.gamma*self.b/((0.001 + dist_squared)*(self.a*dist_squared.powf(self.b) + 1.0))
    }

    /// Stochastic gradient descent on the fuzzy set cross entropy. Both endpoints of a
    /// positive edge move; negative samples only push the head.
    pub fn optimize(&self, embedding: &mut DMatrix<Float>, edges: &[Edge], rng: &mut SmallRng) -> () {
        let n_vertices = embedding.nrows();
        let dim = embedding.ncols();
        let weights = edges.iter().map(|e| e.weight).collect::<Vec<Float>>();
        let epochs_per_sample = make_epochs_per_sample(&weights, self.n_epochs);
        let epochs_per_negative_sample = epochs_per_sample.iter().map(|&e| e/(self.negative_sample_rate as Float)).collect::<Vec<Float>>();
        let mut epoch_of_next_sample = epochs_per_sample.clone();
        let mut epoch_of_next_negative_sample = epochs_per_negative_sample.clone();

        let mut current = vec![0.0; dim];
        let mut alpha = self.initial_alpha;

        for n in 0..self.n_epochs {
            let epoch = n as Float;
            for (i, edge) in edges.iter().enumerate() {
                if epochs_per_sample[i] <= 0.0 || epoch_of_next_sample[i] > epoch {
                    continue;
                }

                let (j, k) = (edge.head, edge.tail);
                let dist_squared = squared_distance(embedding, j, k);
                let grad_coeff = self.attractive_coefficient(dist_squared);
                for d in 0..dim {
                    let grad_d = clip(grad_coeff*(embedding[(j,d)] - embedding[(k,d)]));
                    embedding[(j,d)] += grad_d*alpha;
                    embedding[(k,d)] -= grad_d*alpha;
                }

                epoch_of_next_sample[i] += epochs_per_sample[i];

                let n_neg_samples = ((epoch - epoch_of_next_negative_sample[i])/epochs_per_negative_sample[i]) as isize;
                for _ in 0..n_neg_samples.max(0) {
                    let k = rng.gen_range(0..n_vertices);
                    for d in 0..dim {
                        current[d] = embedding[(j,d)];
                    }
                    let dist_squared = squared_distance(embedding, j, k);

                    let grad_coeff = match dist_squared > 0.0 {
                        true => self.repulsive_coefficient(dist_squared),
                        false if j == k => continue,
                        false => 0.0
                    };

                    for d in 0..dim {
                        let grad_d = match grad_coeff > 0.0 {
                            true => clip(grad_coeff*(current[d] - embedding[(k,d)])),
                            false => 0.0
                        };
                        embedding[(j,d)] += grad_d*alpha;
                    }
                }

                epoch_of_next_negative_sample[i] += n_neg_samples as Float*epochs_per_negative_sample[i];
            }

            alpha = self.initial_alpha*(1.0 - epoch/(self.n_epochs as Float));
        }
    }
}

fn squared_distance(embedding: &DMatrix<Float>, j: usize, k: usize) -> Float {
    (embedding.row(j) - embedding.row(k)).norm_squared()
}
