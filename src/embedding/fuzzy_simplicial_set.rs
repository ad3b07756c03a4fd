extern crate nalgebra as na;
extern crate nalgebra_sparse;

use na::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix, SparseEntry};

use crate::Float;
use super::nearest_neighbors::NearestNeighbors;

const SMOOTH_K_TOLERANCE: Float = 1e-5;
const MIN_K_DIST_SCALE: Float = 1e-3;
const BINARY_SEARCH_ITERATIONS: usize = 64;

/// Per point normalisation of the neighbour distances.
/// `rhos[i]` is the distance to the `local_connectivity`-th non zero neighbour and `sigmas[i]`
/// is chosen so that the memberships of row i sum to `log2(k)`.
#[derive(Debug,Clone)]
pub struct SmoothKnnDistances {
    pub sigmas: DVector<Float>,
    pub rhos: DVector<Float>
}

pub fn smooth_knn_dist(distances: &DMatrix<Float>, k: Float, local_connectivity: Float) -> SmoothKnnDistances {
    let n = distances.nrows();
    let cols = distances.ncols();
    let target = k.log2();
    let mean_distances = match distances.len() {
        0 => 0.0,
        _ => distances.mean()
    };

    let mut sigmas = DVector::<Float>::zeros(n);
    let mut rhos = DVector::<Float>::zeros(n);

    for i in 0..n {
        let ith_distances = distances.row(i);
        let non_zero = ith_distances.iter().cloned().filter(|&d| d > 0.0).collect::<Vec<Float>>();

        let mut rho = 0.0;
        if non_zero.len() as Float >= local_connectivity {
            let index = local_connectivity.floor() as usize;
            let interpolation = local_connectivity - index as Float;
            if index > 0 {
                rho = non_zero[index-1];
                if interpolation > SMOOTH_K_TOLERANCE {
                    rho += interpolation*(non_zero[index] - non_zero[index-1]);
                }
            } else {
                rho = interpolation*non_zero[0];
            }
        } else if !non_zero.is_empty() {
            rho = non_zero.iter().cloned().fold(Float::MIN, Float::max);
        }

        let mut lo = 0.0;
        let mut hi = Float::INFINITY;
        let mut mid = 1.0;
        for _ in 0..BINARY_SEARCH_ITERATIONS {
            let mut psum = 0.0;
            for j in 1..cols {
                let d = distances[(i,j)] - rho;
                psum += match d > 0.0 {
                    true => (-(d/mid)).exp(),
                    false => 1.0
                };
            }

            if (psum - target).abs() < SMOOTH_K_TOLERANCE {
                break;
            }

            if psum > target {
                hi = mid;
                mid = (lo + hi)/2.0;
            } else {
                lo = mid;
                mid = match hi == Float::INFINITY {
                    true => mid*2.0,
                    false => (lo + hi)/2.0
                };
            }
        }

        let floor = match rho > 0.0 {
            true => MIN_K_DIST_SCALE*ith_distances.mean(),
            false => MIN_K_DIST_SCALE*mean_distances
        };

        sigmas[i] = mid.max(floor);
        rhos[i] = rho;
    }

    SmoothKnnDistances { sigmas, rhos }
}

/// Directed membership strength of every neighbour edge. Self loops get zero.
pub fn compute_membership_strengths(neighbors: &NearestNeighbors, smooth: &SmoothKnnDistances) -> CooMatrix<Float> {
    let n = neighbors.indices.nrows();
    let mut coo = CooMatrix::<Float>::new(n, n);

    for i in 0..n {
        for j in 0..neighbors.k() {
            let neighbor = neighbors.indices[(i,j)];
            if neighbor == i {
                continue;
            }

            let d = neighbors.distances[(i,j)] - smooth.rhos[i];
            let value = match d <= 0.0 || smooth.sigmas[i] == 0.0 {
                true => 1.0,
                false => (-(d/smooth.sigmas[i])).exp()
            };

            if value > 0.0 {
                coo.push(i, neighbor, value);
            }
        }
    }

    coo
}

fn value_at(matrix: &CsrMatrix<Float>, row: usize, col: usize) -> Float {
    match matrix.get_entry(row, col) {
        Some(SparseEntry::NonZero(v)) => *v,
        _ => 0.0
    }
}

/// Combines the directed memberships with the fuzzy union `P + P^T - P*P^T`
/// (blended with the intersection by `set_op_mix_ratio`). The result is symmetric.
pub fn fuzzy_simplicial_set(neighbors: &NearestNeighbors, local_connectivity: Float, set_op_mix_ratio: Float) -> CsrMatrix<Float> {
    let n = neighbors.indices.nrows();
    let smooth = smooth_knn_dist(&neighbors.distances, neighbors.k() as Float, local_connectivity);
    let membership = CsrMatrix::from(&compute_membership_strengths(neighbors, &smooth));
    let transpose = membership.transpose();

    let mut union = CooMatrix::<Float>::new(n, n);
    for (i, j, &v) in membership.triplet_iter() {
        let v_t = value_at(&transpose, i, j);
        let product = v*v_t;
        let value = set_op_mix_ratio*(v + v_t - product) + (1.0 - set_op_mix_ratio)*product;
        if value > 0.0 {
            union.push(i, j, value);
        }
    }

    for (i, j, &v_t) in transpose.triplet_iter() {
        if value_at(&membership, i, j) == 0.0 {
            let value = set_op_mix_ratio*v_t;
            if value > 0.0 {
                union.push(i, j, value);
            }
        }
    }

    CsrMatrix::from(&union)
}
