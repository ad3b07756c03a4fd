extern crate nalgebra as na;
extern crate nalgebra_sparse;

use std::cmp::Ordering;
use std::collections::VecDeque;
use na::{DMatrix, DVector, SymmetricEigen};
use nalgebra_sparse::CsrMatrix;

use crate::Float;

/// Above this many vertices the dense eigendecomposition is not attempted.
pub const DENSE_EIGEN_LIMIT: usize = 2048;

pub fn connected_component_count(graph: &CsrMatrix<Float>) -> usize {
    let n = graph.nrows();
    let mut visited = vec![false; n];
    let mut count = 0;
    let mut queue = VecDeque::<usize>::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        count += 1;
        visited[start] = true;
        queue.push_back(start);
        while let Some(vertex) = queue.pop_front() {
            let row = graph.row(vertex);
            for (&neighbor, &weight) in row.col_indices().iter().zip(row.values().iter()) {
                if weight > 0.0 && !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    count
}

/// Eigenvectors 1..=dim of the symmetric normalized Laplacian `I - D^-1/2 A D^-1/2`,
/// ordered by ascending eigenvalue. `None` when the graph has an isolated vertex or is too
/// small to provide `dim` non trivial eigenvectors.
pub fn spectral_layout(graph: &CsrMatrix<Float>, dim: usize) -> Option<DMatrix<Float>> {
    let n = graph.nrows();
    if n <= dim + 1 || n > DENSE_EIGEN_LIMIT {
        return None;
    }

    let mut degrees = DVector::<Float>::zeros(n);
    for (i, _, &v) in graph.triplet_iter() {
        degrees[i] += v;
    }
    if degrees.iter().any(|&d| d <= 0.0) {
        return None;
    }
    let inv_sqrt_degrees = degrees.map(|d| 1.0/d.sqrt());

    let mut laplacian = DMatrix::<Float>::identity(n, n);
    for (i, j, &v) in graph.triplet_iter() {
        laplacian[(i,j)] -= inv_sqrt_degrees[i]*v*inv_sqrt_degrees[j];
    }

    let eigen = SymmetricEigen::new(laplacian);
    let mut order = (0..n).collect::<Vec<usize>>();
    order.sort_by(|&a,&b| eigen.eigenvalues[a].partial_cmp(&eigen.eigenvalues[b]).unwrap_or(Ordering::Equal));

    let mut layout = DMatrix::<Float>::zeros(n, dim);
    for (col, &eigen_index) in order.iter().skip(1).take(dim).enumerate() {
        layout.set_column(col, &eigen.eigenvectors.column(eigen_index));
    }

    match layout.iter().all(|v| v.is_finite()) {
        true => Some(layout),
        false => None
    }
}
