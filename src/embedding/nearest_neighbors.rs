extern crate nalgebra as na;

use std::cmp::Ordering;
use na::DMatrix;

use crate::Float;

/// Exact k nearest neighbours under the euclidean metric. Every point is part of its own
/// neighbourhood. Rows are sorted by ascending distance, ties by index.
#[derive(Debug,Clone)]
pub struct NearestNeighbors {
    pub indices: DMatrix<usize>,
    pub distances: DMatrix<Float>
}

impl NearestNeighbors {

    pub fn k(&self) -> usize {
        self.indices.ncols()
    }

    pub fn new(data: &DMatrix<Float>, k: usize) -> NearestNeighbors {
        let n = data.nrows();
        assert!(k <= n);

        let mut indices = DMatrix::<usize>::zeros(n, k);
        let mut distances = DMatrix::<Float>::zeros(n, k);
        let mut candidates = Vec::<(Float,usize)>::with_capacity(n);

        for i in 0..n {
            candidates.clear();
            for j in 0..n {
                let distance = match i == j {
                    true => 0.0,
                    false => (data.row(i) - data.row(j)).norm()
                };
                candidates.push((distance,j));
            }
            candidates.sort_by(|a,b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal).then(a.1.cmp(&b.1)));

            for (col,&(distance,j)) in candidates.iter().take(k).enumerate() {
                indices[(i,col)] = j;
                distances[(i,col)] = distance;
            }
        }

        NearestNeighbors { indices, distances }
    }
}
