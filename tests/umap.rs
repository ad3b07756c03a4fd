use nalgebra::DMatrix;
use image_atlas::AtlasError;
use image_atlas::embedding::{Umap, umap_runtime_parameters::UmapParameters};
use image_atlas::embedding::nearest_neighbors::NearestNeighbors;
use image_atlas::embedding::fuzzy_simplicial_set::{fuzzy_simplicial_set, smooth_knn_dist};
use image_atlas::embedding::curve_fit::find_ab_params;
use image_atlas::embedding::layout::{make_epochs_per_sample, rescale_columns};
use image_atlas::embedding::spectral::{DENSE_EIGEN_LIMIT, connected_component_count, spectral_layout};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Points on two noisy lines, deterministic.
fn sample_data(n: usize) -> DMatrix<f64> {
    DMatrix::<f64>::from_fn(n, 5, |r,c| {
        let t = r as f64 / n as f64;
        let offset = if r % 2 == 0 {0.0} else {3.0};
        offset + t*(c as f64 + 1.0) + ((r*31 + c*17) % 7) as f64 * 0.01
    })
}

#[test]
fn nearest_neighbors_are_sorted_and_include_self() {
    let data = sample_data(20);
    let neighbors = NearestNeighbors::new(&data, 5);
    assert_eq!(neighbors.indices.shape(), (20,5));
    for i in 0..20 {
        assert_eq!(neighbors.indices[(i,0)], i);
        assert_eq!(neighbors.distances[(i,0)], 0.0);
        for j in 1..5 {
            assert!(neighbors.distances[(i,j-1)] <= neighbors.distances[(i,j)]);
        }
    }
}

#[test]
fn smooth_knn_dist_hits_target() {
    let data = sample_data(30);
    let neighbors = NearestNeighbors::new(&data, 8);
    let smooth = smooth_knn_dist(&neighbors.distances, 8.0, 1.0);
    for i in 0..30 {
        assert!(smooth.rhos[i] > 0.0);
        assert!(smooth.sigmas[i] > 0.0);
        let psum: f64 = (1..8).map(|j| {
            let d = neighbors.distances[(i,j)] - smooth.rhos[i];
            if d > 0.0 {(-(d/smooth.sigmas[i])).exp()} else {1.0}
        }).sum();
        assert!((psum - 8f64.log2()).abs() < 1e-3);
    }
}

#[test]
fn fuzzy_graph_is_symmetric_with_unit_weights() {
    let data = sample_data(30);
    let neighbors = NearestNeighbors::new(&data, 6);
    let graph = fuzzy_simplicial_set(&neighbors, 1.0, 1.0);
    assert!(graph.nnz() > 0);
    let dense = nalgebra::DMatrix::<f64>::from(&graph);
    for i in 0..30 {
        assert_eq!(dense[(i,i)], 0.0);
        for j in 0..30 {
            assert!((dense[(i,j)] - dense[(j,i)]).abs() < 1e-12);
            assert!(dense[(i,j)] >= 0.0 && dense[(i,j)] <= 1.0);
        }
    }
}

#[test]
fn ab_params_match_known_fit() {
    let (a, b) = find_ab_params(1.0, 0.1);
    assert!((a - 1.577).abs() < 0.02, "a = {}", a);
    assert!((b - 0.895).abs() < 0.01, "b = {}", b);

    let (a_wide, b_wide) = find_ab_params(1.0, 0.12);
    assert!(a_wide > 0.0 && b_wide > 0.0);
    assert!(a_wide < a);
}

#[test]
fn epochs_per_sample_scale_with_weight() {
    let epochs = make_epochs_per_sample(&[1.0, 0.5, 0.0], 200);
    assert_eq!(epochs[0], 1.0);
    assert_eq!(epochs[1], 2.0);
    assert_eq!(epochs[2], -1.0);
}

#[test]
fn rescale_maps_columns_to_zero_ten() {
    let mut embedding = DMatrix::<f64>::from_row_slice(3, 2, &[-1.0, 5.0, 0.0, 5.0, 3.0, 5.0]);
    rescale_columns(&mut embedding);
    assert_eq!(embedding[(0,0)], 0.0);
    assert_eq!(embedding[(2,0)], 10.0);
    assert_eq!(embedding[(1,0)], 2.5);
    assert!(embedding.column(1).iter().all(|&v| v == 0.0));
}

#[test]
fn spectral_layout_on_connected_graph() {
    let data = sample_data(40);
    let neighbors = NearestNeighbors::new(&data, 10);
    let graph = fuzzy_simplicial_set(&neighbors, 1.0, 1.0);
    if connected_component_count(&graph) == 1 {
        let layout = spectral_layout(&graph, 2).unwrap();
        assert_eq!(layout.shape(), (40,2));
        assert!(layout.iter().all(|v| v.is_finite()));
    }
    assert!(spectral_layout(&graph.filter(|i,j,_| i < 3 && j < 3), 2).is_none());
}

/// Two clusters of `n_per_cluster` points, a thousand units apart.
fn separated_clusters(n_per_cluster: usize) -> DMatrix<f64> {
    DMatrix::<f64>::from_fn(2*n_per_cluster, 5, |r,c| {
        let offset = if r < n_per_cluster {0.0} else {1000.0};
        offset + ((r*13 + c*7) % 11) as f64 * 0.1 + r as f64 * 0.01
    })
}

#[test]
fn separated_clusters_fall_back_to_random_initialisation() {
    let data = separated_clusters(30);
    let neighbors = NearestNeighbors::new(&data, 10);
    let graph = fuzzy_simplicial_set(&neighbors, 1.0, 1.0);
    assert!(connected_component_count(&graph) > 1);
    assert!(spectral_layout(&graph, 2).is_none());

    let parameters = UmapParameters { n_neighbors: 10, n_epochs: Some(50), ..UmapParameters::default() };
    let first = Umap::new(parameters.clone()).fit_transform(&data).unwrap();
    let second = Umap::new(parameters).fit_transform(&data).unwrap();
    assert_eq!(first.shape(), (60,2));
    assert!(first.iter().all(|v| v.is_finite()));
    assert_eq!(first, second);
}

#[test]
fn spectral_layout_skips_large_graphs() {
    let n = DENSE_EIGEN_LIMIT + 1;
    let mut ring = CooMatrix::<f64>::new(n, n);
    for i in 0..n {
        ring.push(i, (i + 1) % n, 1.0);
        ring.push((i + 1) % n, i, 1.0);
    }
    let graph = CsrMatrix::from(&ring);
    assert_eq!(connected_component_count(&graph), 1);
    assert!(spectral_layout(&graph, 2).is_none());
}

#[test]
fn empty_input_is_embedding_error() {
    let umap = Umap::new(UmapParameters::default());
    let result = umap.fit_transform(&DMatrix::<f64>::zeros(0, 17));
    assert!(matches!(result, Err(AtlasError::Embedding(_))));
}

#[test]
fn non_finite_input_is_embedding_error() {
    let mut data = sample_data(10);
    data[(3,2)] = f64::NAN;
    let result = Umap::new(UmapParameters::default()).fit_transform(&data);
    assert!(matches!(result, Err(AtlasError::Embedding(_))));
}

#[test]
fn single_sample_sits_at_origin() {
    let embedding = Umap::new(UmapParameters::default()).fit_transform(&sample_data(1)).unwrap();
    assert_eq!(embedding.shape(), (1,2));
    assert!(embedding.iter().all(|&v| v == 0.0));
}

#[test]
fn two_samples_have_no_neighbour_graph() {
    let result = Umap::new(UmapParameters::default()).fit_transform(&sample_data(2));
    assert!(matches!(result, Err(AtlasError::Embedding(_))));
}

#[test]
fn fewer_samples_than_neighbours_still_embed() {
    let embedding = Umap::new(UmapParameters::default()).fit_transform(&sample_data(3)).unwrap();
    assert_eq!(embedding.shape(), (3,2));
    assert!(embedding.iter().all(|v| v.is_finite()));
}

#[test]
fn embedding_is_deterministic() {
    let data = sample_data(60);
    let parameters = UmapParameters { n_epochs: Some(100), ..UmapParameters::default() };
    let first = Umap::new(parameters.clone()).fit_transform(&data).unwrap();
    let second = Umap::new(parameters).fit_transform(&data).unwrap();
    assert_eq!(first.shape(), (60,2));
    assert!(first.iter().all(|v| v.is_finite()));
    assert_eq!(first, second);
}

#[test]
fn seed_changes_layout() {
    let data = sample_data(40);
    let first = Umap::new(UmapParameters { n_epochs: Some(50), ..UmapParameters::default() }).fit_transform(&data).unwrap();
    let second = Umap::new(UmapParameters { n_epochs: Some(50), random_state: 7, ..UmapParameters::default() }).fit_transform(&data).unwrap();
    assert_ne!(first, second);
}
