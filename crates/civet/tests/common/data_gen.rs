//! Data generation utilities for testing.

use rand::prelude::*;

use civet::LabelPartition;

/// The four corners of the unit square with centroids on its left and right
/// edges; the worked example used throughout the measure tests.
pub fn unit_square() -> (Vec<Vec<f64>>, Vec<Vec<f64>>, LabelPartition) {
    let data = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
    let centroids = vec![vec![0.0, 0.5], vec![1.0, 0.5]];
    let partition = LabelPartition::new(vec![Some(0), Some(0), Some(1), Some(1)], 2)
        .unwrap_or_else(|e| unreachable!("{e}"));
    (data, centroids, partition)
}

/// `k` well-separated Gaussian-ish blobs of `per_cluster` points each, with
/// the ground-truth labels.
pub fn blobs(k: usize, per_cluster: usize, seed: u64) -> (Vec<Vec<f64>>, LabelPartition) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(k * per_cluster);
    let mut labels = Vec::with_capacity(k * per_cluster);

    for j in 0..k {
        let center = (j * 100) as f64;
        for _ in 0..per_cluster {
            let x: f64 = rng.gen_range(-1.0..1.0);
            let y: f64 = rng.gen_range(-1.0..1.0);
            data.push(vec![center + x, center + y]);
            labels.push(Some(j));
        }
    }

    let partition = LabelPartition::new(labels, k).unwrap_or_else(|e| unreachable!("{e}"));
    (data, partition)
}

/// A random partition of `cardinality` instances into up to `k` clusters,
/// leaving some instances unassigned.
pub fn random_partition(cardinality: usize, k: usize, seed: u64) -> LabelPartition {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let labels = (0..cardinality)
        .map(|_| {
            if rng.gen_bool(0.1) {
                None
            } else {
                Some(rng.gen_range(0..k))
            }
        })
        .collect();
    LabelPartition::new(labels, k).unwrap_or_else(|e| unreachable!("{e}"))
}
