//! Pairwise dissimilarities between the instances of a dataset.
//!
//! The measures that need many pairwise distances (Dunn, Silhouette, the
//! CS-measure) are written against the [`Dissimilarity`] trait so the caller
//! chooses the strategy: precompute the full matrix once per generation and
//! amortize an expensive metric, or compute distances on the fly and spend
//! no memory.

use distances::Number;
use mt_logger::{mt_log, Level};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::metric::{Metric, ParMetric};

use super::Dataset;

/// A source of pairwise dissimilarities between indexed instances.
///
/// Implementations must be symmetric (`get(i, j) == get(j, i)`) and zero on
/// the diagonal.
pub trait Dissimilarity<T: Number> {
    /// The number of instances this source covers.
    fn cardinality(&self) -> usize;

    /// The dissimilarity between instances `i` and `j`.
    ///
    /// The implementor may choose to panic if an index is out of bounds.
    fn get(&self, i: usize, j: usize) -> T;
}

/// A precomputed pairwise dissimilarity matrix.
///
/// Only the strict lower triangle is stored, in condensed row-major order, so
/// the memory cost is `n * (n - 1) / 2` values. Construction assumes the
/// metric is symmetric.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DissimilarityMatrix<T: Number> {
    /// The strict lower triangle, row by row.
    values: Vec<T>,
    /// The number of instances.
    cardinality: usize,
}

impl<T: Number> DissimilarityMatrix<T> {
    /// Computes the pairwise dissimilarity matrix of a dataset.
    pub fn new<I, D: Dataset<I>, M: Metric<I, T>>(data: &D, metric: &M) -> Self {
        let cardinality = data.cardinality();
        mt_log!(
            Level::Debug,
            "Computing the pairwise {} matrix over {cardinality} instances...",
            metric.name()
        );
        let values = (0..cardinality)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .map(|(i, j)| data.one_to_one(i, j, metric))
            .collect();
        Self { values, cardinality }
    }

    /// Parallel version of [`DissimilarityMatrix::new`].
    pub fn par_new<I: Send + Sync, D: Dataset<I> + Send + Sync, M: ParMetric<I, T>>(data: &D, metric: &M) -> Self {
        let cardinality = data.cardinality();
        mt_log!(
            Level::Debug,
            "Computing the pairwise {} matrix over {cardinality} instances in parallel...",
            metric.name()
        );
        let values = (0..cardinality)
            .into_par_iter()
            .flat_map_iter(|i| (0..i).map(move |j| (i, j)))
            .map(|(i, j)| metric.par_distance(data.get(i), data.get(j)))
            .collect();
        Self { values, cardinality }
    }

    /// The position of `(i, j)` in the condensed lower triangle.
    ///
    /// The caller guarantees `i != j`.
    fn position(&self, i: usize, j: usize) -> usize {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        hi * (hi - 1) / 2 + lo
    }
}

impl<T: Number> Dissimilarity<T> for DissimilarityMatrix<T> {
    fn cardinality(&self) -> usize {
        self.cardinality
    }

    fn get(&self, i: usize, j: usize) -> T {
        if i == j {
            T::ZERO
        } else {
            self.values[self.position(i, j)]
        }
    }
}

/// A [`Dissimilarity`] source that computes distances on the fly.
///
/// This spends no memory but pays the metric cost on every lookup; prefer
/// [`DissimilarityMatrix`] when the same pairs are visited many times with an
/// expensive metric.
pub struct MetricDissimilarity<'a, I, D: Dataset<I>, M> {
    /// The dataset the indices refer to.
    data: &'a D,
    /// The metric to compute dissimilarities with.
    metric: &'a M,
    /// Ties the unused item type parameter.
    _items: core::marker::PhantomData<I>,
}

impl<'a, I, D: Dataset<I>, M> MetricDissimilarity<'a, I, D, M> {
    /// Creates a new on-the-fly dissimilarity source.
    pub const fn new(data: &'a D, metric: &'a M) -> Self {
        Self {
            data,
            metric,
            _items: core::marker::PhantomData,
        }
    }
}

impl<I, D: Dataset<I>, M: Metric<I, T>, T: Number> Dissimilarity<T> for MetricDissimilarity<'_, I, D, M> {
    fn cardinality(&self) -> usize {
        self.data.cardinality()
    }

    fn get(&self, i: usize, j: usize) -> T {
        self.data.one_to_one(i, j, self.metric)
    }
}
