//! Traits for instance collections that can be scored with CIVET.

use distances::Number;

use super::metric::Metric;

mod centroids;
mod dissimilarity;
pub mod stats;

pub use centroids::Centroids;
pub use dissimilarity::{Dissimilarity, DissimilarityMatrix, MetricDissimilarity};

/// A trait for instance collections that can be scored with CIVET.
///
/// A dataset is a collection of items that can be indexed. Each item in the
/// dataset is of type `I`, and the distance between items is computed using a
/// [`Metric`]. The validity measures only ever read through this trait; they
/// never mutate or consume a dataset.
///
/// We provide a blanket implementation of this trait for any type that
/// implements `AsRef<[I]>`, i.e. any slice-like type. This allows us to use
/// standard Rust collections like `Vec<I>` as datasets out of the box.
pub trait Dataset<I> {
    /// Returns a reference to an indexed item from the dataset.
    ///
    /// The implementor may choose to panic if the index is out of bounds.
    fn get(&self, index: usize) -> &I;

    /// Returns the number of items in the dataset.
    fn cardinality(&self) -> usize;

    /// Returns the distance from a query item to the given indexed item.
    fn query_to_one<T: Number, M: Metric<I, T>>(&self, query: &I, b: usize, metric: &M) -> T {
        metric.distance(query, self.get(b))
    }

    /// Returns the distances from a query item to all indexed items in the
    /// given slice.
    fn query_to_many<S: AsRef<[usize]>, T: Number, M: Metric<I, T>>(
        &self,
        query: &I,
        b: S,
        metric: &M,
    ) -> Vec<(usize, T)> {
        b.as_ref()
            .iter()
            .map(|&j| (j, metric.distance(query, self.get(j))))
            .collect()
    }

    /// Computes the distance between two indexed items in the dataset.
    fn one_to_one<T: Number, M: Metric<I, T>>(&self, a: usize, b: usize, metric: &M) -> T {
        self.query_to_one(self.get(a), b, metric)
    }

    /// Computes the distances from one indexed item to all indexed items in
    /// the given slice.
    fn one_to_many<S: AsRef<[usize]>, T: Number, M: Metric<I, T>>(&self, a: usize, b: S, metric: &M) -> Vec<(usize, T)> {
        self.query_to_many(self.get(a), b, metric)
    }
}

/// Blanket implementation of `Dataset` for any type that implements
/// `AsRef<[I]>`.
impl<I, D: AsRef<[I]>> Dataset<I> for D {
    fn get(&self, index: usize) -> &I {
        &self.as_ref()[index]
    }

    fn cardinality(&self) -> usize {
        self.as_ref().len()
    }
}
