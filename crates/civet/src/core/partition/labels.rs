//! The dense label-vector partition.

use serde::{Deserialize, Serialize};

use super::Partition;

/// A partition stored as a dense vector of cluster labels, one per instance.
///
/// This is the representation most drivers maintain directly; the other
/// forms convert to and from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPartition {
    /// The cluster label of every instance; `None` is unassigned.
    labels: Vec<Option<usize>>,
    /// The number of clusters the partition declares.
    num_clusters: usize,
}

impl LabelPartition {
    /// Creates a new `LabelPartition` from explicit labels.
    ///
    /// # Errors
    ///
    /// * If any label is outside `0..num_clusters`.
    pub fn new(labels: Vec<Option<usize>>, num_clusters: usize) -> Result<Self, String> {
        match labels.iter().flatten().find(|&&j| j >= num_clusters) {
            Some(&j) => Err(format!("Label {j} is outside the declared range 0..{num_clusters}.")),
            None => Ok(Self { labels, num_clusters }),
        }
    }

    /// Creates a `LabelPartition` from signed raw labels, mapping every
    /// negative label to unassigned.
    ///
    /// # Errors
    ///
    /// * If any non-negative label is outside `0..num_clusters`.
    pub fn from_raw_labels(labels: &[isize], num_clusters: usize) -> Result<Self, String> {
        let labels = labels
            .iter()
            .map(|&j| if j < 0 { None } else { Some(j.unsigned_abs()) })
            .collect();
        Self::new(labels, num_clusters)
    }

    /// Copies the labels of any partition into a dense `LabelPartition`.
    pub fn from_partition<P: Partition>(partition: &P) -> Self {
        Self {
            labels: partition.labels().collect(),
            num_clusters: partition.num_clusters(),
        }
    }

    /// Reassigns one instance.
    ///
    /// # Errors
    ///
    /// * If the instance index is out of bounds.
    /// * If the label is outside `0..num_clusters`.
    pub fn relabel(&mut self, index: usize, label: Option<usize>) -> Result<(), String> {
        if index >= self.labels.len() {
            return Err(format!("Instance {index} is out of bounds."));
        }
        if let Some(j) = label {
            if j >= self.num_clusters {
                return Err(format!("Label {j} is outside the declared range 0..{}.", self.num_clusters));
            }
        }
        self.labels[index] = label;
        Ok(())
    }

    /// The raw labels.
    #[must_use]
    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.labels
    }
}

impl Partition for LabelPartition {
    fn cardinality(&self) -> usize {
        self.labels.len()
    }

    fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    fn cluster_of(&self, index: usize) -> Option<usize> {
        self.labels[index]
    }
}
