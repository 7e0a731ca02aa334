//! The linked-list-per-cluster partition.
//!
//! An arena of parallel index arrays: `first` holds the head of each
//! cluster's singly linked list and `next` holds the link out of each
//! instance. This gives O(1) insertion and allocation-free forward
//! iteration per cluster, which is what an evolutionary driver needs when it
//! incrementally mutates a candidate solution between fitness evaluations.

use serde::{Deserialize, Serialize};

use super::Partition;

/// A partition stored as one singly linked list of instance indices per
/// cluster.
///
/// In addition to the head and link arrays, the structure keeps a reverse
/// map from instance to cluster, maintained in lockstep with every list
/// mutation. The reverse map makes [`LinkedPartition::change_membership`]
/// self-contained and backs the [`Partition`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedPartition {
    /// The head of each cluster's list.
    first: Vec<Option<usize>>,
    /// The link out of each instance; `None` terminates a list.
    next: Vec<Option<usize>>,
    /// The cluster each instance is currently linked into.
    assigned: Vec<Option<usize>>,
}

impl LinkedPartition {
    /// Creates a partition of `cardinality` instances into `num_clusters`
    /// clusters with every instance unassigned.
    #[must_use]
    pub fn new(num_clusters: usize, cardinality: usize) -> Self {
        Self {
            first: vec![None; num_clusters],
            next: vec![None; cardinality],
            assigned: vec![None; cardinality],
        }
    }

    /// Builds the linked form of any partition.
    ///
    /// Instances are prepended in reverse index order so that each cluster's
    /// list iterates in ascending instance order.
    pub fn from_partition<P: Partition>(partition: &P) -> Self {
        let mut linked = Self::new(partition.num_clusters(), partition.cardinality());
        for i in (0..partition.cardinality()).rev() {
            if let Some(j) = partition.cluster_of(i) {
                linked.push_front(j, i);
            }
        }
        linked
    }

    /// Prepends an unlinked instance to a cluster's list; the caller has
    /// checked both indices.
    fn push_front(&mut self, cluster: usize, instance: usize) {
        self.next[instance] = self.first[cluster];
        self.first[cluster] = Some(instance);
        self.assigned[instance] = Some(cluster);
    }

    /// Adds an instance to the front of a cluster's list in O(1).
    ///
    /// # Errors
    ///
    /// * If either index is out of bounds.
    /// * If the instance is already linked into a cluster.
    pub fn add_instance_to_cluster(&mut self, cluster: usize, instance: usize) -> Result<(), String> {
        if cluster >= self.first.len() {
            return Err(format!("Cluster {cluster} is out of bounds."));
        }
        if instance >= self.next.len() {
            return Err(format!("Instance {instance} is out of bounds."));
        }
        if let Some(current) = self.assigned[instance] {
            return Err(format!("Instance {instance} is already in cluster {current}."));
        }
        self.push_front(cluster, instance);
        Ok(())
    }

    /// Unlinks an instance from a cluster's list by walking the list from
    /// its head, in O(cluster size).
    ///
    /// Passing `None` as the cluster is a no-op, so drivers can feed the
    /// "unknown" label through without a branch.
    ///
    /// # Errors
    ///
    /// * If either index is out of bounds.
    /// * If the instance is not currently linked into the given cluster.
    pub fn sub_instance_from_cluster(&mut self, cluster: Option<usize>, instance: usize) -> Result<(), String> {
        let Some(cluster) = cluster else {
            return Ok(());
        };
        if cluster >= self.first.len() {
            return Err(format!("Cluster {cluster} is out of bounds."));
        }
        if instance >= self.next.len() {
            return Err(format!("Instance {instance} is out of bounds."));
        }
        if self.assigned[instance] != Some(cluster) {
            return Err(format!("Instance {instance} is not in cluster {cluster}."));
        }

        if self.first[cluster] == Some(instance) {
            self.first[cluster] = self.next[instance];
        } else {
            // Walk to the predecessor of the instance.
            let mut walker = self.first[cluster];
            while let Some(w) = walker {
                if self.next[w] == Some(instance) {
                    self.next[w] = self.next[instance];
                    break;
                }
                walker = self.next[w];
            }
        }
        self.next[instance] = None;
        self.assigned[instance] = None;
        Ok(())
    }

    /// Moves an instance to another cluster, or to unassigned.
    ///
    /// The instance's current cluster is taken from the reverse map; the
    /// caller does not need to track it.
    ///
    /// # Errors
    ///
    /// * If either index is out of bounds.
    pub fn change_membership(&mut self, cluster: Option<usize>, instance: usize) -> Result<(), String> {
        if let Some(j) = cluster {
            if j >= self.first.len() {
                return Err(format!("Cluster {j} is out of bounds."));
            }
        }
        if instance >= self.next.len() {
            return Err(format!("Instance {instance} is out of bounds."));
        }
        self.sub_instance_from_cluster(self.assigned[instance], instance)?;
        if let Some(j) = cluster {
            self.push_front(j, instance);
        }
        Ok(())
    }

    /// Splices the `from` cluster's list onto the tail of the `to` cluster's
    /// list and empties `from`.
    ///
    /// # Errors
    ///
    /// * If either cluster is out of bounds, or the two are the same.
    pub fn join_clusters(&mut self, from: usize, to: usize) -> Result<(), String> {
        if from >= self.first.len() || to >= self.first.len() {
            return Err(format!("Cluster {} is out of bounds.", from.max(to)));
        }
        if from == to {
            return Err(format!("Cannot join cluster {from} with itself."));
        }

        // Re-home the moved instances in the reverse map.
        let mut walker = self.first[from];
        while let Some(w) = walker {
            self.assigned[w] = Some(to);
            walker = self.next[w];
        }

        match self.first[to] {
            None => self.first[to] = self.first[from],
            Some(head) => {
                // Walk to the tail of the receiving list.
                let mut tail = head;
                while let Some(w) = self.next[tail] {
                    tail = w;
                }
                self.next[tail] = self.first[from];
            }
        }
        self.first[from] = None;
        Ok(())
    }

    /// The `n`-th member of a cluster's list, or `None` when the list is
    /// shorter.
    #[must_use]
    pub fn nth_member(&self, cluster: usize, n: usize) -> Option<usize> {
        self.members(cluster).nth(n)
    }

    /// Iterates over a cluster's members in list order.
    ///
    /// Panics if the cluster is out of bounds.
    #[must_use]
    pub fn members(&self, cluster: usize) -> ClusterMembers<'_> {
        ClusterMembers {
            current: self.first[cluster],
            next: &self.next,
        }
    }

    /// Converts back to a dense label partition.
    #[must_use]
    pub fn to_labels(&self) -> super::LabelPartition {
        super::LabelPartition::from_partition(self)
    }
}

impl Partition for LinkedPartition {
    fn cardinality(&self) -> usize {
        self.next.len()
    }

    fn num_clusters(&self) -> usize {
        self.first.len()
    }

    fn cluster_of(&self, index: usize) -> Option<usize> {
        self.assigned[index]
    }
}

/// A forward cursor over one cluster's linked list.
pub struct ClusterMembers<'a> {
    /// The instance the cursor is positioned at.
    current: Option<usize>,
    /// The link array of the owning partition.
    next: &'a [Option<usize>],
}

impl Iterator for ClusterMembers<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.next[current];
        Some(current)
    }
}

/// A [`LinkedPartition`] that additionally tracks a per-cluster count of
/// member frequencies.
///
/// Every mutation updates the lists and the counts in one code path, so the
/// two can never desynchronize. With the default frequency of 1 the counts
/// are exactly the list lengths; with explicit frequencies they are the
/// frequency sums of the member instances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountedLinkedPartition {
    /// The underlying linked lists.
    links: LinkedPartition,
    /// The frequency sum of each cluster's members.
    counts: Vec<usize>,
}

impl CountedLinkedPartition {
    /// Creates a partition of `cardinality` instances into `num_clusters`
    /// clusters with every instance unassigned.
    #[must_use]
    pub fn new(num_clusters: usize, cardinality: usize) -> Self {
        Self {
            links: LinkedPartition::new(num_clusters, cardinality),
            counts: vec![0; num_clusters],
        }
    }

    /// Builds the counted linked form of any partition, with every instance
    /// counting once.
    pub fn from_partition<P: Partition>(partition: &P) -> Self {
        Self {
            links: LinkedPartition::from_partition(partition),
            counts: partition.cluster_sizes(),
        }
    }

    /// Adds an instance with frequency 1.
    ///
    /// # Errors
    ///
    /// See [`LinkedPartition::add_instance_to_cluster`].
    pub fn add_instance_to_cluster(&mut self, cluster: usize, instance: usize) -> Result<(), String> {
        self.add_weighted(cluster, instance, 1)
    }

    /// Adds an instance that counts `frequency` times.
    ///
    /// # Errors
    ///
    /// See [`LinkedPartition::add_instance_to_cluster`].
    pub fn add_weighted(&mut self, cluster: usize, instance: usize, frequency: usize) -> Result<(), String> {
        self.links.add_instance_to_cluster(cluster, instance)?;
        self.counts[cluster] += frequency;
        Ok(())
    }

    /// Removes an instance with frequency 1.
    ///
    /// # Errors
    ///
    /// See [`LinkedPartition::sub_instance_from_cluster`].
    pub fn sub_instance_from_cluster(&mut self, cluster: Option<usize>, instance: usize) -> Result<(), String> {
        self.sub_weighted(cluster, instance, 1)
    }

    /// Removes an instance that counted `frequency` times.
    ///
    /// # Errors
    ///
    /// See [`LinkedPartition::sub_instance_from_cluster`].
    pub fn sub_weighted(&mut self, cluster: Option<usize>, instance: usize, frequency: usize) -> Result<(), String> {
        self.links.sub_instance_from_cluster(cluster, instance)?;
        if let Some(j) = cluster {
            self.counts[j] -= frequency.min(self.counts[j]);
        }
        Ok(())
    }

    /// Moves an instance with frequency 1.
    ///
    /// # Errors
    ///
    /// See [`LinkedPartition::change_membership`].
    pub fn change_membership(&mut self, cluster: Option<usize>, instance: usize) -> Result<(), String> {
        self.change_weighted(cluster, instance, 1)
    }

    /// Moves an instance that counts `frequency` times.
    ///
    /// # Errors
    ///
    /// See [`LinkedPartition::change_membership`].
    pub fn change_weighted(&mut self, cluster: Option<usize>, instance: usize, frequency: usize) -> Result<(), String> {
        let old = self.links.cluster_of(instance);
        self.links.change_membership(cluster, instance)?;
        if let Some(j) = old {
            self.counts[j] -= frequency.min(self.counts[j]);
        }
        if let Some(j) = cluster {
            self.counts[j] += frequency;
        }
        Ok(())
    }

    /// Joins two clusters, merging their counts.
    ///
    /// # Errors
    ///
    /// See [`LinkedPartition::join_clusters`].
    pub fn join_clusters(&mut self, from: usize, to: usize) -> Result<(), String> {
        self.links.join_clusters(from, to)?;
        self.counts[to] += self.counts[from];
        self.counts[from] = 0;
        Ok(())
    }

    /// The frequency sum of each cluster.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Iterates over a cluster's members in list order.
    #[must_use]
    pub fn members(&self, cluster: usize) -> ClusterMembers<'_> {
        self.links.members(cluster)
    }

    /// A read-only view of the underlying linked lists.
    #[must_use]
    pub const fn links(&self) -> &LinkedPartition {
        &self.links
    }
}

impl Partition for CountedLinkedPartition {
    fn cardinality(&self) -> usize {
        self.links.cardinality()
    }

    fn num_clusters(&self) -> usize {
        self.links.num_clusters()
    }

    fn cluster_of(&self, index: usize) -> Option<usize> {
        self.links.cluster_of(index)
    }
}
