//! Helpers shared by the integration tests.

#![allow(dead_code)]

pub mod data_gen;

use civet::{LabelPartition, Partition};

/// Checks that a linked or derived partition reproduces the member sets of
/// the reference partition, cluster by cluster.
pub fn assert_same_member_sets<P: Partition>(reference: &LabelPartition, other: &P) {
    assert_eq!(reference.cardinality(), other.cardinality());
    assert_eq!(reference.num_clusters(), other.num_clusters());

    let mut expected = reference.member_lists();
    let mut actual = other.member_lists();
    for (e, a) in expected.iter_mut().zip(actual.iter_mut()) {
        e.sort_unstable();
        a.sort_unstable();
    }
    assert_eq!(expected, actual);
}
