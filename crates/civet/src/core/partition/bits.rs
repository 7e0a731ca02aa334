//! The bit-encoded crisp-matrix partition.

use serde::{Deserialize, Serialize};

use super::Partition;

/// The number of bits per storage word.
const WORD_BITS: usize = u64::BITS as usize;

/// A dense matrix of bits packed into `u64` words, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitMatrix {
    /// The packed words, `words_per_row` per row.
    words: Vec<u64>,
    /// The number of rows.
    num_rows: usize,
    /// The number of columns.
    num_cols: usize,
    /// The number of words backing each row.
    words_per_row: usize,
}

impl BitMatrix {
    /// Creates an all-zero matrix with the given shape.
    #[must_use]
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        let words_per_row = num_cols.div_ceil(WORD_BITS);
        Self {
            words: vec![0; num_rows * words_per_row],
            num_rows,
            num_cols,
            words_per_row,
        }
    }

    /// The number of rows.
    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// The number of columns.
    #[must_use]
    pub const fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// The position of a bit as a word index and a mask within that word.
    const fn locate(&self, row: usize, col: usize) -> (usize, u64) {
        (row * self.words_per_row + col / WORD_BITS, 1 << (col % WORD_BITS))
    }

    /// Reads the bit at the given position.
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.num_rows && col < self.num_cols, "bit index out of bounds");
        let (word, mask) = self.locate(row, col);
        self.words[word] & mask != 0
    }

    /// Writes the bit at the given position.
    ///
    /// Panics if either index is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.num_rows && col < self.num_cols, "bit index out of bounds");
        let (word, mask) = self.locate(row, col);
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// The number of set bits in the given row.
    #[must_use]
    pub fn count_row(&self, row: usize) -> usize {
        let start = row * self.words_per_row;
        self.words[start..start + self.words_per_row]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }
}

/// A crisp partition encoded as a bit matrix with one row per cluster and
/// one column per instance.
///
/// The invariant is at most one set bit per column; an all-zero column is an
/// unassigned instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitPartition {
    /// The membership bits.
    bits: BitMatrix,
}

impl BitPartition {
    /// Creates a partition of `cardinality` instances into `num_clusters`
    /// clusters with every instance unassigned.
    #[must_use]
    pub fn new(num_clusters: usize, cardinality: usize) -> Self {
        Self {
            bits: BitMatrix::new(num_clusters, cardinality),
        }
    }

    /// Copies the labels of any partition into a `BitPartition`.
    pub fn from_partition<P: Partition>(partition: &P) -> Self {
        let mut bits = BitMatrix::new(partition.num_clusters(), partition.cardinality());
        for i in 0..partition.cardinality() {
            if let Some(j) = partition.cluster_of(i) {
                bits.set(j, i, true);
            }
        }
        Self { bits }
    }

    /// Assigns one instance, clearing any previous assignment.
    ///
    /// Panics if either index is out of bounds.
    pub fn assign(&mut self, index: usize, label: Option<usize>) {
        for j in 0..self.bits.num_rows() {
            self.bits.set(j, index, false);
        }
        if let Some(j) = label {
            self.bits.set(j, index, true);
        }
    }

    /// A read-only view of the underlying bit matrix.
    #[must_use]
    pub const fn bits(&self) -> &BitMatrix {
        &self.bits
    }
}

impl Partition for BitPartition {
    fn cardinality(&self) -> usize {
        self.bits.num_cols()
    }

    fn num_clusters(&self) -> usize {
        self.bits.num_rows()
    }

    fn cluster_of(&self, index: usize) -> Option<usize> {
        (0..self.bits.num_rows()).find(|&j| self.bits.get(j, index))
    }
}
