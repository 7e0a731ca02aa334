//! The core traits and structs for CIVET.

pub mod dataset;
pub mod linalg;
pub mod metric;
pub mod partition;
