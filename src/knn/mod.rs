use std::cmp::Ordering;

use crate::error::PipelineError;
use crate::io::ListingIndex;

pub mod cosine_index;

pub use cosine_index::CosineIndex;

/// A historical row and its distance to the query.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Neighbor {
    pub row: ListingIndex,
    pub distance: f64,
}

impl Neighbor {
    pub fn new(row: ListingIndex, distance: f64) -> Self {
        Neighbor { row, distance }
    }
}

impl Eq for Neighbor {}

impl Ord for Neighbor {
    // closer first, equal distances by ascending row
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.row.cmp(&other.row))
    }
}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub trait NeighborSearch {
    /// The `min(k, N)` closest rows, ascending by distance then row index.
    fn find_neighbors(&self, vector: &[f64], k: usize) -> Result<Vec<Neighbor>, PipelineError>;

    fn dimensionality(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
