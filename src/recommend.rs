//! Turns raw neighbors into ranked, displayable recommendations.

use serde::{Deserialize, Serialize};

use crate::io::{HistoricalDataset, ListingIndex};
use crate::knn::Neighbor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub listing: ListingIndex,
    pub title: String,
    pub price: f64,
    pub similarity: f64,
}

/// Recommendations in ascending distance order.
///
/// Similarity scores are relative to the query that produced them: they are
/// scaled by that query's mean neighbor distance and must not be compared
/// across separate queries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationResult {
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// `exp(-d / scale)`, in `(0, 1]` for finite non-negative `d` and positive `scale`.
pub fn similarity(distance: f64, scale: f64) -> f64 {
    (-distance / scale).exp()
}

/// The distance scale of one query: the mean neighbor distance, floored.
pub fn distance_scale(neighbors: &[Neighbor], floor: f64) -> f64 {
    if neighbors.is_empty() {
        return floor;
    }
    let mean = neighbors.iter().map(|neighbor| neighbor.distance).sum::<f64>()
        / neighbors.len() as f64;
    mean.max(floor)
}

/// Keeps the neighbor order. Prices are copied from the dataset unchanged.
pub fn assemble(
    neighbors: &[Neighbor],
    dataset: &HistoricalDataset,
    floor: f64,
) -> RecommendationResult {
    let scale = distance_scale(neighbors, floor);
    let recommendations = neighbors
        .iter()
        .map(|neighbor| Recommendation {
            listing: neighbor.row,
            title: dataset.display_title(neighbor.row),
            price: dataset.price(neighbor.row),
            similarity: similarity(neighbor.distance, scale),
        })
        .collect();
    RecommendationResult { recommendations }
}
