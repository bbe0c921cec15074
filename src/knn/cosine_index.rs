use dary_heap::OctonaryHeap;

use crate::error::PipelineError;
use crate::knn::{Neighbor, NeighborSearch};

/// Exhaustive cosine-distance index over a row-major N×D matrix.
///
/// Built once from the transformed historical matrix and never mutated.
pub struct CosineIndex {
    dimensionality: usize,
    vectors: Vec<f64>,
    squared_norms: Vec<f64>,
}

impl CosineIndex {
    pub fn build(matrix: Vec<Vec<f64>>) -> Result<Self, PipelineError> {
        let dimensionality = matrix
            .first()
            .map(Vec::len)
            .ok_or(PipelineError::EmptyDataset)?;

        let mut vectors = Vec::with_capacity(matrix.len() * dimensionality);
        let mut squared_norms = Vec::with_capacity(matrix.len());
        for row in matrix {
            if row.len() != dimensionality {
                return Err(PipelineError::DimensionMismatch {
                    expected: dimensionality,
                    actual: row.len(),
                });
            }
            squared_norms.push(dot(&row, &row));
            vectors.extend(row);
        }

        Ok(CosineIndex {
            dimensionality,
            vectors,
            squared_norms,
        })
    }

    fn row(&self, index: usize) -> &[f64] {
        let start = index * self.dimensionality;
        &self.vectors[start..start + self.dimensionality]
    }
}

impl NeighborSearch for CosineIndex {
    fn find_neighbors(&self, vector: &[f64], k: usize) -> Result<Vec<Neighbor>, PipelineError> {
        if vector.len() != self.dimensionality {
            return Err(PipelineError::DimensionMismatch {
                expected: self.dimensionality,
                actual: vector.len(),
            });
        }
        let how_many = k.min(self.len());
        if how_many == 0 {
            return Ok(Vec::new());
        }

        let query_squared_norm = dot(vector, vector);

        // Max-heap of the best candidates so far, worst on top.
        let mut closest = OctonaryHeap::<Neighbor>::with_capacity(how_many);
        for (row, squared_norm) in self.squared_norms.iter().enumerate() {
            let distance =
                cosine_distance(dot(vector, self.row(row)), query_squared_norm, *squared_norm);
            let candidate = Neighbor::new(row, distance);
            if closest.len() < how_many {
                closest.push(candidate);
            } else if let Some(mut worst) = closest.peek_mut() {
                if candidate < *worst {
                    *worst = candidate;
                }
            }
        }

        Ok(closest.into_sorted_vec())
    }

    fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    fn len(&self) -> usize {
        self.squared_norms.len()
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `1 - cos`, clamped to `[0, 2]`. A zero vector is at distance 1 from
/// everything.
pub fn cosine_distance(dot: f64, squared_norm_a: f64, squared_norm_b: f64) -> f64 {
    let denominator = (squared_norm_a * squared_norm_b).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 1.0;
    }
    (1.0 - dot / denominator).max(0.0).min(2.0)
}
