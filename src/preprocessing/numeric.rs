use std::cmp::Ordering;

use crate::schema::FeatureId;

/// Median imputation followed by standardisation, fitted on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub key: String,
    pub position: FeatureId,
    pub median: f64,
    pub mean: f64,
    pub scale: f64,
}

impl NumericColumn {
    /// `fallback` replaces the median when the column has no observed value.
    pub fn fit<I>(key: &str, position: FeatureId, cells: I, fallback: f64) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let cells: Vec<Option<f64>> = cells.into_iter().map(observed).collect();

        let mut present: Vec<f64> = cells.iter().flatten().copied().collect();
        let median = median(&mut present).unwrap_or(fallback);

        let imputed: Vec<f64> = cells.iter().map(|cell| cell.unwrap_or(median)).collect();
        let count = imputed.len().max(1) as f64;
        let mean = imputed.iter().sum::<f64>() / count;
        let variance = imputed
            .iter()
            .map(|value| (value - mean) * (value - mean))
            .sum::<f64>()
            / count;
        let deviation = variance.sqrt();
        let scale = if deviation > 0.0 && deviation.is_finite() {
            deviation
        } else {
            1.0
        };

        NumericColumn {
            key: key.to_string(),
            position,
            median,
            mean,
            scale,
        }
    }

    pub fn standardize(&self, cell: Option<f64>) -> f64 {
        let value = observed(cell).unwrap_or(self.median);
        (value - self.mean) / self.scale
    }
}

fn observed(cell: Option<f64>) -> Option<f64> {
    cell.filter(|value| value.is_finite())
}

/// Midpoint of the two central values for even-sized input.
fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let middle = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[middle - 1] + values[middle]) / 2.0)
    } else {
        Some(values[middle])
    }
}
