//! Price prediction from a complete feature record.
//!
//! The regressor is an opaque scoring function producing a log price; the
//! currency value is recovered with `exp(log_price) - 1`.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::query::FeatureRecord;

pub mod xgboost;

pub use xgboost::GradientBoostedTrees;

pub trait PriceModel: Send + Sync {
    /// The fixed, ordered feature list the model was trained on.
    fn feature_names(&self) -> &[String];

    fn predict_log_price(&self, record: &FeatureRecord) -> Result<f64, ModelError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    pub log_price: f64,
    pub price: f64,
}

pub fn predict_price(
    model: Option<&dyn PriceModel>,
    record: &FeatureRecord,
) -> Result<PricePrediction, ModelError> {
    let model = model.ok_or(ModelError::Unavailable)?;
    let log_price = model.predict_log_price(record)?;
    if !log_price.is_finite() {
        return Err(ModelError::Malformed(format!(
            "non-finite log price {}",
            log_price
        )));
    }
    Ok(PricePrediction {
        log_price,
        price: log_price.exp_m1(),
    })
}

/// Picks the model's features out of `record` in model order. Every absent
/// key is reported, none is filled in.
pub fn aligned_features(names: &[String], record: &FeatureRecord) -> Result<Vec<f64>, ModelError> {
    let mut values = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        match record.get(name) {
            Some(value) => values.push(value),
            None => missing.push(name.clone()),
        }
    }
    if missing.is_empty() {
        Ok(values)
    } else {
        Err(ModelError::MissingFeatures(missing))
    }
}
