use std::sync::Arc;

use tdigest::TDigest;

use crate::feedback::FeedbackSink;
use crate::io::HistoricalDataset;
use crate::preprocessing::FittedPreprocessor;
use crate::schema::FeatureKind;
use crate::service::RecommenderService;
use crate::sessions::RocksDBSessionStore;

/// Per-worker application state. Everything behind an `Arc` is built once
/// before the server starts and shared read-only afterwards.
pub struct SharedHandlesAndConfig {
    pub service: Arc<RecommenderService>,
    pub session_store: Arc<RocksDBSessionStore>,
    pub feedback: Arc<dyn FeedbackSink>,
    pub qty_workers: usize,
    pub db_compaction_ttl_in_secs: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub descriptive_name: String,
    pub qty_records: usize,
    pub qty_features: usize,
    pub qty_attributes: usize,
    pub qty_families: usize,
    pub qty_label_encoded: usize,
    pub qty_numeric_inputs: usize,
    pub qty_categorical_inputs: usize,
    pub dimensionality: usize,
    pub price_min: f64,
    pub price_p50: f64,
    pub price_max: f64,
    pub price_mean: f64,
}

pub fn determine_dataset_statistics(
    dataset: &HistoricalDataset,
    preprocessor: &FittedPreprocessor,
) -> DatasetStats {
    let schema = dataset.schema();
    let prices = dataset.prices();

    let t_digest = TDigest::new_with_size(100);
    let price_digest = t_digest.merge_unsorted(prices.to_vec());

    let price_min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let price_max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let price_mean = if prices.is_empty() {
        0.0
    } else {
        prices.iter().sum::<f64>() / prices.len() as f64
    };

    let stats = DatasetStats {
        descriptive_name: dataset.descriptive_name().to_string(),
        qty_records: dataset.len(),
        qty_features: schema.len(),
        qty_attributes: schema.attributes().len(),
        qty_families: schema.qty_families(),
        qty_label_encoded: schema
            .attributes()
            .iter()
            .filter(|attribute| attribute.kind == FeatureKind::LabelEncoded)
            .count(),
        qty_numeric_inputs: preprocessor.qty_numeric(),
        qty_categorical_inputs: preprocessor.qty_categorical(),
        dimensionality: preprocessor.dimensionality(),
        price_min,
        price_p50: price_digest.estimate_quantile(0.5),
        price_max,
        price_mean,
    };

    tracing::info!(
        "loaded {}: {} listings, {} feature columns ({} one-hot families, {} label-encoded), {} output dimensions",
        stats.descriptive_name,
        stats.qty_records,
        stats.qty_features,
        stats.qty_families,
        stats.qty_label_encoded,
        stats.dimensionality
    );
    tracing::info!(
        "price min={:.2} p50={:.2} max={:.2} mean={:.2}",
        stats.price_min,
        stats.price_p50,
        stats.price_max,
        stats.price_mean
    );

    stats
}
