//! The explicit, immutable service object behind every request.
//!
//! Dataset, schema, fitted pipeline and similarity index are built together
//! in one pass and never change afterwards. Rebuilding means constructing a
//! new service.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{AppConfig, ModelConfig};
use crate::dataframeutils::{determine_dataset_statistics, DatasetStats};
use crate::error::{AdvisorError, ModelError, QueryError};
use crate::io::{load_dataset, HistoricalDataset};
use crate::knn::{CosineIndex, NeighborSearch};
use crate::model::{self, GradientBoostedTrees, PriceModel, PricePrediction};
use crate::preprocessing::FittedPreprocessor;
use crate::query::{FeatureRecord, QueryBuilder, Selections};
use crate::recommend::{self, RecommendationResult};
use crate::schema::catalog::laptop_catalog;
use crate::schema::{load_catalog, FeatureSchema};

pub struct RecommenderService {
    dataset: HistoricalDataset,
    query_builder: QueryBuilder,
    preprocessor: FittedPreprocessor,
    index: CosineIndex,
    price_model: Option<Box<dyn PriceModel>>,
    settings: ModelConfig,
    stats: DatasetStats,
}

impl RecommenderService {
    pub fn build(
        dataset: HistoricalDataset,
        settings: ModelConfig,
        price_model: Option<Box<dyn PriceModel>>,
    ) -> Result<Self, AdvisorError> {
        settings.validate()?;

        let start = Instant::now();
        let preprocessor = FittedPreprocessor::fit(&dataset, &settings.excluded_features)?;
        let matrix = preprocessor.transform_dataset(&dataset)?;
        let index = CosineIndex::build(matrix)?;
        tracing::info!(
            "built similarity index over {} listings in {:?}",
            index.len(),
            start.elapsed()
        );

        if let Some(model) = &price_model {
            let absent: Vec<&String> = model
                .feature_names()
                .iter()
                .filter(|name| dataset.schema().position(name).is_none())
                .collect();
            if !absent.is_empty() {
                tracing::warn!(
                    "price model expects {} features the schema does not produce: {:?}",
                    absent.len(),
                    absent
                );
            }
        }

        let stats = determine_dataset_statistics(&dataset, &preprocessor);
        let query_builder = QueryBuilder::new(Arc::clone(dataset.schema()));

        Ok(RecommenderService {
            dataset,
            query_builder,
            preprocessor,
            index,
            price_model,
            settings,
            stats,
        })
    }

    /// Loads every input named in `config` and builds the service. Any
    /// failure is fatal to startup.
    pub fn from_config(config: &AppConfig) -> Result<Self, AdvisorError> {
        let catalog = match &config.data.schema_path {
            Some(path) => load_catalog(path)?,
            None => laptop_catalog(),
        };
        let dataset = load_dataset(
            &config.data.features_path,
            &config.data.prices_path,
            &config.data.titles_path,
            &catalog,
        )?;
        let price_model = match &config.data.model_path {
            Some(path) => Some(Box::new(GradientBoostedTrees::load(path)?) as Box<dyn PriceModel>),
            None => {
                tracing::warn!("no price model configured, price predictions are unavailable");
                None
            }
        };
        RecommenderService::build(dataset, config.model.clone(), price_model)
    }

    pub fn build_record(&self, selections: &Selections) -> Result<FeatureRecord, QueryError> {
        self.query_builder.build(selections)
    }

    /// Ranks the `k` most similar listings, `k` defaulting to the configured one.
    pub fn recommend_record(
        &self,
        record: &FeatureRecord,
        k: Option<usize>,
    ) -> Result<RecommendationResult, AdvisorError> {
        let vector = self.preprocessor.transform(record)?;
        let k = k.unwrap_or(self.settings.neighbors_k);
        let neighbors = self.index.find_neighbors(&vector, k)?;
        Ok(recommend::assemble(
            &neighbors,
            &self.dataset,
            self.settings.similarity_floor,
        ))
    }

    pub fn recommend(
        &self,
        selections: &Selections,
    ) -> Result<(FeatureRecord, RecommendationResult), AdvisorError> {
        let record = self.build_record(selections)?;
        let result = self.recommend_record(&record, None)?;
        Ok((record, result))
    }

    pub fn predict_price(&self, record: &FeatureRecord) -> Result<PricePrediction, ModelError> {
        model::predict_price(self.price_model.as_deref(), record)
    }

    pub fn has_price_model(&self) -> bool {
        self.price_model.is_some()
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.dataset.schema()
    }

    pub fn dataset(&self) -> &HistoricalDataset {
        &self.dataset
    }

    pub fn preprocessor(&self) -> &FittedPreprocessor {
        &self.preprocessor
    }

    pub fn settings(&self) -> &ModelConfig {
        &self.settings
    }

    pub fn stats(&self) -> &DatasetStats {
        &self.stats
    }
}

#[cfg(test)]
mod service_test {
    use super::*;
    use crate::query::SelectionValue;
    use crate::schema::AttributeSpec;
    use crate::test_fixtures::{small_dataset, PRICE_MODEL};
    use float_cmp::approx_eq;

    fn settings(neighbors_k: usize) -> ModelConfig {
        ModelConfig {
            neighbors_k,
            similarity_floor: 1.0,
            excluded_features: Vec::new(),
        }
    }

    /// Three listings that differ only in RAM. All of them are laptops, which
    /// keeps the standardized vectors off the origin.
    fn three_listings() -> HistoricalDataset {
        let catalog = vec![
            AttributeSpec::Numeric {
                name: "ram_gb".to_string(),
                column: "ram_memoria_ram_GB".to_string(),
                min: 0.0,
                max: 256.0,
                default: 16.0,
            },
            AttributeSpec::OneHot {
                name: "device_type".to_string(),
                prefix: "tipo_".to_string(),
                default: "nan".to_string(),
            },
        ];
        let headers: Vec<String> = vec!["ram_memoria_ram_GB", "tipo_Laptop", "tipo_nan"]
            .into_iter()
            .map(String::from)
            .collect();
        let schema = Arc::new(FeatureSchema::from_headers(&catalog, &headers).unwrap());
        let rows = vec![
            vec![Some(8.0), Some(1.0), Some(0.0)],
            vec![Some(16.0), Some(1.0), Some(0.0)],
            vec![Some(64.0), Some(1.0), Some(0.0)],
        ];
        HistoricalDataset::new(
            schema,
            rows,
            vec![500.0, 1000.0, 1500.0],
            vec!["Budget".to_string(), "Midrange".to_string(), "Workstation".to_string()],
            "three listings",
        )
        .unwrap()
    }

    fn selections(pairs: Vec<(&str, SelectionValue)>) -> Selections {
        pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn should_rank_exact_match_first_with_full_similarity() {
        let service = RecommenderService::build(three_listings(), settings(2), None).unwrap();

        let (_, result) = service
            .recommend(&selections(vec![
                ("ram_gb", SelectionValue::Number(16.0)),
                ("device_type", SelectionValue::Choice("Laptop".to_string())),
            ]))
            .unwrap();

        assert_eq!(2, result.len());
        let first = &result.recommendations[0];
        let second = &result.recommendations[1];
        assert_eq!(1, first.listing);
        assert_eq!("Midrange", first.title);
        assert_eq!(1000.0, first.price);
        assert!(approx_eq!(f64, 1.0, first.similarity, epsilon = 1e-12));
        assert_eq!(0, second.listing);
        assert_eq!(500.0, second.price);
        assert!(second.similarity > 0.0 && second.similarity < first.similarity);
    }

    #[test]
    fn should_return_every_listing_when_k_exceeds_dataset() {
        let dataset = three_listings();
        let rows = dataset.rows()[..2].to_vec();
        let two = HistoricalDataset::new(
            Arc::clone(dataset.schema()),
            rows,
            vec![500.0, 1000.0],
            vec![String::new(), String::new()],
            "two listings",
        )
        .unwrap();
        let service = RecommenderService::build(two, settings(5), None).unwrap();

        let (_, result) = service.recommend(&Selections::new()).unwrap();

        assert_eq!(2, result.len());
        let mut listings: Vec<usize> = result.recommendations.iter().map(|r| r.listing).collect();
        listings.sort_unstable();
        assert_eq!(vec![0, 1], listings);
    }

    #[test]
    fn should_honour_requested_k() {
        let service = RecommenderService::build(small_dataset(), settings(5), None).unwrap();
        let record = service.build_record(&Selections::new()).unwrap();

        assert_eq!(1, service.recommend_record(&record, Some(1)).unwrap().len());
        assert_eq!(5, service.recommend_record(&record, None).unwrap().len());
        assert_eq!(5, service.recommend_record(&record, Some(50)).unwrap().len());
    }

    #[test]
    fn should_reject_unknown_brand_without_recommending() {
        let service = RecommenderService::build(small_dataset(), settings(5), None).unwrap();

        let result = service.recommend(&selections(vec![(
            "brand",
            SelectionValue::Choice("Nonexistent Corp".to_string()),
        )]));

        assert!(matches!(
            result,
            Err(AdvisorError::Query(QueryError::UnknownCategory { .. }))
        ));
    }

    #[test]
    fn should_predict_price_independently_of_recommendations() {
        let model = GradientBoostedTrees::from_json(PRICE_MODEL).unwrap();
        let service =
            RecommenderService::build(small_dataset(), settings(5), Some(Box::new(model))).unwrap();
        let record = service
            .build_record(&selections(vec![
                ("ram_gb", SelectionValue::Number(16.0)),
                ("webcam", SelectionValue::Flag(true)),
            ]))
            .unwrap();

        let prediction = service.predict_price(&record).unwrap();
        assert!(approx_eq!(f64, 7.2, prediction.log_price, epsilon = 1e-12));
        assert!(approx_eq!(f64, 7.2_f64.exp() - 1.0, prediction.price, epsilon = 1e-9));

        let without_model = RecommenderService::build(small_dataset(), settings(5), None).unwrap();
        assert!(matches!(
            without_model.predict_price(&record),
            Err(ModelError::Unavailable)
        ));
        assert_eq!(5, without_model.recommend_record(&record, None).unwrap().len());
    }

    #[test]
    fn should_refuse_invalid_settings() {
        let mut invalid = settings(5);
        invalid.similarity_floor = 0.0;

        assert!(matches!(
            RecommenderService::build(small_dataset(), invalid, None),
            Err(AdvisorError::Config(_))
        ));
    }
}
