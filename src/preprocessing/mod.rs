//! The fitted feature pipeline shared by the historical index and live queries.
//!
//! A [`FittedPreprocessor`] is derived once from the historical dataset and is
//! immutable afterwards. Live records are transformed with the same frozen
//! parameters and are never used to refit it.

use std::sync::Arc;
use std::time::Instant;

use hashbrown::HashSet;
use rayon::prelude::*;

use crate::error::PipelineError;
use crate::io::HistoricalDataset;
use crate::query::FeatureRecord;
use crate::schema::{FeatureId, FeatureKind, FeatureSchema};

pub mod categorical;
pub mod numeric;

use categorical::CategoricalColumn;
use numeric::NumericColumn;

pub struct FittedPreprocessor {
    schema: Arc<FeatureSchema>,
    numeric: Vec<NumericColumn>,
    categorical: Vec<CategoricalColumn>,
    /// Schema positions read by the pipeline, ascending.
    used_positions: Vec<FeatureId>,
    dimensionality: usize,
}

impl FittedPreprocessor {
    /// Partitions attributes by declared kind and fits every column on the
    /// historical rows. Attributes named in `excluded` take no part in it.
    pub fn fit(
        dataset: &HistoricalDataset,
        excluded: &[String],
    ) -> Result<FittedPreprocessor, PipelineError> {
        if dataset.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }
        let start = Instant::now();
        let schema = Arc::clone(dataset.schema());

        for name in excluded {
            if schema.attribute(name).is_none() {
                tracing::warn!("excluded attribute {} is not part of the schema", name);
            }
        }

        let mut numeric = Vec::new();
        let mut categorical = Vec::new();
        for attribute in schema.attributes() {
            if excluded.contains(&attribute.name) {
                continue;
            }
            match attribute.kind {
                FeatureKind::Numeric => {
                    let position = attribute.columns[0];
                    numeric.push(NumericColumn::fit(
                        &schema.all_keys()[position],
                        position,
                        dataset.column(position),
                        schema.descriptor(position).default,
                    ));
                }
                FeatureKind::OneHot | FeatureKind::LabelEncoded => {
                    let column = CategoricalColumn::fit(attribute, dataset.rows());
                    if column.ambiguous_rows > 0 {
                        tracing::warn!(
                            "{} rows have more than one active {} member, reading the first",
                            column.ambiguous_rows,
                            column.attribute
                        );
                    }
                    categorical.push(column);
                }
            }
        }

        let mut used_positions: Vec<FeatureId> = numeric
            .iter()
            .map(|column| column.position)
            .chain(
                categorical
                    .iter()
                    .flat_map(|column| column.columns().iter().copied()),
            )
            .collect();
        used_positions.sort_unstable();

        let dimensionality =
            numeric.len() + categorical.iter().map(CategoricalColumn::width).sum::<usize>();

        tracing::info!(
            "fitted preprocessor on {} rows in {:?}: {} numeric, {} categorical, {} output dimensions",
            dataset.len(),
            start.elapsed(),
            numeric.len(),
            categorical.len(),
            dimensionality
        );

        Ok(FittedPreprocessor {
            schema,
            numeric,
            categorical,
            used_positions,
            dimensionality,
        })
    }

    /// Maps one complete record onto the fitted output space.
    ///
    /// Records built against the same schema take a positional fast path.
    /// Any other record is aligned by key and must carry every column the
    /// pipeline was fitted on.
    pub fn transform(&self, record: &FeatureRecord) -> Result<Vec<f64>, PipelineError> {
        if Arc::ptr_eq(record.keys(), &self.schema.shared_keys()) {
            let values = record.values();
            return Ok(self.encode(|position| Some(values[position])));
        }

        let mut cells: Vec<Option<f64>> = vec![None; self.schema.len()];
        let mut missing = Vec::new();
        for position in &self.used_positions {
            let key = &self.schema.all_keys()[*position];
            match record.get(key) {
                Some(value) => cells[*position] = Some(value),
                None => missing.push(key.clone()),
            }
        }

        if !missing.is_empty() {
            let unexpected: Vec<String> = record
                .keys()
                .iter()
                .filter(|key| self.schema.position(key).is_none())
                .cloned()
                .collect();
            tracing::error!(
                ?missing,
                ?unexpected,
                "feature record does not match the fitted pipeline"
            );
            return Err(PipelineError::SchemaMismatch {
                missing,
                unexpected,
            });
        }

        Ok(self.encode(|position| cells[position]))
    }

    /// Transforms every historical row, keeping row order.
    pub fn transform_dataset(
        &self,
        dataset: &HistoricalDataset,
    ) -> Result<Vec<Vec<f64>>, PipelineError> {
        if !Arc::ptr_eq(dataset.schema(), &self.schema)
            && dataset.schema().all_keys() != self.schema.all_keys()
        {
            let ours: HashSet<&String> = self.schema.all_keys().iter().collect();
            let theirs: HashSet<&String> = dataset.schema().all_keys().iter().collect();
            return Err(PipelineError::SchemaMismatch {
                missing: ours.difference(&theirs).map(|key| key.to_string()).collect(),
                unexpected: theirs.difference(&ours).map(|key| key.to_string()).collect(),
            });
        }

        Ok(dataset
            .rows()
            .par_iter()
            .map(|row| self.encode(|position| row[position]))
            .collect())
    }

    fn encode<F>(&self, cell: F) -> Vec<f64>
    where
        F: Fn(FeatureId) -> Option<f64>,
    {
        let mut vector = Vec::with_capacity(self.dimensionality);
        for column in &self.numeric {
            vector.push(column.standardize(cell(column.position)));
        }
        for column in &self.categorical {
            column.encode_into(column.category(&cell), &mut vector);
        }
        vector
    }

    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Names of the output dimensions, numeric columns first.
    pub fn output_columns(&self) -> Vec<String> {
        self.numeric
            .iter()
            .map(|column| column.key.clone())
            .chain(
                self.categorical
                    .iter()
                    .flat_map(CategoricalColumn::output_columns),
            )
            .collect()
    }

    pub fn qty_numeric(&self) -> usize {
        self.numeric.len()
    }

    pub fn qty_categorical(&self) -> usize {
        self.categorical.len()
    }

    pub fn schema(&self) -> &Arc<FeatureSchema> {
        &self.schema
    }
}

#[cfg(test)]
mod preprocessing_test {
    use super::*;
    use crate::query::{QueryBuilder, SelectionValue, Selections};
    use crate::test_fixtures::{row, small_dataset};
    use float_cmp::approx_eq;

    fn query(pairs: Vec<(&str, &str)>) -> Selections {
        pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), SelectionValue::Choice(value.to_string())))
            .collect()
    }

    #[test]
    fn should_order_numeric_before_categorical_outputs() {
        let dataset = small_dataset();
        let pipeline = FittedPreprocessor::fit(&dataset, &[]).unwrap();

        assert_eq!(10, pipeline.dimensionality());
        assert_eq!(
            vec![
                "ram_memoria_ram_GB",
                "equip_webcam",
                "device_type=Desktop",
                "device_type=Laptop",
                "product_type=Ultrabook",
                "product_type=PC gaming",
                "product_type=nan",
                "brand=Apple",
                "brand=Dell",
                "brand=Lenovo",
            ],
            pipeline.output_columns()
        );
    }

    #[test]
    fn should_standardize_with_fitted_parameters() {
        let dataset = small_dataset();
        let pipeline = FittedPreprocessor::fit(&dataset, &[]).unwrap();
        let vectors = pipeline.transform_dataset(&dataset).unwrap();

        // ram: 8, 16, 32, 16, 64
        let mean = 27.2;
        let deviation = (1996.8_f64 / 5.0).sqrt();
        assert!(approx_eq!(f64, (8.0 - mean) / deviation, vectors[0][0], epsilon = 1e-12));
        assert!(approx_eq!(f64, (64.0 - mean) / deviation, vectors[4][0], epsilon = 1e-12));
        assert_eq!(&[0.0, 1.0], &vectors[0][2..4]);
        assert_eq!(&[1.0, 0.0, 0.0], &vectors[0][4..7]);
        assert_eq!(&[1.0, 0.0, 0.0], &vectors[0][7..10]);
    }

    #[test]
    fn should_keep_dimensionality_for_every_selection() {
        let dataset = small_dataset();
        let pipeline = FittedPreprocessor::fit(&dataset, &[]).unwrap();
        let builder = QueryBuilder::new(Arc::clone(dataset.schema()));

        for device in &["Desktop", "Laptop", "nan"] {
            for brand in &["ASUS", "Apple", "Dell", "Lenovo"] {
                let record = builder
                    .build(&query(vec![("device_type", device), ("brand", brand)]))
                    .unwrap();
                assert_eq!(10, pipeline.transform(&record).unwrap().len());
            }
        }
    }

    #[test]
    fn should_encode_unseen_query_category_as_zero_block() {
        let dataset = small_dataset();
        let pipeline = FittedPreprocessor::fit(&dataset, &[]).unwrap();
        let builder = QueryBuilder::new(Arc::clone(dataset.schema()));

        let record = builder
            .build(&query(vec![("device_type", "nan"), ("brand", "ASUS")]))
            .unwrap();
        let vector = pipeline.transform(&record).unwrap();

        assert_eq!(&[0.0, 0.0], &vector[2..4]);
        assert_eq!(&[0.0, 0.0, 0.0], &vector[7..10]);
    }

    #[test]
    fn should_transform_deterministically() {
        let dataset = small_dataset();
        let pipeline = FittedPreprocessor::fit(&dataset, &[]).unwrap();
        let record = QueryBuilder::new(Arc::clone(dataset.schema()))
            .build(&query(vec![("product_type", "PC gaming")]))
            .unwrap();

        let first = pipeline.transform(&record).unwrap();
        let second = pipeline.transform(&record).unwrap();
        let first_bits: Vec<u64> = first.iter().map(|value| value.to_bits()).collect();
        let second_bits: Vec<u64> = second.iter().map(|value| value.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn should_align_foreign_records_by_key() {
        let dataset = small_dataset();
        let pipeline = FittedPreprocessor::fit(&dataset, &[]).unwrap();
        let record = QueryBuilder::new(Arc::clone(dataset.schema()))
            .build(&query(vec![("brand", "Dell")]))
            .unwrap();

        let mut pairs: Vec<(String, f64)> = record
            .iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        pairs.reverse();
        pairs.push(("Unnamed: 0".to_string(), 3.0));
        let foreign = FeatureRecord::from_pairs(pairs);

        assert_eq!(
            pipeline.transform(&record).unwrap(),
            pipeline.transform(&foreign).unwrap()
        );
    }

    #[test]
    fn should_report_column_diff_on_schema_mismatch() {
        let dataset = small_dataset();
        let pipeline = FittedPreprocessor::fit(&dataset, &[]).unwrap();
        let record = FeatureRecord::from_pairs(vec![
            ("ram_memoria_ram_GB", 16.0),
            ("tipo_Laptop", 1.0),
            ("cpu_speed", 3.2),
        ]);

        match pipeline.transform(&record) {
            Err(PipelineError::SchemaMismatch {
                missing,
                unexpected,
            }) => {
                assert!(missing.contains(&"company_name_label".to_string()));
                assert!(!missing.contains(&"tipo_Laptop".to_string()));
                assert_eq!(vec!["cpu_speed".to_string()], unexpected);
            }
            other => panic!("expected a schema mismatch, got {:?}", other),
        }
    }

    #[test]
    fn should_leave_excluded_attributes_out() {
        let dataset = small_dataset();
        let pipeline = FittedPreprocessor::fit(&dataset, &["webcam".to_string()]).unwrap();

        assert_eq!(9, pipeline.dimensionality());
        assert!(!pipeline
            .output_columns()
            .contains(&"equip_webcam".to_string()));

        let without_webcam = FeatureRecord::from_pairs(
            dataset
                .schema()
                .all_keys()
                .iter()
                .filter(|key| key.as_str() != "equip_webcam")
                .map(|key| (key.clone(), 0.0)),
        );
        assert_eq!(9, pipeline.transform(&without_webcam).unwrap().len());
    }

    #[test]
    fn should_impute_missing_historical_cells() {
        let mut rows = vec![
            row(8.0, 1, 0, 1.0, 1.0),
            row(16.0, 1, 0, 1.0, 1.0),
            row(32.0, 0, 1, 2.0, 0.0),
        ];
        rows[2][0] = None;
        rows[2][7] = None;
        let dataset = HistoricalDataset::new(
            crate::test_fixtures::small_schema(),
            rows,
            vec![1.0, 2.0, 3.0],
            vec![String::new(); 3],
            "with gaps",
        )
        .unwrap();

        let pipeline = FittedPreprocessor::fit(&dataset, &[]).unwrap();
        let vectors = pipeline.transform_dataset(&dataset).unwrap();

        // ram median of 8 and 16 is 12; brand mode is Apple
        let deviation = (((8.0_f64 - 12.0).powi(2) + (16.0_f64 - 12.0).powi(2)) / 3.0).sqrt();
        assert!(approx_eq!(f64, 0.0, vectors[2][0], epsilon = 1e-12));
        assert!(approx_eq!(f64, -4.0 / deviation, vectors[0][0], epsilon = 1e-12));
        assert_eq!(vectors[0][pipeline.dimensionality() - 1], vectors[2][pipeline.dimensionality() - 1]);
    }

    #[test]
    fn should_refuse_empty_dataset() {
        let dataset = HistoricalDataset::new(
            crate::test_fixtures::small_schema(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            "empty",
        )
        .unwrap();

        assert!(matches!(
            FittedPreprocessor::fit(&dataset, &[]),
            Err(PipelineError::EmptyDataset)
        ));
    }
}
