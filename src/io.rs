//! Loading of the historical listing table.
//!
//! Three aligned CSV inputs are joined by row position: the feature table,
//! the price vector and the title vector. Row `i` in all three is the same
//! listing, and `i` is the index space used by the similarity index.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;

use crate::error::{AdvisorError, DatasetError};
use crate::schema::{AttributeSpec, FeatureId, FeatureSchema};

pub type ListingIndex = usize;

const INDEX_COLUMNS: &[&str] = &["", "Unnamed: 0"];
const PRICE_COLUMN: &str = "price_avg";
const TITLE_COLUMNS: &[&str] = &["título", "titulo", "title"];

pub struct HistoricalDataset {
    schema: Arc<FeatureSchema>,
    rows: Vec<Vec<Option<f64>>>,
    prices: Vec<f64>,
    titles: Vec<String>,
    descriptive_name: String,
}

impl HistoricalDataset {
    /// `rows` must be in schema column order. A missing cell is `None`.
    pub fn new(
        schema: Arc<FeatureSchema>,
        rows: Vec<Vec<Option<f64>>>,
        prices: Vec<f64>,
        titles: Vec<String>,
        descriptive_name: &str,
    ) -> Result<Self, DatasetError> {
        if rows.len() != prices.len() || rows.len() != titles.len() {
            return Err(DatasetError::RowCountMismatch {
                features: rows.len(),
                prices: prices.len(),
                titles: titles.len(),
            });
        }
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != schema.len())
        {
            return Err(DatasetError::RaggedRow {
                row,
                expected: schema.len(),
                actual: values.len(),
            });
        }
        Ok(HistoricalDataset {
            schema,
            rows,
            prices,
            titles,
            descriptive_name: descriptive_name.to_string(),
        })
    }

    pub fn schema(&self) -> &Arc<FeatureSchema> {
        &self.schema
    }

    pub fn row(&self, index: ListingIndex) -> &[Option<f64>] {
        &self.rows[index]
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub fn column(&self, position: FeatureId) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(move |row| row[position])
    }

    pub fn price(&self, index: ListingIndex) -> f64 {
        self.prices[index]
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Stored title, or a synthetic one when the stored title is blank.
    pub fn display_title(&self, index: ListingIndex) -> String {
        let title = self.titles[index].trim();
        if title.is_empty() {
            format!("Listing #{}", index)
        } else {
            title.to_string()
        }
    }

    pub fn descriptive_name(&self) -> &str {
        &self.descriptive_name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Loads and aligns the three inputs. Any failure here is fatal to startup.
pub fn load_dataset(
    features_path: &str,
    prices_path: &str,
    titles_path: &str,
    catalog: &[AttributeSpec],
) -> Result<HistoricalDataset, AdvisorError> {
    let (schema, rows) = read_features(open(features_path)?, catalog)?;
    let prices = read_prices(open(prices_path)?, prices_path)?;
    let titles = read_titles(open(titles_path)?)?;
    tracing::info!(
        "read {} feature rows, {} prices, {} titles",
        rows.len(),
        prices.len(),
        titles.len()
    );
    Ok(HistoricalDataset::new(
        Arc::new(schema),
        rows,
        prices,
        titles,
        features_path,
    )?)
}

fn open(path: &str) -> Result<csv::Reader<File>, DatasetError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(Path::new(path))
        .map_err(|source| DatasetError::Csv {
            path: path.to_string(),
            source,
        })
}

fn csv_error(source: csv::Error) -> DatasetError {
    DatasetError::Csv {
        path: String::from("<input>"),
        source,
    }
}

/// Resolves the schema from the header row and reads every row in schema order.
pub fn read_features<R: Read>(
    mut reader: csv::Reader<R>,
    catalog: &[AttributeSpec],
) -> Result<(FeatureSchema, Vec<Vec<Option<f64>>>), AdvisorError> {
    let headers = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(String::from)
        .collect_vec();
    let schema = FeatureSchema::from_headers(catalog, &headers)?;

    // Every schema key was resolved from these headers.
    let source_columns: Vec<usize> = schema
        .all_keys()
        .iter()
        .filter_map(|key| headers.iter().position(|header| header == key))
        .collect();

    let mut rows = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        let mut row = Vec::with_capacity(source_columns.len());
        for (key, source) in schema.all_keys().iter().zip(&source_columns) {
            let raw = record.get(*source).unwrap_or("");
            let cell = parse_cell(raw).ok_or_else(|| DatasetError::InvalidCell {
                row: row_index,
                column: key.clone(),
                value: raw.to_string(),
            })?;
            row.push(cell);
        }
        rows.push(row);
    }
    Ok((schema, rows))
}

/// Reads the price vector. A leading unnamed index column is skipped and
/// `price_avg` is preferred over the first remaining column.
pub fn read_prices<R: Read>(
    mut reader: csv::Reader<R>,
    descriptive_name: &str,
) -> Result<Vec<f64>, DatasetError> {
    let headers = reader.headers().map_err(csv_error)?.clone();
    let column = headers
        .iter()
        .position(|header| header == PRICE_COLUMN)
        .or_else(|| {
            headers
                .iter()
                .position(|header| !INDEX_COLUMNS.contains(&header.trim()))
        })
        .ok_or_else(|| DatasetError::NoPriceColumn(descriptive_name.to_string()))?;
    let column_name = headers.get(column).unwrap_or_default().to_string();

    let mut prices = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        let raw = record.get(column).unwrap_or("");
        match parse_cell(raw) {
            Some(Some(price)) => prices.push(price),
            _ => {
                return Err(DatasetError::InvalidCell {
                    row,
                    column: column_name,
                    value: raw.to_string(),
                })
            }
        }
    }
    Ok(prices)
}

/// Reads listing titles. Without a title column every title is blank, which
/// later renders as a synthetic `Listing #<row>` title.
pub fn read_titles<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<String>, DatasetError> {
    let headers = reader.headers().map_err(csv_error)?.clone();
    let column = headers
        .iter()
        .position(|header| TITLE_COLUMNS.contains(&header.trim()));
    if column.is_none() {
        tracing::warn!("no title column found, listings will be shown by row number");
    }

    let mut titles = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let title = column
            .and_then(|position| record.get(position))
            .unwrap_or("")
            .to_string();
        titles.push(title);
    }
    Ok(titles)
}

/// `Some(None)` for a missing cell, `None` for an unparseable one.
fn parse_cell(raw: &str) -> Option<Option<f64>> {
    let trimmed = raw.trim();
    match trimmed {
        "" | "nan" | "NaN" | "NA" | "null" => Some(None),
        _ if trimmed.eq_ignore_ascii_case("true") => Some(Some(1.0)),
        _ if trimmed.eq_ignore_ascii_case("false") => Some(Some(0.0)),
        _ => trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| !value.is_nan())
            .map(Some),
    }
}
