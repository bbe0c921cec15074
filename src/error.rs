use thiserror::Error;

/// Raised while resolving an attribute catalog against dataset headers.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("dataset columns do not match the feature catalog, missing: {}", .missing.join(", "))]
    SchemaLoad { missing: Vec<String> },

    #[error("column {0} appears more than once in the dataset header")]
    DuplicateColumn(String),

    #[error("invalid feature catalog: {0}")]
    InvalidCatalog(String),

    #[error("could not read feature catalog {path}: {source}")]
    CatalogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse feature catalog: {0}")]
    CatalogFormat(#[from] serde_json::Error),
}

/// Rejected user input. Recoverable per request.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("unknown {attribute}: {value}")]
    UnknownCategory { attribute: String, value: String },

    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("invalid value for {attribute}: expected {expected}")]
    InvalidSelection {
        attribute: String,
        expected: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(
        "feature record does not match the fitted pipeline, missing: [{}], unexpected: [{}]",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("cannot fit a pipeline on an empty dataset")]
    EmptyDataset,

    #[error("vector dimensionality mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Failures of the price model collaborator.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("prediction unavailable: no price model loaded")]
    Unavailable,

    #[error("missing features in input data: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),

    #[error("price model returned malformed output: {0}")]
    Malformed(String),

    #[error("could not load price model {path}: {reason}")]
    Load { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("could not read {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("row count mismatch: {features} feature rows, {prices} prices, {titles} titles")]
    RowCountMismatch {
        features: usize,
        prices: usize,
        titles: usize,
    },

    #[error("invalid value {value:?} in column {column}, row {row}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("{0} has no usable price column")]
    NoPriceColumn(String),

    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("please select an accuracy rating")]
    RatingNotSelected,

    #[error("unknown accuracy rating: {0}")]
    UnknownRating(String),

    #[error("no {0} has been produced for this session yet")]
    NothingToRate(&'static str),

    #[error("could not write feedback log {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode feedback record: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("session store failure: {0}")]
    RocksDB(#[from] rocksdb::Error),

    #[error("could not encode session state: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Everything the advisor can fail with, grouped by concern.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    #[error(transparent)]
    Sessions(#[from] SessionStoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
