//! Append-only user feedback on predictions and recommendations.
//!
//! Each submitted rating becomes one JSON line in a log file. Records are never
//! updated, deleted or deduplicated.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;
use crate::recommend::Recommendation;

/// UI-only state of the rating selector. Never persisted.
pub const RATING_PLACEHOLDER: &str = "Select an option";

pub const PRICE_FEEDBACK_FILE: &str = "price_predictor_feedback.jsonl";
pub const RECOMMENDATION_FEEDBACK_FILE: &str = "knn_recommendation_feedback.jsonl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyRating {
    #[serde(rename = "Very Inaccurate")]
    VeryInaccurate,
    #[serde(rename = "Somewhat Inaccurate")]
    SomewhatInaccurate,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Somewhat Accurate")]
    SomewhatAccurate,
    #[serde(rename = "Very Accurate")]
    VeryAccurate,
}

impl AccuracyRating {
    pub const ALL: [AccuracyRating; 5] = [
        AccuracyRating::VeryInaccurate,
        AccuracyRating::SomewhatInaccurate,
        AccuracyRating::Neutral,
        AccuracyRating::SomewhatAccurate,
        AccuracyRating::VeryAccurate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AccuracyRating::VeryInaccurate => "Very Inaccurate",
            AccuracyRating::SomewhatInaccurate => "Somewhat Inaccurate",
            AccuracyRating::Neutral => "Neutral",
            AccuracyRating::SomewhatAccurate => "Somewhat Accurate",
            AccuracyRating::VeryAccurate => "Very Accurate",
        }
    }
}

impl fmt::Display for AccuracyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccuracyRating {
    type Err = FeedbackError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() || raw == RATING_PLACEHOLDER {
            return Err(FeedbackError::RatingNotSelected);
        }
        AccuracyRating::ALL
            .iter()
            .find(|rating| rating.label() == raw)
            .copied()
            .ok_or_else(|| FeedbackError::UnknownRating(raw.to_string()))
    }
}

/// What the user rated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatedOutcome {
    PredictedPrice(f64),
    Recommendations(Vec<Recommendation>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// ISO-8601
    pub timestamp: String,
    #[serde(flatten)]
    pub outcome: RatedOutcome,
    pub accuracy_rating: AccuracyRating,
    pub comments: Option<String>,
    pub session_id: String,
    pub input_data: BTreeMap<String, f64>,
}

impl FeedbackRecord {
    /// Fails for the placeholder rating, so such feedback never reaches a sink.
    pub fn new(
        outcome: RatedOutcome,
        accuracy_rating: &str,
        comments: Option<&str>,
        session_id: &str,
        input_data: BTreeMap<String, f64>,
    ) -> Result<Self, FeedbackError> {
        let accuracy_rating = accuracy_rating.parse::<AccuracyRating>()?;
        let comments = comments
            .map(str::trim)
            .filter(|comment| !comment.is_empty())
            .map(String::from);

        Ok(FeedbackRecord {
            timestamp: chrono::Utc::now().to_rfc3339(),
            outcome,
            accuracy_rating,
            comments,
            session_id: session_id.to_string(),
            input_data,
        })
    }
}

pub trait FeedbackSink: Send + Sync {
    fn append(&self, record: &FeedbackRecord) -> Result<(), FeedbackError>;
}

/// One JSON object per line, appended under a lock.
pub struct JsonlFeedbackLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlFeedbackLog {
    pub fn open(path: &Path) -> Result<Self, FeedbackError> {
        let io_error = |source| FeedbackError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)?;
        Ok(JsonlFeedbackLog {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedbackSink for JsonlFeedbackLog {
    fn append(&self, record: &FeedbackRecord) -> Result<(), FeedbackError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| FeedbackError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }
}

/// The price and recommendation logs side by side in one directory.
pub struct FeedbackLogs {
    price: JsonlFeedbackLog,
    recommendations: JsonlFeedbackLog,
}

impl FeedbackLogs {
    pub fn open(directory: &str) -> Result<Self, FeedbackError> {
        let directory = Path::new(directory);
        let logs = FeedbackLogs {
            price: JsonlFeedbackLog::open(&directory.join(PRICE_FEEDBACK_FILE))?,
            recommendations: JsonlFeedbackLog::open(&directory.join(RECOMMENDATION_FEEDBACK_FILE))?,
        };
        tracing::info!("appending feedback to {}", directory.display());
        Ok(logs)
    }
}

impl FeedbackSink for FeedbackLogs {
    fn append(&self, record: &FeedbackRecord) -> Result<(), FeedbackError> {
        match record.outcome {
            RatedOutcome::PredictedPrice(_) => self.price.append(record),
            RatedOutcome::Recommendations(_) => self.recommendations.append(record),
        }
    }
}

#[cfg(test)]
mod feedback_test {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let directory = std::env::temp_dir().join(format!(
            "laptop-advisor-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&directory);
        directory
    }

    fn input_data() -> BTreeMap<String, f64> {
        vec![("ram_memoria_ram_GB".to_string(), 16.0)]
            .into_iter()
            .collect()
    }

    fn recommendations() -> Vec<Recommendation> {
        vec![Recommendation {
            listing: 1,
            title: "Apple MacBook Pro".to_string(),
            price: 1200.0,
            similarity: 1.0,
        }]
    }

    #[test]
    fn should_parse_the_five_ratings() {
        for rating in AccuracyRating::ALL.iter() {
            assert_eq!(*rating, rating.label().parse::<AccuracyRating>().unwrap());
        }
        assert!(matches!(
            "Mostly fine".parse::<AccuracyRating>(),
            Err(FeedbackError::UnknownRating(_))
        ));
    }

    #[test]
    fn should_reject_placeholder_before_reaching_the_sink() {
        let directory = scratch_dir("placeholder");
        let logs = FeedbackLogs::open(directory.to_str().unwrap()).unwrap();

        let result = FeedbackRecord::new(
            RatedOutcome::Recommendations(recommendations()),
            RATING_PLACEHOLDER,
            Some("looks right"),
            "session-a",
            input_data(),
        )
        .and_then(|record| logs.append(&record));

        assert!(matches!(result, Err(FeedbackError::RatingNotSelected)));
        let written = fs::read_to_string(directory.join(RECOMMENDATION_FEEDBACK_FILE)).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn should_append_one_line_per_event_to_the_matching_log() {
        let directory = scratch_dir("append");
        let logs = FeedbackLogs::open(directory.to_str().unwrap()).unwrap();

        for comment in &[Some("  "), Some("spot on")] {
            let record = FeedbackRecord::new(
                RatedOutcome::Recommendations(recommendations()),
                "Very Accurate",
                *comment,
                "session-a",
                input_data(),
            )
            .unwrap();
            logs.append(&record).unwrap();
        }
        let price = FeedbackRecord::new(
            RatedOutcome::PredictedPrice(1234.5),
            "Neutral",
            None,
            "session-b",
            input_data(),
        )
        .unwrap();
        logs.append(&price).unwrap();

        let written = fs::read_to_string(directory.join(RECOMMENDATION_FEEDBACK_FILE)).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(2, lines.len());

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!("Very Accurate", first["accuracy_rating"]);
        assert!(first["comments"].is_null());
        assert_eq!("Apple MacBook Pro", first["recommendations"][0]["title"]);
        assert_eq!(16.0, first["input_data"]["ram_memoria_ram_GB"]);
        assert!(chrono::DateTime::parse_from_rfc3339(first["timestamp"].as_str().unwrap()).is_ok());

        let second: FeedbackRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(Some("spot on".to_string()), second.comments);

        let price_log = fs::read_to_string(directory.join(PRICE_FEEDBACK_FILE)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(price_log.trim()).unwrap();
        assert_eq!(1234.5, parsed["predicted_price"]);
        assert_eq!("session-b", parsed["session_id"]);
    }
}
