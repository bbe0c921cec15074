use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::error::{AdvisorError, FeedbackError, PipelineError};

pub mod feedback_resource;
pub mod index_resource;
pub mod predict_resource;
pub mod recommend_resource;
pub mod schema_resource;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for AdvisorError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdvisorError::Query(_) => StatusCode::BAD_REQUEST,
            AdvisorError::Feedback(FeedbackError::RatingNotSelected)
            | AdvisorError::Feedback(FeedbackError::UnknownRating(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AdvisorError::Feedback(FeedbackError::NothingToRate(_)) => StatusCode::CONFLICT,
            AdvisorError::Model(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AdvisorError::Pipeline(PipelineError::SchemaMismatch { .. }) => {
                tracing::error!("request violated the pipeline contract: {}", self)
            }
            _ if status.is_server_error() => tracing::error!("request failed: {}", self),
            _ => tracing::warn!("rejected request: {}", self),
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::config::ModelConfig;
    use crate::dataframeutils::SharedHandlesAndConfig;
    use crate::feedback::FeedbackLogs;
    use crate::model::GradientBoostedTrees;
    use crate::service::RecommenderService;
    use crate::sessions::RocksDBSessionStore;
    use crate::test_fixtures::{small_dataset, PRICE_MODEL};

    pub fn scratch_path(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "laptop-advisor-endpoint-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        path
    }

    pub fn handles(name: &str, with_model: bool) -> SharedHandlesAndConfig {
        let model = if with_model {
            GradientBoostedTrees::from_json(PRICE_MODEL)
                .ok()
                .map(|model| Box::new(model) as Box<dyn crate::model::PriceModel>)
        } else {
            None
        };
        let settings = ModelConfig {
            neighbors_k: 3,
            similarity_floor: 1.0,
            excluded_features: Vec::new(),
        };
        let service = RecommenderService::build(small_dataset(), settings, model).unwrap();

        let root = scratch_path(name);
        let sessions = root.join("sessions.db");
        let feedback = root.join("feedback");
        std::fs::create_dir_all(&root).unwrap();

        SharedHandlesAndConfig {
            service: Arc::new(service),
            session_store: Arc::new(
                RocksDBSessionStore::new(sessions.to_str().unwrap(), Duration::from_secs(60))
                    .unwrap(),
            ),
            feedback: Arc::new(FeedbackLogs::open(feedback.to_str().unwrap()).unwrap()),
            qty_workers: 1,
            db_compaction_ttl_in_secs: 60,
        }
    }
}

#[cfg(test)]
mod endpoints_test {
    use super::*;
    use crate::error::{ModelError, QueryError};

    #[test]
    fn should_map_errors_to_status_codes() {
        let unknown = AdvisorError::Query(QueryError::UnknownCategory {
            attribute: "brand".to_string(),
            value: "Nonexistent Corp".to_string(),
        });
        assert_eq!(StatusCode::BAD_REQUEST, unknown.status_code());
        assert_eq!(
            StatusCode::UNPROCESSABLE_ENTITY,
            AdvisorError::Feedback(FeedbackError::RatingNotSelected).status_code()
        );
        assert_eq!(
            StatusCode::CONFLICT,
            AdvisorError::Feedback(FeedbackError::NothingToRate("price prediction")).status_code()
        );
        assert_eq!(
            StatusCode::SERVICE_UNAVAILABLE,
            AdvisorError::Model(ModelError::Unavailable).status_code()
        );
        let mismatch = AdvisorError::Pipeline(PipelineError::SchemaMismatch {
            missing: vec!["tipo_Laptop".to_string()],
            unexpected: Vec::new(),
        });
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, mismatch.status_code());
    }
}
