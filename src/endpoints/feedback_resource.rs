use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::dataframeutils::SharedHandlesAndConfig;
use crate::error::{AdvisorError, FeedbackError};
use crate::feedback::{FeedbackRecord, RatedOutcome};
use crate::sessions::session_key;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTarget {
    Price,
    Recommendations,
}

#[derive(Debug, Deserialize)]
pub struct V1FeedbackRequest {
    pub session_id: String,
    pub target: FeedbackTarget,
    pub accuracy_rating: String,
    pub comments: Option<String>,
}

// Rates the last price or recommendation list produced for the session.
#[post("/v1/feedback")]
pub async fn v1_feedback(
    data: web::Data<SharedHandlesAndConfig>,
    request: web::Json<V1FeedbackRequest>,
) -> Result<HttpResponse, AdvisorError> {
    let state = data
        .session_store
        .get_session_state(&session_key(&request.session_id))?;

    let (outcome, input_data) = match request.target {
        FeedbackTarget::Price => state
            .last_price
            .map(|interaction| {
                (
                    RatedOutcome::PredictedPrice(interaction.outcome.price),
                    interaction.input_data,
                )
            })
            .ok_or(FeedbackError::NothingToRate("price prediction"))?,
        FeedbackTarget::Recommendations => state
            .last_recommendations
            .map(|interaction| {
                (
                    RatedOutcome::Recommendations(interaction.outcome.recommendations),
                    interaction.input_data,
                )
            })
            .ok_or(FeedbackError::NothingToRate("recommendation list"))?,
    };

    let record = FeedbackRecord::new(
        outcome,
        &request.accuracy_rating,
        request.comments.as_deref(),
        &request.session_id,
        input_data,
    )?;
    data.feedback.append(&record)?;
    tracing::info!(
        "feedback {} from session {}",
        record.accuracy_rating,
        record.session_id
    );

    Ok(HttpResponse::Created().json(record))
}
