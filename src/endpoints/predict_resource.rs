use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::dataframeutils::SharedHandlesAndConfig;
use crate::error::AdvisorError;
use crate::query::{FeatureRecord, Selections};
use crate::sessions::{session_key, Interaction};

#[derive(Debug, Deserialize)]
pub struct V1PredictRequest {
    pub session_id: String,
    #[serde(default)]
    pub selections: Selections,
}

#[derive(Debug, Serialize)]
pub struct V1PredictResponse {
    pub input_data: FeatureRecord,
    pub log_price: f64,
    pub predicted_price: f64,
}

// Price estimate for one set of selections. Independent of the similarity
// index; an unavailable model only affects this endpoint.
#[post("/v1/predict")]
pub async fn v1_predict(
    data: web::Data<SharedHandlesAndConfig>,
    request: web::Json<V1PredictRequest>,
) -> Result<HttpResponse, AdvisorError> {
    let service = data.service.as_ref();
    let record = service.build_record(&request.selections)?;
    let prediction = service.predict_price(&record)?;

    data.session_store.store_price(
        &session_key(&request.session_id),
        Interaction {
            input_data: record.to_map(),
            outcome: prediction,
        },
    )?;

    Ok(HttpResponse::Ok().json(V1PredictResponse {
        input_data: record,
        log_price: prediction.log_price,
        predicted_price: prediction.price,
    }))
}
