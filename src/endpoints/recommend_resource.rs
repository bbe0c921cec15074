use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::dataframeutils::SharedHandlesAndConfig;
use crate::error::AdvisorError;
use crate::query::{FeatureRecord, Selections};
use crate::recommend::Recommendation;
use crate::sessions::{session_key, Interaction};

#[derive(Debug, Deserialize)]
pub struct V1RecommendRequest {
    pub session_id: String,
    #[serde(default)]
    pub selections: Selections,
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct V1RecommendResponse {
    pub input_data: FeatureRecord,
    pub recommendations: Vec<Recommendation>,
}

// Similar listings for one set of selections. The result is remembered for
// the session so that it can be rated through /v1/feedback.
#[post("/v1/recommend")]
pub async fn v1_recommend(
    data: web::Data<SharedHandlesAndConfig>,
    request: web::Json<V1RecommendRequest>,
) -> Result<HttpResponse, AdvisorError> {
    let service = data.service.as_ref();
    let record = service.build_record(&request.selections)?;
    let result = service.recommend_record(&record, request.k)?;

    let evolving_session_key = session_key(&request.session_id);
    data.session_store.store_recommendations(
        &evolving_session_key,
        Interaction {
            input_data: record.to_map(),
            outcome: result.clone(),
        },
    )?;

    Ok(HttpResponse::Ok().json(V1RecommendResponse {
        input_data: record,
        recommendations: result.recommendations,
    }))
}

#[cfg(test)]
mod recommend_resource_test {
    use super::*;
    use crate::endpoints::test_support::handles;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_rt::test]
    async fn should_return_ranked_recommendations() {
        let data = handles("recommend", false);
        let store = data.session_store.clone();
        let mut app = test::init_service(App::new().data(data).service(v1_recommend)).await;

        let request = test::TestRequest::post()
            .uri("/v1/recommend")
            .set_json(&json!({
                "session_id": "abc",
                "selections": {"ram_gb": 16, "device_type": "Laptop", "product_type": "Ultrabook",
                               "brand": "Apple", "webcam": true}
            }))
            .to_request();
        let response = test::call_service(&mut app, request).await;
        assert!(response.status().is_success());

        let body: Value = test::read_body_json(response).await;
        let recommendations = body["recommendations"].as_array().unwrap();
        assert_eq!(3, recommendations.len());
        assert_eq!(1, recommendations[0]["listing"]);
        assert_eq!("Apple MacBook Pro", recommendations[0]["title"]);
        assert_eq!(1200.0, recommendations[0]["price"]);
        assert_eq!(16.0, body["input_data"]["ram_memoria_ram_GB"]);

        let state = store.get_session_state(&session_key("abc")).unwrap();
        assert_eq!(3, state.last_recommendations.unwrap().outcome.len());
    }

    #[actix_rt::test]
    async fn should_reject_unknown_brand() {
        let data = handles("recommend-unknown", false);
        let mut app = test::init_service(App::new().data(data).service(v1_recommend)).await;

        let request = test::TestRequest::post()
            .uri("/v1/recommend")
            .set_json(&json!({
                "session_id": "abc",
                "selections": {"brand": "Nonexistent Corp"}
            }))
            .to_request();
        let response = test::call_service(&mut app, request).await;

        assert_eq!(400, response.status().as_u16());
        let body: Value = test::read_body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Nonexistent Corp"));
    }
}
