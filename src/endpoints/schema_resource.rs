use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::dataframeutils::SharedHandlesAndConfig;
use crate::schema::{Attribute, Domain, FeatureKind, FeatureSchema};

/// What an input form needs to render one attribute.
#[derive(Debug, Serialize)]
pub struct AttributeView {
    pub name: String,
    pub kind: FeatureKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub default: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct V1SchemaResponse {
    pub attributes: Vec<AttributeView>,
    pub price_model_available: bool,
}

fn view(schema: &FeatureSchema, attribute: &Attribute) -> AttributeView {
    let first = schema.descriptor(attribute.columns[0]);
    let (min, max) = match first.domain {
        Domain::Range { min, max } => (Some(min), Some(max)),
        _ => (None, None),
    };
    let default = match attribute.default_option {
        Some(option) => serde_json::Value::from(attribute.options[option].clone()),
        None => serde_json::Value::from(first.default),
    };
    AttributeView {
        name: attribute.name.clone(),
        kind: attribute.kind,
        options: attribute.options.clone(),
        default,
        min,
        max,
    }
}

#[get("/v1/schema")]
pub async fn v1_schema(data: web::Data<SharedHandlesAndConfig>) -> HttpResponse {
    let schema = data.service.schema();
    let attributes = schema
        .attributes()
        .iter()
        .map(|attribute| view(schema, attribute))
        .collect();

    HttpResponse::Ok().json(V1SchemaResponse {
        attributes,
        price_model_available: data.service.has_price_model(),
    })
}
