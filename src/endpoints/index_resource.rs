extern crate sys_info;

use actix_web::{get, web, HttpResponse};
use num_format::{Locale, ToFormattedString};

use crate::dataframeutils::SharedHandlesAndConfig;
use web::Data;

#[get("/internal")]
pub async fn internal(config: Data<SharedHandlesAndConfig>) -> HttpResponse {
    let mut html = "<html>laptop-advisor: price estimates and similar listings.<br />".to_string();

    let data_stats = config.service.stats();
    html.push_str("<h3>Historical data</h3>");
    html.push_str("Loaded: ");
    html.push_str(&data_stats.descriptive_name);
    html.push_str("<br />Qty listings: ");
    html.push_str(&data_stats.qty_records.to_formatted_string(&Locale::en));
    html.push_str("<br />Qty feature columns: ");
    html.push_str(&data_stats.qty_features.to_string());
    html.push_str("<br />Qty attributes: ");
    html.push_str(&data_stats.qty_attributes.to_string());
    html.push_str(" (one-hot families: ");
    html.push_str(&data_stats.qty_families.to_string());
    html.push_str(", label-encoded: ");
    html.push_str(&data_stats.qty_label_encoded.to_string());
    html.push(')');
    html.push_str("<br />Price: ");
    html.push_str(&format!(
        " min={:.2} p50={:.2} max={:.2} mean={:.2}",
        data_stats.price_min, data_stats.price_p50, data_stats.price_max, data_stats.price_mean
    ));

    let settings = config.service.settings();
    html.push_str("<h3>Models</h3>");
    html.push_str("similarity");
    html.push_str("<br />k : ");
    html.push_str(&settings.neighbors_k.to_string());
    html.push_str(" (listings returned per query)");
    html.push_str("<br />similarity floor : ");
    html.push_str(&settings.similarity_floor.to_string());
    html.push_str("<br />numeric inputs : ");
    html.push_str(&data_stats.qty_numeric_inputs.to_string());
    html.push_str("<br />categorical inputs : ");
    html.push_str(&data_stats.qty_categorical_inputs.to_string());
    html.push_str("<br />dimensionality : ");
    html.push_str(&data_stats.dimensionality.to_string());
    html.push_str("<br />excluded features : ");
    html.push_str(&settings.excluded_features.join(", "));
    html.push_str("<br />price model: ");
    html.push_str(if config.service.has_price_model() {
        "loaded"
    } else {
        "unavailable"
    });
    html.push_str("<br /><a href=\"/v1/schema\">v1 schema of the input form</a>");
    html.push_str("<h3>Machine instance</h3>");
    html.push_str("<br />Qty CPU's detected: ");
    html.push_str(&sys_info::cpu_num().unwrap_or(0).to_string());
    html.push_str("<br />Qty actix workers set: ");
    html.push_str(&config.qty_workers.to_string());
    html.push_str("<br />CPU speed: ");
    html.push_str(&sys_info::cpu_speed().unwrap_or(0).to_string());
    html.push_str("MHz");
    html.push_str("<br />Active processes on instance: ");
    html.push_str(&sys_info::proc_total().unwrap_or(0).to_string());
    html.push_str("<h3>Session store</h3>");
    html.push_str("<br />Compaction TTL: ");
    html.push_str(&config.db_compaction_ttl_in_secs.to_string());
    html.push_str(" seconds");
    html.push_str("<h3>Metrics</h3>");
    html.push_str("<a href=\"/internal/prometheus\">prometheus</a>");
    html.push_str("</html>");

    HttpResponse::Ok().content_type("text/html").body(html)
}
