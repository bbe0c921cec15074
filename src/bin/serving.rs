extern crate laptop_advisor;

use actix_web::{
    http::ContentEncoding, middleware, web, App, HttpRequest, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use anyhow::Context;

use actix_web::http::header;
use std::sync::Arc;
use std::time::Duration;

use laptop_advisor::config::AppConfig;
use laptop_advisor::dataframeutils::SharedHandlesAndConfig;
use laptop_advisor::endpoints::feedback_resource::v1_feedback;
use laptop_advisor::endpoints::index_resource::internal;
use laptop_advisor::endpoints::predict_resource::v1_predict;
use laptop_advisor::endpoints::recommend_resource::v1_recommend;
use laptop_advisor::endpoints::schema_resource::v1_schema;
use laptop_advisor::feedback::{FeedbackLogs, FeedbackSink};
use laptop_advisor::logging;
use laptop_advisor::service::RecommenderService;
use laptop_advisor::sessions::RocksDBSessionStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(config_path)?;
    logging::init(&config.log.level)?;

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let qty_workers = config.server.num_workers;

    // Nothing is served until the dataset, pipeline and index are ready.
    let service = Arc::new(RecommenderService::from_config(&config)?);

    tracing::info!("start db at {}", config.sessions.db_path);
    let session_ttl = Duration::from_secs(config.sessions.ttl_secs);
    let db = Arc::new(RocksDBSessionStore::new(&config.sessions.db_path, session_ttl)?);

    let feedback: Arc<dyn FeedbackSink> = Arc::new(FeedbackLogs::open(&config.feedback.directory)?);

    tracing::info!("start metrics");
    let prometheus = PrometheusMetrics::new("api", Some("/internal/prometheus"), None);

    tracing::info!("Done. start httpd at http://{}", &bind_address);
    HttpServer::new(move || {
        let handles_and_config = SharedHandlesAndConfig {
            service: service.clone(),
            session_store: db.clone(),
            feedback: feedback.clone(),
            qty_workers,
            db_compaction_ttl_in_secs: session_ttl.as_secs() as usize,
        };

        App::new()
            .wrap(middleware::Compress::new(ContentEncoding::Identity))
            .wrap(prometheus.clone())
            .wrap(
                middleware::DefaultHeaders::new()
                    .header("Cache-Control", "no-cache, no-store, must-revalidate")
                    .header("Pragma", "no-cache")
                    .header("Expires", "0"),
            )
            .data(handles_and_config)
            .service(v1_recommend)
            .service(v1_predict)
            .service(v1_feedback)
            .service(v1_schema)
            .service(internal)
            .service(web::resource("/").route(web::get().to(|_req: HttpRequest| {
                HttpResponse::Found()
                    .header(header::LOCATION, "/internal")
                    .finish()
            })))
    })
    .workers(qty_workers)
    .bind(&bind_address)
    .with_context(|| format!("Could not bind server to address {}", &bind_address))?
    .run()
    .await?;

    Ok(())
}
