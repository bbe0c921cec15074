use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use serde::Serialize;

use laptop_advisor::config::AppConfig;
use laptop_advisor::logging;
use laptop_advisor::query::Selections;
use laptop_advisor::service::RecommenderService;

#[derive(Serialize)]
struct OutputLine<'a> {
    query: usize,
    rank: usize,
    listing: usize,
    title: &'a str,
    price: f64,
    similarity: f64,
    predicted_price: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    // Answers a batch of queries offline. The input is a JSON array of
    // selection objects, the output one CSV line per recommended listing.
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let queries_path = std::env::args()
        .nth(2)
        .context("usage: recommend_file <config> <queries.json>")?;

    let config = AppConfig::new(config_path)?;
    logging::init(&config.log.level)?;
    let service = RecommenderService::from_config(&config)?;

    let file = File::open(&queries_path).with_context(|| format!("opening {}", queries_path))?;
    let queries: Vec<Selections> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", queries_path))?;
    tracing::info!("answering {} queries from {}", queries.len(), queries_path);

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for (query, selections) in queries.iter().enumerate() {
        let (record, result) = match service.recommend(selections) {
            Ok(answer) => answer,
            Err(error) => {
                tracing::warn!("query {} skipped: {}", query, error);
                continue;
            }
        };
        let predicted_price = if service.has_price_model() {
            service
                .predict_price(&record)
                .map(|prediction| prediction.price)
                .map_err(|error| tracing::warn!("query {} has no price: {}", query, error))
                .ok()
        } else {
            None
        };

        for (rank, recommendation) in result.recommendations.iter().enumerate() {
            writer.serialize(OutputLine {
                query,
                rank: rank + 1,
                listing: recommendation.listing,
                title: &recommendation.title,
                price: recommendation.price,
                similarity: recommendation.similarity,
                predicted_price,
            })?;
        }
    }
    writer.flush()?;

    Ok(())
}
