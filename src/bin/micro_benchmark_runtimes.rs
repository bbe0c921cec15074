extern crate laptop_advisor;

use bencher::black_box;
use num_format::{Locale, ToFormattedString};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use laptop_advisor::config::AppConfig;
use laptop_advisor::logging;
use laptop_advisor::query::{SelectionValue, Selections};
use laptop_advisor::schema::{Domain, FeatureKind, FeatureSchema};
use laptop_advisor::service::RecommenderService;
use laptop_advisor::stopwatch::Stopwatch;

const NUM_QUERIES: u64 = 10_000;

/// Picks a value for every attribute, uniformly over its declared domain.
fn random_selections(schema: &FeatureSchema, rng: &mut Pcg64) -> Selections {
    let mut selections = Selections::new();
    for attribute in schema.attributes() {
        let value = match attribute.kind {
            FeatureKind::Numeric => match schema.descriptor(attribute.columns[0]).domain {
                Domain::Range { min, max } if max > min => {
                    SelectionValue::Number(rng.gen_range(min..=max))
                }
                Domain::Range { min, .. } => SelectionValue::Number(min),
                _ => continue,
            },
            FeatureKind::OneHot | FeatureKind::LabelEncoded => {
                if attribute.options.is_empty() {
                    continue;
                }
                let option = rng.gen_range(0..attribute.options.len());
                SelectionValue::Choice(attribute.options[option].clone())
            }
        };
        selections.insert(attribute.name.clone(), value);
    }
    selections
}

fn main() -> anyhow::Result<()> {
    // Times the query path stage by stage on the configured dataset.
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(config_path)?;
    logging::init(&config.log.level)?;
    let service = RecommenderService::from_config(&config)?;

    let mut build_watch = Stopwatch::new();
    let mut recommend_watch = Stopwatch::new();
    let mut predict_watch = Stopwatch::new();
    let mut predict_failures = 0;

    for seed in 0..NUM_QUERIES {
        let mut rng = Pcg64::seed_from_u64(seed);
        let selections = random_selections(service.schema(), &mut rng);

        let record = build_watch.time(|| service.build_record(&selections))?;
        black_box(recommend_watch.time(|| service.recommend_record(&record, None))?);
        if service.has_price_model() {
            if let Err(error) = black_box(predict_watch.time(|| service.predict_price(&record))) {
                if predict_failures == 0 {
                    tracing::warn!("price prediction failed: {}", error);
                }
                predict_failures += 1;
            }
        }
    }

    println!(
        "{} queries over {} listings",
        NUM_QUERIES.to_formatted_string(&Locale::en),
        service.dataset().len().to_formatted_string(&Locale::en)
    );
    println!("build_record      {}", build_watch.summary());
    println!("recommend_record  {}", recommend_watch.summary());
    if service.has_price_model() {
        println!(
            "predict_price     {} failures={}",
            predict_watch.summary(),
            predict_failures
        );
    }

    Ok(())
}
