pub mod config;
pub mod config_processors;
pub mod dataframeutils;
pub mod endpoints;
pub mod error;
pub mod feedback;
pub mod io;
pub mod knn;
pub mod logging;
pub mod model;
pub mod preprocessing;
pub mod query;
pub mod recommend;
pub mod schema;
pub mod service;
pub mod sessions;
pub mod stopwatch;

#[cfg(test)]
mod test_fixtures;
