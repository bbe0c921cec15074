use std::ffi::OsStr;
use std::fs::File;

use justconfig::item::ValueExtractor;
use justconfig::processors::Trim;
use justconfig::sources::env::Env;
use justconfig::sources::text::ConfigText;
use justconfig::ConfPath;
use justconfig::Config;

use crate::config_processors::Unquote;
use crate::error::AdvisorError;
use crate::schema::catalog::DEFAULT_SIMILARITY_EXCLUSIONS;

// Set some default values
const DEFAULT_NEIGHBORS_K: usize = 5;
const DEFAULT_SIMILARITY_FLOOR: f64 = 1.0;
const DEFAULT_FEEDBACK_DIRECTORY: &str = "feedback";
const DEFAULT_SESSIONS_DB_PATH: &str = "./sessions.db";
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub data: DataConfig,
    pub model: ModelConfig,
    pub feedback: FeedbackConfig,
    pub sessions: SessionsConfig,
}

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub num_workers: usize,
}

pub struct LogConfig {
    pub level: String,
}

pub struct DataConfig {
    pub features_path: String,
    pub prices_path: String,
    pub titles_path: String,
    pub schema_path: Option<String>,
    pub model_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub neighbors_k: usize,
    pub similarity_floor: f64,
    pub excluded_features: Vec<String>,
}

pub struct FeedbackConfig {
    pub directory: String,
}

pub struct SessionsConfig {
    pub db_path: String,
    pub ttl_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            neighbors_k: DEFAULT_NEIGHBORS_K,
            similarity_floor: DEFAULT_SIMILARITY_FLOOR,
            excluded_features: DEFAULT_SIMILARITY_EXCLUSIONS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.neighbors_k == 0 {
            return Err(AdvisorError::Config(String::from(
                "model.neighbors_k must be at least 1",
            )));
        }
        if !(self.similarity_floor > 0.0 && self.similarity_floor.is_finite()) {
            return Err(AdvisorError::Config(format!(
                "model.similarity_floor must be a positive number, got {}",
                self.similarity_floor
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Reads the optional config file at `config_path`, overlaid with the
    /// environment.
    pub fn new(config_path: String) -> Result<AppConfig, AdvisorError> {
        // Initialize config object
        let mut conf = Config::default();

        // Check if there is a config file
        if let Ok(config_file) = File::open(&config_path) {
            let config_text = ConfigText::new(config_file, &config_path).map_err(|error| {
                AdvisorError::Config(format!("loading {} failed: {}", config_path, error))
            })?;
            conf.add_source(config_text);
        }

        // Define config params from environment variables
        let config_env = Env::new(&[
            (
                ConfPath::from(&["data", "features_path"]),
                OsStr::new("FEATURES_DATA"),
            ),
            (
                ConfPath::from(&["data", "prices_path"]),
                OsStr::new("PRICES_DATA"),
            ),
            (
                ConfPath::from(&["data", "titles_path"]),
                OsStr::new("TITLES_DATA"),
            ),
            (
                ConfPath::from(&["data", "model_path"]),
                OsStr::new("PRICE_MODEL"),
            ),
            (
                ConfPath::from(&["server", "num_workers"]),
                OsStr::new("NUM_WORKERS"),
            ),
        ]);
        conf.add_source(config_env);

        // Parse into custom config struct
        AppConfig::parse(conf)
    }

    fn parse(conf: Config) -> Result<AppConfig, AdvisorError> {
        let model = ModelConfig::parse(&conf, ConfPath::from(&["model"]));
        model.validate()?;
        Ok(AppConfig {
            server: ServerConfig::parse(&conf, ConfPath::from(&["server"])),
            log: LogConfig::parse(&conf, ConfPath::from(&["log"])),
            data: DataConfig::parse(&conf, ConfPath::from(&["data"]))?,
            model,
            feedback: FeedbackConfig::parse(&conf, ConfPath::from(&["feedback"])),
            sessions: SessionsConfig::parse(&conf, ConfPath::from(&["sessions"])),
        })
    }
}

fn required(conf: &Config, path: ConfPath) -> Result<String, AdvisorError> {
    conf.get(path)
        .unquote()
        .value()
        .map_err(|error| AdvisorError::Config(error.to_string()))
}

fn optional(conf: &Config, path: ConfPath) -> Option<String> {
    conf.get(path)
        .unquote()
        .value()
        .ok()
        .filter(|value: &String| !value.trim().is_empty())
}

/// Comma separated list, blank entries dropped.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

impl ServerConfig {
    fn parse(conf: &Config, path: ConfPath) -> ServerConfig {
        ServerConfig {
            host: conf
                .get(path.push("host"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from("0.0.0.0")),
            port: conf.get(path.push("port")).trim().value().unwrap_or(8080),
            num_workers: conf
                .get(path.push("num_workers"))
                .trim()
                .value()
                // Detect number of CPUs
                .unwrap_or_else(|_| sys_info::cpu_num().map(|cpus| cpus as usize).unwrap_or(1))
                .max(1),
        }
    }
}

impl LogConfig {
    fn parse(conf: &Config, path: ConfPath) -> LogConfig {
        LogConfig {
            level: conf
                .get(path.push("level"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from("info")),
        }
    }
}

impl DataConfig {
    fn parse(conf: &Config, path: ConfPath) -> Result<DataConfig, AdvisorError> {
        Ok(DataConfig {
            features_path: required(conf, path.push("features_path"))?,
            prices_path: required(conf, path.push("prices_path"))?,
            titles_path: required(conf, path.push("titles_path"))?,
            schema_path: optional(conf, path.push("schema_path")),
            model_path: optional(conf, path.push("model_path")),
        })
    }
}

impl ModelConfig {
    fn parse(conf: &Config, path: ConfPath) -> ModelConfig {
        let defaults = ModelConfig::default();
        let neighbors_k = conf
            .get(path.push("neighbors_k"))
            .trim()
            .value()
            .unwrap_or(defaults.neighbors_k);
        let similarity_floor = conf
            .get(path.push("similarity_floor"))
            .trim()
            .value()
            .unwrap_or(defaults.similarity_floor);
        let excluded_features = conf
            .get(path.push("excluded_features"))
            .unquote()
            .value()
            .map(|raw: String| split_list(&raw))
            .unwrap_or(defaults.excluded_features);

        ModelConfig {
            neighbors_k,
            similarity_floor,
            excluded_features,
        }
    }
}

impl FeedbackConfig {
    fn parse(conf: &Config, path: ConfPath) -> FeedbackConfig {
        FeedbackConfig {
            directory: optional(conf, path.push("directory"))
                .unwrap_or_else(|| String::from(DEFAULT_FEEDBACK_DIRECTORY)),
        }
    }
}

impl SessionsConfig {
    fn parse(conf: &Config, path: ConfPath) -> SessionsConfig {
        SessionsConfig {
            db_path: optional(conf, path.push("db_path"))
                .unwrap_or_else(|| String::from(DEFAULT_SESSIONS_DB_PATH)),
            ttl_secs: conf
                .get(path.push("ttl_secs"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

#[cfg(test)]
mod config_test {
    use super::*;
    use justconfig::sources::defaults::Defaults;

    fn config(values: &[(&[&str], &str)]) -> Config {
        let mut conf = Config::default();
        let mut defaults = Defaults::default();
        for (path, value) in values {
            defaults.set(conf.root().push_all(*path), *value, "test");
        }
        conf.add_source(defaults);
        conf
    }

    const DATA: [(&[&str], &str); 3] = [
        (&["data", "features_path"], "\"features.csv\""),
        (&["data", "prices_path"], "prices.csv"),
        (&["data", "titles_path"], "titles.csv"),
    ];

    #[test]
    fn should_apply_defaults() {
        let config = AppConfig::parse(config(&DATA)).unwrap();

        assert_eq!("features.csv", config.data.features_path);
        assert_eq!(None, config.data.model_path);
        assert_eq!(8080, config.server.port);
        assert_eq!("info", config.log.level);
        assert_eq!(ModelConfig::default(), config.model);
        assert_eq!(7, config.model.excluded_features.len());
        assert_eq!("feedback", config.feedback.directory);
        assert_eq!(1800, config.sessions.ttl_secs);
    }

    #[test]
    fn should_read_model_settings() {
        let mut values = DATA.to_vec();
        values.push((&["model", "neighbors_k"], " 3 "));
        values.push((&["model", "similarity_floor"], "0.5"));
        values.push((&["model", "excluded_features"], "\"weight_kg, offer_count,\""));
        let config = AppConfig::parse(config(&values)).unwrap();

        assert_eq!(3, config.model.neighbors_k);
        assert_eq!(0.5, config.model.similarity_floor);
        assert_eq!(
            vec!["weight_kg".to_string(), "offer_count".to_string()],
            config.model.excluded_features
        );
    }

    #[test]
    fn should_fail_without_required_data_paths() {
        let result = AppConfig::parse(config(&DATA[..2]));

        assert!(matches!(result, Err(AdvisorError::Config(_))));
    }

    #[test]
    fn should_reject_non_positive_similarity_floor() {
        let mut values = DATA.to_vec();
        values.push((&["model", "similarity_floor"], "0"));

        assert!(matches!(
            AppConfig::parse(config(&values)),
            Err(AdvisorError::Config(_))
        ));
    }
}
