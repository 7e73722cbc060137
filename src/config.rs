use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `FEED_BACKEND__BASE_URL`.
const ENV_PREFIX: &str = "FEED";

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG_NAME: &str = "feed";

#[derive(Parser, Debug)]
#[command(author, version, about = "Poll a webhook receiver and show its messages", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "FEED_CONFIG_FILE")]
    pub config: Option<String>,

    /// Base URL of the webhook receiver
    #[arg(long, env = "FEED_BASE_URL")]
    pub base_url: Option<String>,

    /// Initial search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Number of messages visible at once
    #[arg(long)]
    pub height: Option<usize>,

    /// Log output format (text or json)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewerConfig {
    pub backend: BackendConfig,
    pub view: ViewConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    pub initial_search: String,
    pub height: usize,
    pub pretty_json: bool,
    pub clear_screen: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl BackendConfig {
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

impl ViewerConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Priority: CLI flag > `FEED_` environment > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("backend.base_url", "http://localhost:5000/")?
            .set_default("backend.request_timeout_secs", 10)?
            .set_default("view.initial_search", "")?
            .set_default("view.height", 20)?
            .set_default("view.pretty_json", true)?
            .set_default("view.clear_screen", true)?
            .set_default("logging.format", "text")?
            .set_default("logging.filter", "info")?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(base_url) = cli.base_url {
            builder = builder.set_override("backend.base_url", base_url)?;
        }
        if let Some(search) = cli.search {
            builder = builder.set_override("view.initial_search", search)?;
        }
        if let Some(height) = cli.height {
            builder = builder.set_override("view.height", height as u64)?;
        }
        if let Some(format) = cli.log_format {
            builder = builder.set_override("logging.format", format.to_lowercase())?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.backend.request_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "backend.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
