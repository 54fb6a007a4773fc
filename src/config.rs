use anyhow::Result;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::env;

pub type Number = f32;

/// Default result count; the search endpoint this matcher serves asks for
/// three matches unless told otherwise.
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Deserialize)]
pub struct LinkmatchConfig {
    pub path: Option<String>,
    pub dimensions: Option<usize>,
    pub top_k: Option<usize>,
}

impl LinkmatchConfig {
    pub fn try_from(config: &Config) -> Result<Self, ConfigError> {
        Ok(LinkmatchConfig {
            path: config.get("path").ok(),
            dimensions: config.get("dimensions").ok(),
            top_k: config.get("top_k").ok(),
        })
    }
}

pub struct State {
    /// Snapshot file of link records, one JSON object per line. Only the
    /// commands that read a snapshot require it.
    pub path: Option<String>,
    /// Expected query vector length. When set, queries of any other length
    /// are rejected at the CLI boundary. The embedding service behind the
    /// link store produces 768-dimensional vectors.
    pub dimensions: Option<usize>,
    pub top_k: usize,
}

impl State {
    pub fn new() -> Result<Self> {
        let mut config = Config::default();
        #[allow(deprecated)]
        {
            config.merge(ConfigFile::with_name("linkmatch_config").required(false))?;
            config.merge(Environment::with_prefix("LINKMATCH"))?;
        }

        let linkmatch_config = LinkmatchConfig::try_from(&config)?;

        let path = linkmatch_config
            .path
            .or_else(|| env::var("LINKMATCH_PATH").ok());

        let dimensions = linkmatch_config.dimensions.or_else(|| {
            env::var("LINKMATCH_DIMENSIONS")
                .ok()
                .and_then(|s| s.parse().ok())
        });

        let top_k = linkmatch_config
            .top_k
            .or_else(|| env::var("LINKMATCH_TOP_K").ok().and_then(|s| s.parse().ok()))
            .unwrap_or(DEFAULT_TOP_K);

        if top_k == 0 {
            anyhow::bail!("LINKMATCH_TOP_K must be a positive integer.");
        }
        if dimensions == Some(0) {
            anyhow::bail!("LINKMATCH_DIMENSIONS must be a positive integer when set.");
        }

        Ok(Self {
            path,
            dimensions,
            top_k,
        })
    }

    pub fn print_config(&self) {
        println!("path={}", self.path.as_deref().unwrap_or("<unset>"));
        match self.dimensions {
            Some(dimensions) => println!("dimensions={}", dimensions),
            None => println!("dimensions=<unset>"),
        }
        println!("top_k={}", self.top_k);
    }
}

pub fn verbose_print(message: &str) {
    if env::var("LINKMATCH_VERBOSE").unwrap_or_else(|_| "false".to_string()) == "true" {
        eprintln!("{}", message);
    }
}
