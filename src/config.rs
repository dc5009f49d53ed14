//! CLI configuration.
//!
//! Read from `<config dir>/influxql/config.toml` unless a path is given:
//!
//! ```toml
//! database = "telegraf"
//! retention_policy = "autogen"
//! format = "json"
//! ```
//!
//! Every key is optional. A missing default file is the same as an empty one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QueryError, QueryResult};

/// How the CLI prints compiled statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One statement per line.
    #[default]
    Text,
    /// A JSON array of strings.
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Database used when a statement needs one and does not name it.
    pub database: Option<String>,
    /// Retention policy used to qualify measurements that have none.
    pub retention_policy: Option<String>,
    pub format: OutputFormat,
}

impl Config {
    /// `<config dir>/influxql/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("influxql").join("config.toml"))
    }

    pub fn from_toml(content: &str) -> QueryResult<Self> {
        toml::from_str(content).map_err(|e| QueryError::Config(e.to_string()))
    }

    /// Load `path`, or the default file when `path` is `None`.
    ///
    /// An explicit path must exist; the default file may be absent.
    pub fn load(path: Option<&Path>) -> QueryResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }
}
