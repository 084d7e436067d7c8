use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use kupu_vocab::VocabularyIndex;
use tracing::info;

use crate::cli::Cli;

pub const VOCAB_PATH_ENV: &str = "KUPU_VOCAB_PATH";
pub const OUTPUT_ENV: &str = "KUPU_OUTPUT";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub vocab_path: Option<PathBuf>,
    pub output: OutputFormat,
    pub log_level: String,
}

impl Config {
    /// Resolve from parsed flags, then the process environment, then defaults.
    pub fn load(cli: &Cli) -> Self {
        Self::resolve(cli, |key| env::var(key).ok())
    }

    pub fn resolve<F>(cli: &Cli, env_var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let vocab_path = cli
            .vocab
            .clone()
            .or_else(|| env_var(VOCAB_PATH_ENV).filter(|v| !v.is_empty()).map(PathBuf::from));
        let output = if cli.json {
            OutputFormat::Json
        } else {
            env_var(OUTPUT_ENV)
                .as_deref()
                .and_then(OutputFormat::parse)
                .unwrap_or_default()
        };
        let log_level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Config {
            vocab_path,
            output,
            log_level,
        }
    }

    /// The configured vocabulary, or an empty one when no path is set.
    pub fn load_vocabulary(&self) -> Result<Arc<VocabularyIndex>> {
        let Some(path) = &self.vocab_path else {
            info!("no vocabulary configured; annotations will be empty");
            return Ok(Arc::new(VocabularyIndex::empty()));
        };
        VocabularyIndex::load_from_file(path)
            .with_context(|| format!("loading vocabulary from {}", path.display()))
    }
}
