use crate::config::{
    parse_bind, LogFormat, ServeMode, Settings, SourceSpec, TomlConfig, DEFAULT_TIMEOUT_SECONDS,
};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "sloview-testdata")]
#[command(about = "Serves SLO dependency descriptors for the sloview client")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8010
    #[arg(long)]
    pub bind: Option<String>,

    /// Descriptor source: a file path, an http(s) URL, `sample` or `legacy`
    #[arg(long)]
    pub document: Option<String>,

    /// Serve the document text verbatim instead of the parsed descriptor
    #[arg(long)]
    pub raw: bool,

    /// Load the document on every request instead of once at startup
    #[arg(long)]
    pub no_cache: bool,

    /// Parse the document, print a summary and exit
    #[arg(long)]
    pub check: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Layers the flags over the configuration file, if one was given.
    pub fn to_settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_toml(&TomlConfig::from_file(path)?)?,
            None => Settings::default(),
        };

        if let Some(bind) = &self.bind {
            settings.bind = parse_bind("--bind", bind)?;
        }
        if let Some(document) = &self.document {
            let timeout = match &settings.source {
                SourceSpec::Http { timeout, .. } => *timeout,
                _ => Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            };
            settings.source = SourceSpec::from_location("--document", document, timeout)?;
        }
        if self.raw {
            settings.mode = ServeMode::Raw;
        }
        if self.no_cache {
            settings.cache = false;
        }
        if self.json_logs {
            settings.log_format = LogFormat::Json;
        }
        settings.verbose |= self.verbose;

        settings.validate()?;
        Ok(settings)
    }
}
