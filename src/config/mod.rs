#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::adapters::{FileLoader, FixtureLoader, HttpLoader};
use crate::core::DocumentLoader;
use crate::utils::error::{Error, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BIND: &str = "0.0.0.0:8010";
pub const DEFAULT_ALLOW_ORIGIN: &str = "*";
pub const DEFAULT_DESCRIPTOR_ROUTE: &str = "/testdata";
pub const DEFAULT_HEADERS_ROUTE: &str = "/headers";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Whether the descriptor endpoint serves the parsed model or the document text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServeMode {
    #[default]
    Parsed,
    Raw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Sample,
    Legacy,
    File(PathBuf),
    Http { url: Url, timeout: Duration },
}

impl SourceSpec {
    /// `sample`, `legacy`, an `http(s)://` URL, or a file path.
    pub fn from_location(field_name: &str, location: &str, timeout: Duration) -> Result<Self> {
        validation::validate_not_blank(field_name, location)?;
        match location {
            "sample" => Ok(SourceSpec::Sample),
            "legacy" => Ok(SourceSpec::Legacy),
            _ if location.starts_with("http://") || location.starts_with("https://") => {
                let url = validation::validate_source_url(field_name, location)?;
                Ok(SourceSpec::Http { url, timeout })
            }
            _ => {
                validation::validate_document_path(field_name, location)?;
                Ok(SourceSpec::File(PathBuf::from(location)))
            }
        }
    }

    pub fn into_loader(self) -> Arc<dyn DocumentLoader> {
        match self {
            SourceSpec::Sample => Arc::new(FixtureLoader::sample()),
            SourceSpec::Legacy => Arc::new(FixtureLoader::legacy()),
            SourceSpec::File(path) => Arc::new(FileLoader::new(path)),
            SourceSpec::Http { url, timeout } => Arc::new(HttpLoader::new(url, timeout)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub descriptor: String,
    pub headers: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            descriptor: DEFAULT_DESCRIPTOR_ROUTE.to_string(),
            headers: DEFAULT_HEADERS_ROUTE.to_string(),
        }
    }
}

/// Fully resolved runtime settings: file values, then CLI overrides, then defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    pub allow_origin: String,
    pub routes: RouteConfig,
    pub source: SourceSpec,
    pub mode: ServeMode,
    pub cache: bool,
    pub log_format: LogFormat,
    pub verbose: bool,
}

pub fn parse_bind(field_name: &str, value: &str) -> Result<SocketAddr> {
    value
        .parse()
        .map_err(|e: std::net::AddrParseError| Error::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8010)),
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_string(),
            routes: RouteConfig::default(),
            source: SourceSpec::Sample,
            mode: ServeMode::Parsed,
            cache: true,
            log_format: LogFormat::Compact,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;
        let mut settings = Settings::default();

        if let Some(server) = &config.server {
            if let Some(bind) = &server.bind {
                settings.bind = parse_bind("server.bind", bind)?;
            }
            if let Some(origin) = &server.allow_origin {
                settings.allow_origin = origin.clone();
            }
        }

        if let Some(routes) = &config.routes {
            if let Some(descriptor) = &routes.descriptor {
                settings.routes.descriptor = descriptor.clone();
            }
            if let Some(headers) = &routes.headers {
                settings.routes.headers = headers.clone();
            }
        }

        if let Some(source) = &config.source {
            settings.source = source.to_spec()?;
        }

        if let Some(serving) = &config.serving {
            settings.mode = serving.mode.unwrap_or_default();
            settings.cache = serving.cache.unwrap_or(true);
        }

        if let Some(logging) = &config.logging {
            settings.log_format = logging.format.unwrap_or_default();
            settings.verbose = logging.verbose.unwrap_or(false);
        }

        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_not_blank("server.allow_origin", &self.allow_origin)?;
        validation::validate_route_path("routes.descriptor", &self.routes.descriptor)?;
        validation::validate_route_path("routes.headers", &self.routes.headers)?;

        if self.routes.descriptor == self.routes.headers {
            return Err(Error::ConfigError {
                message: format!(
                    "descriptor and headers endpoints share the route {}",
                    self.routes.descriptor
                ),
            });
        }

        Ok(())
    }
}
