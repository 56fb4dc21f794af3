use crate::config::{parse_bind, LogFormat, ServeMode, SourceSpec, DEFAULT_TIMEOUT_SECONDS};
use crate::utils::error::{Error, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub routes: Option<RoutesConfig>,
    pub source: Option<SourceConfig>,
    pub serving: Option<ServingConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub allow_origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    pub descriptor: Option<String>,
    pub headers: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// `sample`, `legacy`, `file` or `http`
    pub r#type: String,
    pub location: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServingConfig {
    pub mode: Option<ServeMode>,
    pub cache: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn to_spec(&self) -> Result<SourceSpec> {
        match self.r#type.as_str() {
            "sample" => Ok(SourceSpec::Sample),
            "legacy" => Ok(SourceSpec::Legacy),
            "file" => {
                let location = validation::require_setting("source.location", &self.location)?;
                validation::validate_not_blank("source.location", location)?;
                validation::validate_document_path("source.location", location)?;
                Ok(SourceSpec::File(location.into()))
            }
            "http" => {
                let location = validation::require_setting("source.location", &self.location)?;
                let url = validation::validate_source_url("source.location", location)?;
                Ok(SourceSpec::Http {
                    url,
                    timeout: self.timeout(),
                })
            }
            other => Err(Error::InvalidConfigValueError {
                field: "source.type".to_string(),
                value: other.to_string(),
                reason: "Expected one of: sample, legacy, file, http".to_string(),
            }),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| Error::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| Error::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| Error::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(server) = &self.server {
            if let Some(bind) = &server.bind {
                parse_bind("server.bind", bind)?;
            }
            if let Some(origin) = &server.allow_origin {
                validation::validate_not_blank("server.allow_origin", origin)?;
            }
        }

        if let Some(routes) = &self.routes {
            if let Some(descriptor) = &routes.descriptor {
                validation::validate_route_path("routes.descriptor", descriptor)?;
            }
            if let Some(headers) = &routes.headers {
                validation::validate_route_path("routes.headers", headers)?;
            }
        }

        if let Some(source) = &self.source {
            if let Some(timeout) = source.timeout_seconds {
                validation::validate_timeout_seconds("source.timeout_seconds", timeout)?;
            }
            source.to_spec()?;
        }

        Ok(())
    }
}
