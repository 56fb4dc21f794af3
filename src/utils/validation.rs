use crate::utils::error::{Error, Result};
use std::time::Duration;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> Error {
    Error::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// A remote descriptor source. Documents are only fetched over `http`/`https`.
pub fn validate_source_url(field_name: &str, location: &str) -> Result<Url> {
    let url = Url::parse(location)
        .map_err(|e| invalid(field_name, location, format!("not a document URL: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(invalid(
            field_name,
            location,
            format!("documents are fetched over http or https, not {}", scheme),
        )),
    }
}

/// A local descriptor file. Existence is checked when the document is loaded.
pub fn validate_document_path(field_name: &str, path: &str) -> Result<()> {
    if path.contains('\0') {
        return Err(invalid(field_name, path, "document path contains a NUL byte"));
    }
    Ok(())
}

/// Routes are literal paths: absolute, no whitespace, and no capture or
/// wildcard segments (`:id`, `*rest`, `{id}`).
pub fn validate_route_path(field_name: &str, route: &str) -> Result<()> {
    if !route.starts_with('/') {
        return Err(invalid(field_name, route, "route must start with '/'"));
    }
    if route.chars().any(char::is_whitespace) {
        return Err(invalid(field_name, route, "route cannot contain whitespace"));
    }
    if route.contains(['{', '}']) {
        return Err(invalid(field_name, route, "route cannot contain '{' or '}'"));
    }
    if let Some(segment) = route
        .split('/')
        .find(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(invalid(
            field_name,
            route,
            format!("segment '{}' is a capture, routes must be literal", segment),
        ));
    }
    Ok(())
}

/// Upstream fetch timeout; zero would fail every request.
pub fn validate_timeout_seconds(field_name: &str, seconds: u64) -> Result<Duration> {
    if seconds == 0 {
        return Err(invalid(field_name, seconds, "timeout must be at least one second"));
    }
    Ok(Duration::from_secs(seconds))
}

pub fn require_setting<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| Error::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_not_blank(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "value is blank"));
    }
    Ok(())
}
