//! Strict descriptor parser.
//!
//! Parsing runs in two steps: the text is first read into a generic
//! [`serde_json::Value`] tree, then the tree is walked field by field so the
//! first violation can be reported with the path of the offending field
//! (e.g. `dependencies[0].slos[2].kind`). Unknown fields are ignored;
//! enumerations are closed.

use crate::domain::model::{
    DependencyKind, ServiceDependency, ServiceDescriptor, Slo, SloInterval, SloKind,
};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DescriptorError {
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("schema error at {path}: {message}")]
    Schema { path: FieldPath, message: String },
}

impl DescriptorError {
    pub fn kind(&self) -> &'static str {
        match self {
            DescriptorError::Syntax { .. } => "syntax",
            DescriptorError::Schema { .. } => "schema",
        }
    }

    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            DescriptorError::Schema { path, .. } => Some(path),
            DescriptorError::Syntax { .. } => None,
        }
    }
}

impl From<serde_json::Error> for DescriptorError {
    fn from(e: serde_json::Error) -> Self {
        DescriptorError::Syntax {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

/// Location of a field inside a descriptor document. The root displays as `$`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &'static str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

type ParseResult<T> = std::result::Result<T, DescriptorError>;

fn schema<T>(path: FieldPath, message: impl Into<String>) -> ParseResult<T> {
    Err(DescriptorError::Schema {
        path,
        message: message.into(),
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses and validates a descriptor document.
pub fn parse_descriptor(text: &str) -> ParseResult<ServiceDescriptor> {
    let tree: Value = serde_json::from_str(text)?;
    parse_descriptor_value(&tree)
}

/// Validates an already decoded JSON tree.
pub fn parse_descriptor_value(tree: &Value) -> ParseResult<ServiceDescriptor> {
    let root = FieldPath::root();
    let object = expect_object(tree, &root)?;

    Ok(ServiceDescriptor {
        version: required_string(object, &root, "version")?,
        name: required_string(object, &root, "name")?,
        endpoint: required_url(object, &root, "endpoint")?,
        info_endpoint: optional_url(object, &root, "infoEndpoint")?,
        dependencies: dependency_list(object, &root, "dependencies", true)?,
        consumers: dependency_list(object, &root, "consumers", false)?,
    })
}

fn expect_object<'a>(
    value: &'a Value,
    path: &FieldPath,
) -> ParseResult<&'a Map<String, Value>> {
    match value {
        Value::Object(object) => Ok(object),
        other => schema(
            path.clone(),
            format!("expected an object, found {}", type_name(other)),
        ),
    }
}

fn required<'a>(
    object: &'a Map<String, Value>,
    path: &FieldPath,
    name: &'static str,
) -> ParseResult<&'a Value> {
    match object.get(name) {
        Some(value) => Ok(value),
        None => schema(path.field(name), "required field is missing"),
    }
}

fn required_string(
    object: &Map<String, Value>,
    path: &FieldPath,
    name: &'static str,
) -> ParseResult<String> {
    match required(object, path, name)? {
        Value::String(s) => Ok(s.clone()),
        other => schema(
            path.field(name),
            format!("expected a string, found {}", type_name(other)),
        ),
    }
}

fn parse_url(value: &Value, path: FieldPath) -> ParseResult<Url> {
    let raw = match value {
        Value::String(s) => s,
        other => {
            return schema(
                path,
                format!("expected a URL string, found {}", type_name(other)),
            )
        }
    };

    match Url::parse(raw) {
        Ok(url) if url.cannot_be_a_base() => {
            schema(path, format!("'{}' is not an absolute URL", raw))
        }
        Ok(url) => Ok(url),
        Err(e) => schema(path, format!("'{}' is not a valid URL: {}", raw, e)),
    }
}

fn required_url(
    object: &Map<String, Value>,
    path: &FieldPath,
    name: &'static str,
) -> ParseResult<Url> {
    let value = required(object, path, name)?;
    parse_url(value, path.field(name))
}

fn optional_url(
    object: &Map<String, Value>,
    path: &FieldPath,
    name: &'static str,
) -> ParseResult<Option<Url>> {
    match object.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_url(value, path.field(name)).map(Some),
    }
}

/// Reads an array field; a missing optional list is empty, an explicit `null` is not.
fn array_field<'a>(
    object: &'a Map<String, Value>,
    path: &FieldPath,
    name: &'static str,
    required_field: bool,
) -> ParseResult<&'a [Value]> {
    match object.get(name) {
        None if required_field => schema(path.field(name), "required field is missing"),
        None => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => schema(
            path.field(name),
            format!("expected an array, found {}", type_name(other)),
        ),
    }
}

fn dependency_list(
    object: &Map<String, Value>,
    path: &FieldPath,
    name: &'static str,
    required_field: bool,
) -> ParseResult<Vec<ServiceDependency>> {
    let list_path = path.field(name);
    array_field(object, path, name, required_field)?
        .iter()
        .enumerate()
        .map(|(i, item)| parse_dependency(item, &list_path.index(i)))
        .collect()
}

fn closed_enum<T>(
    object: &Map<String, Value>,
    path: &FieldPath,
    name: &'static str,
    parse: fn(&str) -> Option<T>,
    accepted: &[&str],
) -> ParseResult<T> {
    let raw = required_string(object, path, name)?;
    match parse(&raw) {
        Some(value) => Ok(value),
        None => schema(
            path.field(name),
            format!(
                "unknown value '{}', expected one of: {}",
                raw,
                accepted.join(", ")
            ),
        ),
    }
}

fn parse_dependency(value: &Value, path: &FieldPath) -> ParseResult<ServiceDependency> {
    let object = expect_object(value, path)?;

    let accepted: Vec<&str> = DependencyKind::ALL.iter().map(|k| k.as_str()).collect();
    let kind = closed_enum(object, path, "kind", DependencyKind::parse, &accepted)?;

    let eventual_max = if kind == DependencyKind::EventualMax {
        Some(eventual_max_seconds(object, path)?)
    } else {
        None
    };

    let endpoint = required_url(object, path, "endpoint")?;
    let info_endpoint = optional_url(object, path, "infoEndpoint")?;

    let slos_path = path.field("slos");
    let slos = array_field(object, path, "slos", false)?
        .iter()
        .enumerate()
        .map(|(i, item)| parse_slo(item, &slos_path.index(i)))
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(ServiceDependency {
        kind,
        eventual_max,
        endpoint,
        info_endpoint,
        slos,
    })
}

fn eventual_max_seconds(object: &Map<String, Value>, path: &FieldPath) -> ParseResult<u64> {
    let field_path = path.field("eventualMax");
    match object.get("eventualMax") {
        None | Some(Value::Null) => schema(field_path, "required when kind is 'eventualMax'"),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(seconds) => Ok(seconds),
            None if n.as_i64().is_some() => {
                schema(field_path, format!("must be non-negative, found {}", n))
            }
            None => schema(
                field_path,
                format!("must be a whole number of seconds, found {}", n),
            ),
        },
        Some(other) => schema(
            field_path,
            format!("expected a number, found {}", type_name(other)),
        ),
    }
}

fn parse_slo(value: &Value, path: &FieldPath) -> ParseResult<Slo> {
    let object = expect_object(value, path)?;

    let kinds: Vec<&str> = SloKind::ALL.iter().map(|k| k.as_str()).collect();
    let intervals: Vec<&str> = SloInterval::ALL.iter().map(|i| i.as_str()).collect();

    let kind = closed_enum(object, path, "kind", SloKind::parse, &kinds)?;
    let interval = closed_enum(object, path, "interval", SloInterval::parse, &intervals)?;

    let target_value = match required(object, path, "targetValue")? {
        Value::Number(n) => match n.as_f64() {
            Some(v) => v,
            None => return schema(path.field("targetValue"), format!("{} is out of range", n)),
        },
        other => {
            return schema(
                path.field("targetValue"),
                format!("expected a number, found {}", type_name(other)),
            )
        }
    };

    Ok(Slo {
        kind,
        interval,
        target_value,
    })
}
