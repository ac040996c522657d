// Parameter Bag Domain Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::{DomainError, Result};

/// A single task parameter value.
///
/// Serialized untagged so a bag round-trips as a plain JSON object
/// (`{"Optimize": true, "WarningLevel": 4}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Int(i32),
    String(String),
    StringArray(Vec<String>),
}

/// Type tag of a [`ParameterValue`], used in mismatch reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Bool,
    Int,
    String,
    StringArray,
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterKind::Bool => write!(f, "bool"),
            ParameterKind::Int => write!(f, "int"),
            ParameterKind::String => write!(f, "string"),
            ParameterKind::StringArray => write!(f, "string[]"),
        }
    }
}

impl ParameterKind {
    /// Convert a raw string into a value of this kind.
    ///
    /// Booleans accept `true/false`, `on/off`, `yes/no` and `!true/!false`
    /// (case-insensitive). String arrays are `;`-separated with empty items
    /// dropped.
    pub fn parse(&self, raw: &str) -> Option<ParameterValue> {
        match self {
            ParameterKind::Bool => parse_bool(raw).map(ParameterValue::Bool),
            ParameterKind::Int => raw.trim().parse().ok().map(ParameterValue::Int),
            ParameterKind::String => Some(ParameterValue::String(raw.to_string())),
            ParameterKind::StringArray => Some(ParameterValue::StringArray(
                raw.split(';')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "!false" => Some(true),
        "false" | "off" | "no" | "!true" => Some(false),
        _ => None,
    }
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Bool(_) => ParameterKind::Bool,
            ParameterValue::Int(_) => ParameterKind::Int,
            ParameterValue::String(_) => ParameterKind::String,
            ParameterValue::StringArray(_) => ParameterKind::StringArray,
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Int(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(value: Vec<String>) -> Self {
        ParameterValue::StringArray(value)
    }
}

/// Conversion from a stored [`ParameterValue`] into a typed reader result.
///
/// Conversions are exact: no accessor coerces between kinds.
pub trait FromParameterValue: Sized {
    const KIND: ParameterKind;

    fn from_parameter_value(value: &ParameterValue) -> Option<Self>;
}

impl FromParameterValue for bool {
    const KIND: ParameterKind = ParameterKind::Bool;

    fn from_parameter_value(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromParameterValue for i32 {
    const KIND: ParameterKind = ParameterKind::Int;

    fn from_parameter_value(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromParameterValue for String {
    const KIND: ParameterKind = ParameterKind::String;

    fn from_parameter_value(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromParameterValue for Vec<String> {
    const KIND: ParameterKind = ParameterKind::StringArray;

    fn from_parameter_value(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::StringArray(items) => Some(items.clone()),
            _ => None,
        }
    }
}

/// Per-task parameter store with default-aware typed readers.
///
/// Not internally synchronized. A bag is owned by exactly one task; callers
/// that share one across threads must wrap it themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag {
    entries: HashMap<String, ParameterValue>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bag from a JSON object of parameter values
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Assign a parameter, returning the value it replaced
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Option<ParameterValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParameterValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Read a typed parameter, falling back to `default` when the key is absent.
    ///
    /// A present value always wins over `default`. A present value of the
    /// wrong kind is reported as [`DomainError::TypeMismatch`].
    pub fn get_parameter_with_default<T: FromParameterValue>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T> {
        let Some(value) = self.entries.get(key) else {
            return Ok(default);
        };

        T::from_parameter_value(value).ok_or_else(|| DomainError::TypeMismatch {
            key: key.to_string(),
            expected: T::KIND,
            found: value.kind(),
        })
    }

    pub fn get_bool_parameter_with_default(&self, key: &str, default: bool) -> Result<bool> {
        self.get_parameter_with_default(key, default)
    }

    pub fn get_int_parameter_with_default(&self, key: &str, default: i32) -> Result<i32> {
        self.get_parameter_with_default(key, default)
    }

    pub fn get_string_parameter_with_default(&self, key: &str, default: &str) -> Result<String> {
        self.get_parameter_with_default(key, default.to_string())
    }

    pub fn get_string_array_parameter_with_default(
        &self,
        key: &str,
        default: Vec<String>,
    ) -> Result<Vec<String>> {
        self.get_parameter_with_default(key, default)
    }
}
