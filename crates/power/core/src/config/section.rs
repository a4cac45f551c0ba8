//! Key-value configuration surface.

use std::collections::BTreeMap;

use crate::config::ConfigError;

/// Scalar stored under one key.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SectionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for SectionValue {
    fn from(value: bool) -> Self {
        SectionValue::Bool(value)
    }
}

impl From<i64> for SectionValue {
    fn from(value: i64) -> Self {
        SectionValue::Int(value)
    }
}

impl From<&str> for SectionValue {
    fn from(value: &str) -> Self {
        SectionValue::Str(value.to_string())
    }
}

/// Persisted configuration of one power, owned by the host.
///
/// Only `get` and `set` are required; the typed getters fall back to the
/// given default when a key is absent and fail when it holds something of
/// the wrong shape.
pub trait ConfigSection {
    fn get(&self, key: &str) -> Option<SectionValue>;

    /// Stores `value`, or removes the key when `value` is `None`.
    fn set(&mut self, key: &str, value: Option<SectionValue>);

    fn get_i64(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(SectionValue::Int(value)) => Ok(value),
            Some(SectionValue::Str(text)) => text
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(key, "an integer")),
            Some(_) => Err(ConfigError::invalid(key, "an integer")),
        }
    }

    fn get_i32(&self, key: &str, default: i32) -> Result<i32, ConfigError> {
        i32::try_from(self.get_i64(key, i64::from(default))?)
            .map_err(|_| ConfigError::invalid(key, "a 32-bit integer"))
    }

    fn get_u64(&self, key: &str, default: u64) -> Result<u64, ConfigError> {
        let fallback = i64::try_from(default).unwrap_or(i64::MAX);
        u64::try_from(self.get_i64(key, fallback)?)
            .map_err(|_| ConfigError::invalid(key, "a non-negative integer"))
    }

    fn get_u32(&self, key: &str, default: u32) -> Result<u32, ConfigError> {
        u32::try_from(self.get_i64(key, i64::from(default))?)
            .map_err(|_| ConfigError::invalid(key, "a non-negative 32-bit integer"))
    }

    fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(SectionValue::Bool(value)) => Ok(value),
            Some(SectionValue::Str(text)) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(ConfigError::invalid(key, "a boolean")),
            },
            Some(_) => Err(ConfigError::invalid(key, "a boolean")),
        }
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(SectionValue::Str(text)) => Ok(Some(text)),
            Some(_) => Err(ConfigError::invalid(key, "a string")),
        }
    }
}

/// Ordered in-memory section.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MemorySection {
    values: BTreeMap<String, SectionValue>,
}

impl MemorySection {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<SectionValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionValue)> + '_ {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, SectionValue)> for MemorySection {
    fn from_iter<T: IntoIterator<Item = (String, SectionValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl ConfigSection for MemorySection {
    fn get(&self, key: &str) -> Option<SectionValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Option<SectionValue>) {
        match value {
            Some(value) => {
                self.values.insert(key.to_string(), value);
            }
            None => {
                self.values.remove(key);
            }
        }
    }
}
