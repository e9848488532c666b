//! Recursive parameter values handed to launched processes.

use eyre::{Result, ensure};
use indexmap::{IndexMap, map::Entry};
use serde::Serialize;
use tracing::debug;

/// Maximum nesting depth accepted by [Value::validate].
pub const MAX_DEPTH: usize = 32;

/// A parameter value.
///
/// Parameters nest arbitrarily (a lever arm inside a spatial config inside
/// the node's parameter mapping), so containers hold further values.
/// Sequences are restricted to homogeneous scalars by [Value::validate]
/// because that is all a node parameter array can carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Check that the value is well-formed.
    ///
    /// This is shape and type checking only: floats are finite, nesting
    /// stays within [MAX_DEPTH], mapping keys are non-empty and sequences
    /// hold scalars of a single kind. The meaning of individual values is
    /// left to the process that consumes them.
    pub fn validate(&self) -> Result<()> {
        self.validate_at("", 0)
    }

    fn validate_at(&self, path: &str, depth: usize) -> Result<()> {
        ensure!(
            depth <= MAX_DEPTH,
            "Value at '{}' exceeds the maximum nesting depth of {}",
            path,
            MAX_DEPTH
        );

        match self {
            Value::Float(value) => {
                ensure!(
                    value.is_finite(),
                    "Float at '{}' is not finite: {}",
                    path,
                    value
                );
            }
            Value::Sequence(items) => validate_sequence(path, items)?,
            Value::Mapping(mapping) => mapping.validate_at(path, depth + 1)?,
            Value::Bool(_) | Value::Integer(_) | Value::String(_) => {}
        }

        Ok(())
    }
}

fn validate_sequence(path: &str, items: &[Value]) -> Result<()> {
    let Some(first) = items.first() else {
        return Ok(());
    };

    for (index, item) in items.iter().enumerate() {
        ensure!(
            item.is_scalar(),
            "Sequence at '{}' holds a {} at index {}, only scalars are allowed",
            path,
            item.kind(),
            index
        );
        ensure!(
            item.kind() == first.kind(),
            "Sequence at '{}' mixes {} and {} values",
            path,
            first.kind(),
            item.kind()
        );
        if let Value::Float(value) = item {
            ensure!(
                value.is_finite(),
                "Float at '{}[{}]' is not finite: {}",
                path,
                index,
                value
            );
        }
    }

    Ok(())
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T, const N: usize> From<[T; N]> for Value
where
    T: Into<Value>,
{
    fn from(items: [T; N]) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::Mapping(mapping)
    }
}

/// Insertion-ordered mapping from parameter names to values.
///
/// Assigning a key that is already present keeps the key at its original
/// position and replaces the value, so the last assignment wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Mapping(IndexMap<String, Value>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value and return the mapping, for literal construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        match self.0.entry(key.into()) {
            Entry::Occupied(mut entry) => {
                debug!(
                    key = %entry.key(),
                    "Parameter assigned more than once, keeping the last value"
                );
                Some(entry.insert(value.into()))
            }
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Walk nested mappings, one key per level.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let value = self.0.get(*first)?;

        if rest.is_empty() {
            Some(value)
        } else {
            value.as_mapping()?.lookup(rest)
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Validate every value in the mapping. See [Value::validate].
    pub fn validate(&self) -> Result<()> {
        self.validate_at("", 1)
    }

    fn validate_at(&self, path: &str, depth: usize) -> Result<()> {
        for (key, value) in &self.0 {
            ensure!(!key.is_empty(), "Empty key in mapping at '{}'", path);

            let child = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            value.validate_at(&child, depth)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}
