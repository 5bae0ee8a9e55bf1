//! Loosely-typed JSON bodies
//!
//! Most responses of the game-store API are inspected one key at a time, so
//! they are kept as a [`serde_json::Value`] and read through accessors that
//! return an error instead of panicking when a field is absent or has the
//! wrong shape. Paths are dotted (`meta.total`); numeric segments index into
//! arrays (`games.0.uuid`).

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Field name reported when the document as a whole fails to decode
pub const ROOT_FIELD: &str = "$";

/// A decoded JSON document with error-returning field accessors
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(Value);

impl JsonBody {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a raw body
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self(serde_json::from_slice(bytes)?))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Look up a dotted path. An empty path is the document root.
    pub fn get(&self, path: &str) -> Result<&Value> {
        lookup(&self.0, path)
    }

    /// Whether the path resolves to a value (including `null`)
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    pub fn str(&self, path: &str) -> Result<&str> {
        self.get(path)?
            .as_str()
            .ok_or_else(|| Error::wrong_type(path, "a string"))
    }

    pub fn f64(&self, path: &str) -> Result<f64> {
        self.get(path)?
            .as_f64()
            .ok_or_else(|| Error::wrong_type(path, "a number"))
    }

    /// Integer view of a number. Floats with no fractional part are accepted
    /// when they fit.
    pub fn i64(&self, path: &str) -> Result<i64> {
        let value = self.get(path)?;
        value
            .as_i64()
            .or_else(|| {
                whole_float(value)
                    .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| Error::wrong_type(path, "an integer"))
    }

    pub fn u64(&self, path: &str) -> Result<u64> {
        let value = self.get(path)?;
        value
            .as_u64()
            .or_else(|| {
                whole_float(value)
                    .filter(|f| *f >= 0.0 && *f < u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .ok_or_else(|| Error::wrong_type(path, "a non-negative integer"))
    }

    pub fn bool(&self, path: &str) -> Result<bool> {
        self.get(path)?
            .as_bool()
            .ok_or_else(|| Error::wrong_type(path, "a boolean"))
    }

    pub fn array(&self, path: &str) -> Result<&[Value]> {
        self.get(path)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| Error::wrong_type(path, "an array"))
    }

    pub fn object(&self, path: &str) -> Result<&Map<String, Value>> {
        self.get(path)?
            .as_object()
            .ok_or_else(|| Error::wrong_type(path, "an object"))
    }

    /// Length of the array at `path`
    pub fn len(&self, path: &str) -> Result<usize> {
        Ok(self.array(path)?.len())
    }

    /// Collect the string elements of an array (e.g. `category_uuids`)
    pub fn strings(&self, path: &str) -> Result<Vec<&str>> {
        self.array(path)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_str()
                    .ok_or_else(|| Error::wrong_type(format!("{path}.{i}"), "a string"))
            })
            .collect()
    }

    /// Collect the `uuid` field of every object in the array at `path`
    pub fn uuids(&self, path: &str) -> Result<Vec<String>> {
        self.field_values(path, "uuid")
    }

    /// Collect a string field from every object in the array at `path`
    pub fn field_values(&self, path: &str, field: &str) -> Result<Vec<String>> {
        self.array(path)?
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let name = format!("{path}.{i}.{field}");
                item.get(field)
                    .ok_or_else(|| Error::missing(name.clone()))?
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| Error::wrong_type(name, "a string"))
            })
            .collect()
    }

    /// Deserialize the subtree at `path` into a typed record. A shape
    /// mismatch is reported against `path`.
    pub fn typed<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.get(path)?.clone();
        serde_json::from_value(value).map_err(|e| Error::decode(path, e))
    }

    /// Deserialize the whole document into a typed record. A shape mismatch
    /// is reported against [`ROOT_FIELD`].
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.0).map_err(|e| Error::decode(ROOT_FIELD, e))
    }
}

impl From<Value> for JsonBody {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn whole_float(value: &Value) -> Option<f64> {
    value.as_f64().filter(|f| f.fract() == 0.0)
}

fn lookup<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = root;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| Error::missing(path))?;
    }
    Ok(current)
}
