//! Raw key/value view of a configuration or resource.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped property map.
///
/// Values are stored as JSON values and converted on read, so the same
/// property can be read as different Rust types.
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::ValueMap;
///
/// let map = ValueMap::new()
///     .with("stringParam", "value1")
///     .with("intParam", 42);
///
/// assert_eq!(map.get::<String>("stringParam").as_deref(), Some("value1"));
/// assert_eq!(map.get::<i64>("intParam"), Some(42));
/// assert_eq!(map.get::<bool>("stringParam"), None);
/// assert!(!map.get_or("boolParam", false));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(Map<String, Value>);

impl ValueMap {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Reads a property converted to `T`; `None` when missing or not convertible.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|value| T::deserialize(value).ok())
    }

    /// Reads a property, falling back to `default`.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
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

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Deserializes the whole map into a structured type.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&Value::Object(self.0.clone()))
    }
}

impl From<Map<String, Value>> for ValueMap {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
