use crate::{common, error::Result};

use aws_sdk_dynamodb::types;
use serde::{Deserialize, Serialize};
use serde_dynamo::to_attribute_value;
use std::collections;

/// Attribute names making up the primary key of a table or of one of its indexes.
///
/// ```rust
/// use dynamodb_service::KeySchema;
///
/// let schema = KeySchema::new("user_id").with_range_key("created_at");
/// assert!(schema.is_key_attribute("created_at"));
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct KeySchema {
    /// The hash (partition) key attribute name.
    pub hash_key: String,
    /// The range (sort) key attribute name, for composite primary keys.
    #[serde(default)]
    pub range_key: Option<String>,
}

impl KeySchema {
    /// Schema with a hash key only.
    pub fn new(hash_key: impl Into<String>) -> Self {
        Self {
            hash_key: hash_key.into(),
            range_key: None,
        }
    }

    /// Add a range key to the schema.
    pub fn with_range_key(mut self, range_key: impl Into<String>) -> Self {
        self.range_key = Some(range_key.into());
        self
    }

    /// Whether `name` is the hash key or the range key.
    pub fn is_key_attribute(&self, name: &str) -> bool {
        self.hash_key == name || self.range_key.as_deref() == Some(name)
    }

    /// Attach attribute names to key values.
    ///
    /// A range value is kept only when the schema declares a range key.
    pub(crate) fn bind<T>(&self, key: PrimaryKey<T>) -> Keys<T> {
        let range_key = match (&self.range_key, key.range) {
            (Some(name), Some(value)) => Some(Key {
                name: name.clone(),
                value,
            }),
            _ => None,
        };
        Keys {
            hash_key: Key {
                name: self.hash_key.clone(),
                value: key.hash,
            },
            range_key,
        }
    }

    /// Remove the key attributes from `item` and return them as a key map.
    pub(crate) fn split_off_key(&self, item: &mut common::RawItem) -> common::RawItem {
        let mut key = collections::HashMap::with_capacity(2);
        if let Some(value) = item.remove(&self.hash_key) {
            key.insert(self.hash_key.clone(), value);
        }
        if let Some(range_key) = &self.range_key {
            if let Some(value) = item.remove(range_key) {
                key.insert(range_key.clone(), value);
            }
        }
        key
    }
}

/// Key values identifying an item, or a partition when the range value is left out.
///
/// The attribute names come from the [`KeySchema`] of the table or index the key is used on.
///
/// ```rust
/// use dynamodb_service::PrimaryKey;
///
/// let key = PrimaryKey::new("user-1").with_range("2024-01-01");
/// assert_eq!(key.range, Some("2024-01-01"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrimaryKey<T> {
    /// The hash key value.
    pub hash: T,
    /// The range key value, if any. `Some` of a zero value is a present value.
    pub range: Option<T>,
}

impl<T> PrimaryKey<T> {
    /// Key with a hash value only.
    pub fn new(hash: T) -> Self {
        Self { hash, range: None }
    }

    /// Set the range value.
    pub fn with_range(mut self, range: T) -> Self {
        self.range = Some(range);
        self
    }
}

/// named key component
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Key<T> {
    pub(crate) name: String,
    pub(crate) value: T,
}

/// named primary key
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Keys<T> {
    pub(crate) hash_key: Key<T>,
    pub(crate) range_key: Option<Key<T>>,
}

impl<T: Serialize> TryFrom<Keys<T>> for common::RawItem {
    type Error = crate::Error;

    fn try_from(keys: Keys<T>) -> Result<Self> {
        let hash_key_value = to_attribute_value(keys.hash_key.value)?;
        let mut key = Self::from([(keys.hash_key.name, hash_key_value)]);
        if let Some(range_key) = keys.range_key {
            let range_key_value = to_attribute_value(range_key.value)?;
            key.insert(range_key.name, range_key_value);
        }
        Ok(key)
    }
}

/// Key map for a key value on a schema.
pub(crate) fn key_item<T: Serialize>(schema: &KeySchema, key: PrimaryKey<T>) -> Result<common::RawItem> {
    schema.bind(key).try_into()
}
