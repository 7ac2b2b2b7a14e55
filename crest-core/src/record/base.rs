//! Records.
use crate::error::CrestError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// Represents possible types of values in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A scalar, e.g., an episode return or the exploration rate.
    Scalar(f64),

    /// A timestamp.
    DateTime(DateTime<Local>),

    /// A 1-dimensional array, e.g., returns of all evaluation episodes.
    Array1(Vec<f64>),

    /// A text value.
    String(String),
}

/// A set of named values.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Constructs an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Constructs a record with a single scalar.
    pub fn from_scalar(name: impl Into<String>, value: f64) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Constructs a record from a slice of `(key, value)` pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns the keys.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a value, replacing the previous value of the same key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Returns the value of the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records. Values of `record` win on duplicated keys.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one in place.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    /// Returns the scalar of the given key.
    pub fn get_scalar(&self, k: &str) -> Result<f64, CrestError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(CrestError::RecordValueTypeError("Scalar".to_string())),
            None => Err(CrestError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the 1-dimensional array of the given key.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f64>, CrestError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(CrestError::RecordValueTypeError("Array1".to_string())),
            None => Err(CrestError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the string of the given key.
    pub fn get_string(&self, k: &str) -> Result<String, CrestError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(CrestError::RecordValueTypeError("String".to_string())),
            None => Err(CrestError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns `true` if the record has no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_with_wrong_type() {
        let record = Record::from_slice(&[
            ("episode_return", RecordValue::Scalar(-3.0)),
            ("env", RecordValue::String("mountain_car".to_string())),
        ]);

        assert_eq!(record.get_scalar("episode_return").unwrap(), -3.0);
        assert!(matches!(
            record.get_scalar("env"),
            Err(CrestError::RecordValueTypeError(_))
        ));
        assert!(matches!(
            record.get_array1("missing"),
            Err(CrestError::RecordKeyError(_))
        ));
    }

    #[test]
    fn test_merge_overwrites() {
        let r1 = Record::from_scalar("epsilon", 1.0);
        let r2 = Record::from_scalar("epsilon", 0.5);
        let merged = r1.merge(r2);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get_scalar("epsilon").unwrap(), 0.5);
    }
}
