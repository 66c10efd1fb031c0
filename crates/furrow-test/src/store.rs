//! Dotted-path reads over a JSON state snapshot.
//!
//! Paths look like `entitiesReducer.gardenReducer.ids`; a numeric segment
//! indexes into an array.

use crate::poll::{PollError, Poller};
use log::trace;
use serde_json::Value;
use thiserror::Error;

/// Store probing errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot is not valid JSON
    #[error("invalid store snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// A path segment does not exist
    #[error("path '{path}' not found at segment '{segment}'")]
    MissingPath {
        /// Full path requested
        path: String,
        /// First segment that did not resolve
        segment: String,
    },
    /// The value has the wrong shape
    #[error("value at '{path}' is not {expected}")]
    UnexpectedType {
        /// Full path requested
        path: String,
        /// What was expected
        expected: &'static str,
    },
}

/// Read-only view of a state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreProbe {
    state: Value,
}

impl StoreProbe {
    /// Wrap a snapshot.
    #[must_use]
    pub const fn new(state: Value) -> Self {
        Self { state }
    }

    /// Parse a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if the text is not JSON.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Whole snapshot.
    #[must_use]
    pub const fn state(&self) -> &Value {
        &self.state
    }

    /// Value at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingPath`] naming the first segment that does
    /// not resolve.
    pub fn get(&self, path: &str) -> Result<&Value, StoreError> {
        let mut current = &self.state;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            current = next.ok_or_else(|| StoreError::MissingPath {
                path: path.to_string(),
                segment: segment.to_string(),
            })?;
        }
        Ok(current)
    }

    /// Whether `path` holds something: not missing, not null, and not an
    /// empty array, object or string.
    #[must_use]
    pub fn is_populated(&self, path: &str) -> bool {
        match self.get(path) {
            Ok(Value::Null) | Err(_) => false,
            Ok(Value::Array(items)) => !items.is_empty(),
            Ok(Value::Object(map)) => !map.is_empty(),
            Ok(Value::String(s)) => !s.is_empty(),
            Ok(_) => true,
        }
    }

    /// Array at `path`, each element rendered as a string id.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is missing or not an array.
    pub fn ids(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let Value::Array(items) = self.get(path)? else {
            return Err(StoreError::UnexpectedType {
                path: path.to_string(),
                expected: "an array",
            });
        };
        Ok(items.iter().map(id_string).collect())
    }

    /// Scalar at `path` rendered as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is missing or holds an array, object or
    /// null.
    pub fn string(&self, path: &str) -> Result<String, StoreError> {
        match self.get(path)? {
            value @ (Value::String(_) | Value::Number(_) | Value::Bool(_)) => Ok(id_string(value)),
            _ => Err(StoreError::UnexpectedType {
                path: path.to_string(),
                expected: "a scalar",
            }),
        }
    }
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Poll snapshots until `path` is populated, then return its value.
///
/// # Errors
///
/// Returns [`PollError::Timeout`] if the path never fills in.
pub fn wait_for_populated(
    poller: &Poller,
    path: &str,
    mut snapshot: impl FnMut() -> Value,
) -> Result<Value, PollError> {
    poller.wait_for(|| {
        let probe = StoreProbe::new(snapshot());
        if probe.is_populated(path) {
            probe.get(path).ok().cloned()
        } else {
            trace!("store: '{path}' not populated yet");
            None
        }
    })
}
