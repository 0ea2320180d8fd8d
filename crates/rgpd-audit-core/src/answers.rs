//! Answer sets supplied by the input collector.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::QuestionId;

/// Errors that can occur when loading answers.
#[derive(Error, Debug)]
pub enum AnswerSetError {
    #[error("Failed to read answers file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One answer per question id.
///
/// Boolean questions take "Yes" or "No"; free-text questions take any
/// string. Values are checked at evaluation time, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an answer, builder style.
    pub fn with(mut self, id: QuestionId, value: impl Into<String>) -> Self {
        self.insert(id, value);
        self
    }

    /// Add or replace an answer. Returns the previous value, if any.
    pub fn insert(&mut self, id: QuestionId, value: impl Into<String>) -> Option<String> {
        self.0.insert(id, value.into())
    }

    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse answers from a YAML mapping (`0: "Yes"`).
    pub fn from_yaml(yaml: &str) -> Result<Self, AnswerSetError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse answers from a JSON object (`{"0": "Yes"}`).
    pub fn from_json(json: &str) -> Result<Self, AnswerSetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load answers from a file, choosing the parser by extension.
    ///
    /// `.json` is parsed as JSON; anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AnswerSetError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        if is_json_path(path) {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }
}

impl FromIterator<(QuestionId, String)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(QuestionId, &'a str)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, &'a str)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k, v.to_string())).collect())
    }
}

pub(crate) fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
