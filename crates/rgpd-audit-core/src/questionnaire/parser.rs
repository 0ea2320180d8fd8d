//! Questionnaire parsing from YAML/JSON.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::validate_questionnaire_schema;
use crate::answers::is_json_path;
use crate::config::{unknown_placeholders, EvaluatorConfig};
use crate::types::{QuestionKind, QuestionSpec, MAX_CRITICALITY};

/// Report heading used when the document has no `title`.
pub const DEFAULT_TITLE: &str = "GDPR Compliance Audit Report";

lazy_static! {
    /// Absolute http(s) URL with no whitespace
    static ref HTTP_URL_PATTERN: Regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();
}

/// Errors that can occur when loading questionnaires.
#[derive(Error, Debug)]
pub enum QuestionnaireError {
    #[error("Failed to read questionnaire file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Questionnaire does not match schema: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Questionnaire validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// A questionnaire document: the questions plus the texts around them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    /// Version of this questionnaire (semver-like)
    pub questionnaire_version: String,

    /// Human-readable name
    pub name: String,

    /// Report heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Text shown before the findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,

    /// Conclusion template; the built-in default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    /// Overrides for fallback texts and the risk threshold
    #[serde(default)]
    pub defaults: EvaluatorConfig,

    /// Questions in presentation order
    pub questions: Vec<QuestionSpec>,
}

impl Questionnaire {
    /// Build a questionnaire in code. Call [`Questionnaire::validate`]
    /// before relying on it.
    pub fn new(name: impl Into<String>, questions: Vec<QuestionSpec>) -> Self {
        Self {
            questionnaire_version: "1.0".to_string(),
            name: name.into(),
            title: None,
            introduction: None,
            conclusion: None,
            defaults: EvaluatorConfig::default(),
            questions,
        }
    }

    pub fn with_conclusion(mut self, conclusion: impl Into<String>) -> Self {
        self.conclusion = Some(conclusion.into());
        self
    }

    /// Parse a questionnaire from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, QuestionnaireError> {
        let document: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_document(document)
    }

    /// Parse a questionnaire from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, QuestionnaireError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Parse a questionnaire from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, QuestionnaireError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a questionnaire from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, QuestionnaireError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a questionnaire file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuestionnaireError> {
        let path = path.as_ref();
        if is_json_path(path) {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    fn from_document(document: serde_json::Value) -> Result<Self, QuestionnaireError> {
        validate_questionnaire_schema(&document).map_err(QuestionnaireError::SchemaError)?;
        let questionnaire: Questionnaire = serde_json::from_value(document)?;
        questionnaire.validate()?;
        tracing::debug!(
            name = %questionnaire.name,
            questions = questionnaire.questions.len(),
            "Questionnaire loaded"
        );
        Ok(questionnaire)
    }

    /// Validate the questionnaire structure.
    ///
    /// Covers the checks the schema cannot express, and repeats the
    /// range checks for questionnaires built in code.
    pub fn validate(&self) -> Result<(), QuestionnaireError> {
        if self.name.trim().is_empty() {
            return Err(QuestionnaireError::MissingField("name".to_string()));
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                return Err(QuestionnaireError::MissingField(format!(
                    "questions[{}].text",
                    index
                )));
            }

            if question.criticality > MAX_CRITICALITY {
                return Err(QuestionnaireError::ValidationError(format!(
                    "Question {} has criticality {} (maximum {})",
                    question.id, question.criticality, MAX_CRITICALITY
                )));
            }

            if let Some(link) = &question.reference_link {
                if !HTTP_URL_PATTERN.is_match(&link.url) {
                    return Err(QuestionnaireError::ValidationError(format!(
                        "Question {} has an invalid reference link URL: {}",
                        question.id, link.url
                    )));
                }
            }
        }

        self.validate_unique_ids()?;

        if self.defaults.high_risk_threshold > MAX_CRITICALITY {
            return Err(QuestionnaireError::ValidationError(format!(
                "high_risk_threshold {} exceeds {}",
                self.defaults.high_risk_threshold, MAX_CRITICALITY
            )));
        }

        if let Some(conclusion) = &self.conclusion {
            let unknown = unknown_placeholders(conclusion);
            if !unknown.is_empty() {
                return Err(QuestionnaireError::ValidationError(format!(
                    "Unknown conclusion placeholder(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        Ok(())
    }

    fn validate_unique_ids(&self) -> Result<(), QuestionnaireError> {
        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(QuestionnaireError::ValidationError(format!(
                    "Duplicate question ID: {}",
                    question.id
                )));
            }
        }
        Ok(())
    }

    /// Report heading, falling back to [`DEFAULT_TITLE`].
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Evaluator configuration with this questionnaire's overrides applied.
    pub fn evaluator_config(&self) -> EvaluatorConfig {
        let config = self.defaults.clone();
        match &self.conclusion {
            Some(conclusion) => config.with_conclusion(conclusion.clone()),
            None => config,
        }
    }

    /// Number of scored questions.
    pub fn max_score(&self) -> usize {
        self.questions.iter().filter(|q| q.kind.is_scored()).count()
    }

    pub fn question(&self, id: u32) -> Option<&QuestionSpec> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn free_text_questions(&self) -> impl Iterator<Item = &QuestionSpec> {
        self.questions
            .iter()
            .filter(|q| q.kind == QuestionKind::FreeText)
    }
}
