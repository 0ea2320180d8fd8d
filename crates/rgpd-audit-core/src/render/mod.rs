//! Document renderers.
//!
//! A renderer turns a [`ReportModel`] into document bytes. The evaluator
//! never depends on a renderer; renderers only read the model.

mod json;
mod markdown;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::questionnaire::Questionnaire;
use crate::types::ReportModel;

/// Errors from rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to serialize report: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Output formats with a built-in renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Markdown,
    Json,
}

impl DocumentFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "text/markdown; charset=utf-8",
            DocumentFormat::Json => "application/json",
        }
    }
}

/// Document-level texts that are not part of the evaluation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,

    /// Supplied by the caller; renderers never read the clock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl DocumentMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            introduction: None,
            generated_at: None,
        }
    }

    /// Take the title and introduction from a questionnaire.
    pub fn from_questionnaire(questionnaire: &Questionnaire) -> Self {
        Self {
            title: questionnaire.title().to_string(),
            introduction: questionnaire.introduction.clone(),
            generated_at: None,
        }
    }

    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

/// Trait for document renderers.
pub trait DocumentRenderer {
    /// The format this renderer produces.
    fn format(&self) -> DocumentFormat;

    /// Render the report. Items appear in model order; the conclusion verbatim.
    fn render(&self, report: &ReportModel, meta: &DocumentMeta) -> Result<Vec<u8>, RenderError>;
}

/// Get the built-in renderer for a format.
pub fn renderer_for(format: DocumentFormat) -> Box<dyn DocumentRenderer> {
    match format {
        DocumentFormat::Markdown => Box::new(MarkdownRenderer::new()),
        DocumentFormat::Json => Box::new(JsonRenderer::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_for_matches_format() {
        for format in [DocumentFormat::Markdown, DocumentFormat::Json] {
            assert_eq!(renderer_for(format).format(), format);
        }
    }

    #[test]
    fn test_meta_from_questionnaire_defaults_title() {
        let questionnaire = Questionnaire::new("Audit", vec![]);
        let meta = DocumentMeta::from_questionnaire(&questionnaire);
        assert_eq!(meta.title, crate::questionnaire::DEFAULT_TITLE);
        assert!(meta.introduction.is_none());
        assert!(meta.generated_at.is_none());
    }
}
