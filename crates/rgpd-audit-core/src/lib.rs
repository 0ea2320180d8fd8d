//! # rgpd-audit-core
//!
//! Deterministic GDPR (RGPD) compliance audit evaluation.
//!
//! This crate turns a questionnaire and its answers into a report model:
//! - How many requirements are met?
//! - Which ones are not, and how critical are they?
//! - What should be done, and under which article?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces the same report
//! 2. **Pure**: No I/O, no clock, no shared state during evaluation
//! 3. **Strict**: Missing or invalid answers are errors, never defaulted
//! 4. **Renderer-agnostic**: Layout and styling stay in the renderer
//!
//! ## Example
//!
//! ```rust,ignore
//! use rgpd_audit_core::{builtin, evaluate, AnswerSet};
//!
//! let questionnaire = builtin::rgpd_questionnaire()?;
//! let answers = AnswerSet::from_path("answers.yaml")?;
//! let report = evaluate(&questionnaire, &answers)?;
//!
//! println!("Score: {}/{}", report.score, report.max_score);
//! for gap in report.non_compliant_items() {
//!     println!("{} -> {:?}", gap.question_text, gap.law_reference);
//! }
//! ```

pub mod answers;
pub mod builtin;
pub mod config;
pub mod evaluator;
pub mod questionnaire;
pub mod render;
pub mod types;

// Re-export main types at crate root
pub use answers::{AnswerSet, AnswerSetError};
pub use config::EvaluatorConfig;
pub use evaluator::{EvaluationError, Evaluator};
pub use questionnaire::{Questionnaire, QuestionnaireError};
pub use render::{
    renderer_for, DocumentFormat, DocumentMeta, DocumentRenderer, JsonRenderer,
    MarkdownRenderer, RenderError,
};
pub use types::{
    QuestionId, QuestionKind, QuestionSpec, ReferenceLink, ReportItem, ReportModel, RiskLevel,
    NO, YES,
};

/// Evaluate answers against a questionnaire.
///
/// This is the main entry point. The questionnaire's `defaults` and
/// `conclusion` configure the fallback texts and the closing narrative.
///
/// # Returns
///
/// A `ReportModel` containing:
/// - `score` / `max_score`: "Yes" answers out of scored questions
/// - `items`: one derived item per question, in order
/// - `conclusion`: the rendered conclusion template
pub fn evaluate(
    questionnaire: &Questionnaire,
    answers: &AnswerSet,
) -> Result<ReportModel, EvaluationError> {
    Evaluator::new(questionnaire.evaluator_config()).evaluate(&questionnaire.questions, answers)
}
