//! Evaluator configuration: fallback texts, risk threshold, conclusion.
//!
//! Every field has a built-in default. A questionnaire document may
//! override any of them in its `defaults` block and `conclusion` field.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Guidance for a compliant answer with no question-specific tip.
pub const DEFAULT_COMPLIANT_GUIDANCE: &str =
    "You meet this requirement; consider an annual review.";

/// Guidance for a non-compliant answer with no question-specific recommendation.
pub const DEFAULT_REMEDIATION_GUIDANCE: &str =
    "This practice should be implemented without delay.";

/// Citation for a non-compliant answer with no question-specific citation.
pub const DEFAULT_LAW_REFERENCE: &str = "Article 6 GDPR – Lawfulness of processing.";

/// Non-compliant items at or above this criticality are high risk.
pub const DEFAULT_HIGH_RISK_THRESHOLD: u8 = 7;

/// Conclusion used when nothing else is configured.
pub const DEFAULT_CONCLUSION: &str = "Your audit scored {score}/{max_score} ({percent}%). \
Consolidate the practices already in place and address the remaining gaps \
in order of criticality.";

/// Placeholders a conclusion template may use.
pub const CONCLUSION_PLACEHOLDERS: &[&str] = &["score", "max_score", "percent"];

lazy_static! {
    /// `{name}` placeholder inside a conclusion template
    static ref PLACEHOLDER_PATTERN: Regex = Regex::new(r"\{([^{}\s]*)\}").unwrap();
}

/// Configuration for the audit evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Fallback guidance for compliant items
    pub compliant_guidance: String,

    /// Fallback guidance for non-compliant items
    pub remediation_guidance: String,

    /// Fallback citation for non-compliant items
    pub law_reference: String,

    /// Minimum criticality for a non-compliant item to be high risk
    pub high_risk_threshold: u8,

    /// Conclusion template (`{score}`, `{max_score}`, `{percent}`)
    #[serde(skip)]
    pub conclusion: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            compliant_guidance: DEFAULT_COMPLIANT_GUIDANCE.to_string(),
            remediation_guidance: DEFAULT_REMEDIATION_GUIDANCE.to_string(),
            law_reference: DEFAULT_LAW_REFERENCE.to_string(),
            high_risk_threshold: DEFAULT_HIGH_RISK_THRESHOLD,
            conclusion: DEFAULT_CONCLUSION.to_string(),
        }
    }
}

impl EvaluatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the conclusion template.
    pub fn with_conclusion(mut self, conclusion: impl Into<String>) -> Self {
        self.conclusion = conclusion.into();
        self
    }

    pub fn with_high_risk_threshold(mut self, threshold: u8) -> Self {
        self.high_risk_threshold = threshold;
        self
    }
}

/// Return the placeholders in `template` that are not supported.
pub fn unknown_placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_PATTERN
        .captures_iter(template)
        .filter_map(|c| {
            let name = &c[1];
            (!CONCLUSION_PLACEHOLDERS.contains(&name)).then(|| name.to_string())
        })
        .collect()
}

/// Fill the conclusion template with the evaluation's numbers.
///
/// Unknown placeholders are left untouched.
pub fn render_conclusion(template: &str, score: u32, max_score: u32, percent: u32) -> String {
    PLACEHOLDER_PATTERN
        .replace_all(template, |c: &Captures| match &c[1] {
            "score" => score.to_string(),
            "max_score" => max_score.to_string(),
            "percent" => percent.to_string(),
            _ => c[0].to_string(),
        })
        .into_owned()
}
