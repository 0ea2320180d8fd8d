//! Core types for audit evaluation.
//!
//! `QuestionSpec` is the declarative input; `ReportModel` and `ReportItem`
//! are the renderer-agnostic output of one evaluation.

use serde::{Deserialize, Serialize};

/// Stable, 0-based question identifier.
pub type QuestionId = u32;

/// Canonical compliant answer for boolean questions.
pub const YES: &str = "Yes";

/// Canonical non-compliant answer for boolean questions.
pub const NO: &str = "No";

/// Upper bound of the criticality scale.
pub const MAX_CRITICALITY: u8 = 10;

/// How a question is answered and whether it is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Answered "Yes" or "No"; contributes to the score.
    #[default]
    Boolean,

    /// Answered with arbitrary text; informational only.
    FreeText,
}

impl QuestionKind {
    pub fn is_scored(&self) -> bool {
        matches!(self, QuestionKind::Boolean)
    }
}

/// An external resource attached to a non-compliant item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLink {
    /// Where to learn more (http or https)
    pub url: String,

    /// Human-readable citation for the link
    pub citation: String,
}

/// One question of the questionnaire, with its canned texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    /// Unique identifier within the questionnaire
    pub id: QuestionId,

    /// The question prompt
    pub text: String,

    /// Boolean (scored) or free text (informational)
    #[serde(default)]
    pub kind: QuestionKind,

    /// Severity if unmet, 0 to 10
    #[serde(default)]
    pub criticality: u8,

    /// Risk of a "No" answer; derived from criticality when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_if_unmet: Option<RiskLevel>,

    /// Short domain label (e.g., "DPO", "Data retention")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Legal citation shown when unmet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub law_reference: Option<String>,

    /// Guidance shown when the requirement is met
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_tip: Option<String>,

    /// Guidance shown when the requirement is not met
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_recommendation: Option<String>,

    /// Further reading for non-compliant answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<ReferenceLink>,
}

impl QuestionSpec {
    /// Create a boolean question with no canned texts.
    pub fn boolean(id: QuestionId, text: impl Into<String>, criticality: u8) -> Self {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::Boolean,
            criticality,
            risk_if_unmet: None,
            domain: None,
            law_reference: None,
            remediation_tip: None,
            remediation_recommendation: None,
            reference_link: None,
        }
    }

    /// Create an unscored free-text question.
    pub fn free_text(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            kind: QuestionKind::FreeText,
            ..Self::boolean(id, text, 0)
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_risk_if_unmet(mut self, risk: RiskLevel) -> Self {
        self.risk_if_unmet = Some(risk);
        self
    }

    pub fn with_law_reference(mut self, law: impl Into<String>) -> Self {
        self.law_reference = Some(law.into());
        self
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.remediation_tip = Some(tip.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.remediation_recommendation = Some(recommendation.into());
        self
    }

    pub fn with_reference_link(
        mut self,
        url: impl Into<String>,
        citation: impl Into<String>,
    ) -> Self {
        self.reference_link = Some(ReferenceLink {
            url: url.into(),
            citation: citation.into(),
        });
        self
    }

    /// Display label for the criticality weight, e.g. "7/10".
    pub fn criticality_label(&self) -> String {
        format!("{}/{}", self.criticality, MAX_CRITICALITY)
    }
}

/// Risk attached to an evaluated boolean item.
///
/// Semantic only: how a renderer colours it is the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived presentation data for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub question_id: QuestionId,
    pub question_text: String,
    pub answer: String,
    pub kind: QuestionKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// `None` for free-text questions
    pub is_compliant: Option<bool>,

    pub criticality: u8,
    pub criticality_label: String,

    /// `None` for free-text questions
    pub risk_level: Option<RiskLevel>,

    /// Tip when compliant, recommendation when not; `None` for free text
    pub guidance_text: Option<String>,

    /// Only set on non-compliant items
    pub law_reference: Option<String>,

    /// Only set on non-compliant items that have a link
    pub reference_link: Option<ReferenceLink>,
}

/// The assembled content of an audit report.
///
/// Built once per evaluation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportModel {
    /// Boolean questions answered "Yes"
    pub score: u32,

    /// Boolean questions in the questionnaire
    pub max_score: u32,

    /// One item per question, in questionnaire order
    pub items: Vec<ReportItem>,

    /// Closing narrative
    pub conclusion: String,
}

impl ReportModel {
    /// Score as a fraction of the maximum (0.0 when nothing is scored).
    pub fn compliance_ratio(&self) -> f64 {
        if self.max_score == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.max_score)
        }
    }

    /// Score as a rounded percentage.
    pub fn compliance_percent(&self) -> u32 {
        percent_of(self.score, self.max_score)
    }

    pub fn non_compliant_items(&self) -> impl Iterator<Item = &ReportItem> {
        self.items.iter().filter(|i| i.is_compliant == Some(false))
    }

    pub fn high_risk_items(&self) -> impl Iterator<Item = &ReportItem> {
        self.items
            .iter()
            .filter(|i| i.risk_level == Some(RiskLevel::High))
    }
}

/// Rounded percentage, 0 when nothing is scored.
pub(crate) fn percent_of(score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        0
    } else {
        let (score, max_score) = (u64::from(score), u64::from(max_score));
        ((score * 100 + max_score / 2) / max_score) as u32
    }
}
