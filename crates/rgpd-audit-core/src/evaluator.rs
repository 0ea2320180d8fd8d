//! Evaluator: turns questions and answers into a report model.
//!
//! The evaluation is a single pure transform:
//! 1. Every declared question must have exactly one answer
//! 2. Boolean answers must be "Yes" or "No"
//! 3. Only boolean questions are scored
//!
//! Fallback texts apply to guidance and citations only, never to answers.

use std::collections::HashSet;
use thiserror::Error;

use crate::answers::AnswerSet;
use crate::config::{render_conclusion, EvaluatorConfig};
use crate::types::{
    percent_of, QuestionId, QuestionKind, QuestionSpec, ReportItem, ReportModel, RiskLevel, NO,
    YES,
};

/// Contract violations in the evaluator's input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Missing answer for question {id}")]
    MissingAnswer { id: QuestionId },

    #[error("Invalid answer {value:?} for question {id}: expected \"Yes\" or \"No\"")]
    InvalidAnswer { id: QuestionId, value: String },

    #[error("Answer supplied for undeclared question {id}")]
    UnexpectedAnswer { id: QuestionId },

    #[error("Duplicate question ID: {id}")]
    DuplicateQuestion { id: QuestionId },
}

/// Parsed value of a boolean answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Compliant,
    NonCompliant,
}

impl Verdict {
    fn parse(id: QuestionId, value: &str) -> Result<Self, EvaluationError> {
        match value {
            YES => Ok(Verdict::Compliant),
            NO => Ok(Verdict::NonCompliant),
            other => Err(EvaluationError::InvalidAnswer {
                id,
                value: other.to_string(),
            }),
        }
    }
}

/// The Evaluator builds a [`ReportModel`] from a questionnaire and answers.
///
/// It holds only configuration; every call produces a fresh model.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Evaluate answers against a sequence of questions.
    ///
    /// # Errors
    ///
    /// - `DuplicateQuestion` if two questions share an id
    /// - `MissingAnswer` for the first question (in order) with no answer
    /// - `InvalidAnswer` for the first boolean question not answered "Yes"/"No"
    /// - `UnexpectedAnswer` for the lowest answer id no question declares
    pub fn evaluate(
        &self,
        questions: &[QuestionSpec],
        answers: &AnswerSet,
    ) -> Result<ReportModel, EvaluationError> {
        self.check_unique_ids(questions)?;

        let mut items = Vec::with_capacity(questions.len());
        let mut score = 0u32;
        let mut max_score = 0u32;

        for question in questions {
            let answer = answers
                .get(question.id)
                .ok_or(EvaluationError::MissingAnswer { id: question.id })?;

            let item = match question.kind {
                QuestionKind::FreeText => self.informational_item(question, answer),
                QuestionKind::Boolean => {
                    let verdict = Verdict::parse(question.id, answer)?;
                    max_score += 1;
                    if verdict == Verdict::Compliant {
                        score += 1;
                    }
                    self.scored_item(question, answer, verdict)
                }
            };
            items.push(item);
        }

        self.check_no_undeclared(questions, answers)?;

        let percent = percent_of(score, max_score);
        let conclusion = render_conclusion(&self.config.conclusion, score, max_score, percent);

        tracing::debug!(
            score,
            max_score,
            items = items.len(),
            "Audit evaluated"
        );

        Ok(ReportModel {
            score,
            max_score,
            items,
            conclusion,
        })
    }

    fn check_unique_ids(&self, questions: &[QuestionSpec]) -> Result<(), EvaluationError> {
        let mut declared = HashSet::with_capacity(questions.len());
        for question in questions {
            if !declared.insert(question.id) {
                return Err(EvaluationError::DuplicateQuestion { id: question.id });
            }
        }
        Ok(())
    }

    /// Every answer must belong to a declared question.
    fn check_no_undeclared(
        &self,
        questions: &[QuestionSpec],
        answers: &AnswerSet,
    ) -> Result<(), EvaluationError> {
        let declared: HashSet<QuestionId> = questions.iter().map(|q| q.id).collect();
        match answers.ids().find(|id| !declared.contains(id)) {
            Some(id) => {
                tracing::warn!(id, "Answer supplied for undeclared question");
                Err(EvaluationError::UnexpectedAnswer { id })
            }
            None => Ok(()),
        }
    }

    fn informational_item(&self, question: &QuestionSpec, answer: &str) -> ReportItem {
        ReportItem {
            question_id: question.id,
            question_text: question.text.clone(),
            answer: answer.to_string(),
            kind: question.kind,
            domain: question.domain.clone(),
            is_compliant: None,
            criticality: question.criticality,
            criticality_label: question.criticality_label(),
            risk_level: None,
            guidance_text: None,
            law_reference: None,
            reference_link: None,
        }
    }

    fn scored_item(&self, question: &QuestionSpec, answer: &str, verdict: Verdict) -> ReportItem {
        let base = self.informational_item(question, answer);

        match verdict {
            Verdict::Compliant => ReportItem {
                is_compliant: Some(true),
                risk_level: Some(RiskLevel::Low),
                guidance_text: Some(
                    question
                        .remediation_tip
                        .clone()
                        .unwrap_or_else(|| self.config.compliant_guidance.clone()),
                ),
                ..base
            },
            Verdict::NonCompliant => ReportItem {
                is_compliant: Some(false),
                risk_level: Some(self.risk_of_gap(question)),
                guidance_text: Some(
                    question
                        .remediation_recommendation
                        .clone()
                        .unwrap_or_else(|| self.config.remediation_guidance.clone()),
                ),
                law_reference: Some(
                    question
                        .law_reference
                        .clone()
                        .unwrap_or_else(|| self.config.law_reference.clone()),
                ),
                reference_link: question.reference_link.clone(),
                ..base
            },
        }
    }

    /// An explicit override wins; otherwise criticality is compared to the threshold.
    fn risk_of_gap(&self, question: &QuestionSpec) -> RiskLevel {
        if let Some(risk) = question.risk_if_unmet {
            risk
        } else if question.criticality >= self.config.high_risk_threshold {
            RiskLevel::High
        } else {
            RiskLevel::Medium
        }
    }
}
