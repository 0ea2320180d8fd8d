//! The built-in RGPD questionnaire.
//!
//! Ten scored questions covering collection, transparency, records, DPO,
//! storage location, DPIA, breach handling, consent, retention and staff
//! information, plus one free-text question about third-party tools.

use crate::questionnaire::{Questionnaire, QuestionnaireError};

/// Embedded questionnaire document.
pub const RGPD_QUESTIONNAIRE_YAML: &str = include_str!("../questionnaires/rgpd.yaml");

/// Load the built-in RGPD questionnaire.
pub fn rgpd_questionnaire() -> Result<Questionnaire, QuestionnaireError> {
    Questionnaire::from_yaml(RGPD_QUESTIONNAIRE_YAML)
}
