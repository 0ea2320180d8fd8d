//! JSON Schema validation for questionnaire documents.
//!
//! The schema is embedded at compile time from
//! `schema/questionnaire.schema.json` and compiled once.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded questionnaire schema.
const QUESTIONNAIRE_SCHEMA_JSON: &str = include_str!("../../schema/questionnaire.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema loading.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = serde_json::from_str(QUESTIONNAIRE_SCHEMA_JSON)
            .map_err(|e| format!("Invalid schema JSON: {}", e))?;

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result
        .as_ref()
        .map_err(|e| SchemaError::LoadError(e.clone()))
}

/// Validate a questionnaire document against the schema.
///
/// Returns every violation found, each suffixed with its instance path.
pub fn validate_questionnaire_schema(document: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> serde_json::Value {
        serde_json::json!({
            "questionnaire_version": "1.0",
            "name": "Audit",
            "questions": [
                { "id": 0, "text": "Do you collect personal data?" }
            ]
        })
    }

    #[test]
    fn test_minimal_document_passes() {
        assert!(validate_questionnaire_schema(&minimal()).is_ok());
    }

    #[test]
    fn test_missing_questions_fails() {
        let value = serde_json::json!({
            "questionnaire_version": "1.0",
            "name": "Audit"
        });
        assert!(validate_questionnaire_schema(&value).is_err());
    }

    #[test]
    fn test_invalid_version_fails() {
        let mut value = minimal();
        value["questionnaire_version"] = serde_json::json!("v1");
        assert!(validate_questionnaire_schema(&value).is_err());
    }

    #[test]
    fn test_criticality_out_of_range_fails() {
        let mut value = minimal();
        value["questions"][0]["criticality"] = serde_json::json!(11);
        let errors = validate_questionnaire_schema(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("/questions/0/criticality")));
    }

    #[test]
    fn test_unknown_kind_fails() {
        let mut value = minimal();
        value["questions"][0]["kind"] = serde_json::json!("multiple_choice");
        assert!(validate_questionnaire_schema(&value).is_err());
    }

    #[test]
    fn test_risk_override_is_high_or_medium() {
        let mut value = minimal();
        value["questions"][0]["risk_if_unmet"] = serde_json::json!("high");
        assert!(validate_questionnaire_schema(&value).is_ok());

        value["questions"][0]["risk_if_unmet"] = serde_json::json!("low");
        let errors = validate_questionnaire_schema(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("/questions/0/risk_if_unmet")));
    }

    #[test]
    fn test_negative_id_fails() {
        let mut value = minimal();
        value["questions"][0]["id"] = serde_json::json!(-1);
        assert!(validate_questionnaire_schema(&value).is_err());
    }

    #[test]
    fn test_additional_properties_fail() {
        let mut value = minimal();
        value["colours"] = serde_json::json!({ "high": "red" });
        assert!(validate_questionnaire_schema(&value).is_err());
    }

    #[test]
    fn test_reference_link_requires_citation() {
        let mut value = minimal();
        value["questions"][0]["reference_link"] =
            serde_json::json!({ "url": "https://www.cnil.fr" });
        assert!(validate_questionnaire_schema(&value).is_err());
    }

    #[test]
    fn test_full_question_passes() {
        let value = serde_json::json!({
            "questionnaire_version": "1.0.0",
            "name": "Audit",
            "title": "Report",
            "introduction": "Intro",
            "conclusion": "{score}/{max_score}",
            "defaults": { "high_risk_threshold": 5 },
            "questions": [
                {
                    "id": 0,
                    "text": "Have you appointed a DPO?",
                    "kind": "boolean",
                    "criticality": 7,
                    "domain": "DPO",
                    "law_reference": "Article 37 GDPR",
                    "remediation_tip": "Keep the DPO involved.",
                    "remediation_recommendation": "Appoint a DPO.",
                    "reference_link": { "url": "https://www.cnil.fr", "citation": "CNIL" }
                },
                { "id": 1, "text": "Which tools?", "kind": "free_text" }
            ]
        });
        assert!(validate_questionnaire_schema(&value).is_ok());
    }
}
