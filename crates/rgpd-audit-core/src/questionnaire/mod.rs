//! Questionnaire loading and validation.
//!
//! Questionnaires are YAML or JSON documents validated against an embedded
//! JSON Schema, then checked for the constraints the schema cannot express.

mod parser;
mod schema;

pub use parser::{Questionnaire, QuestionnaireError, DEFAULT_TITLE};
pub use schema::validate_questionnaire_schema;
