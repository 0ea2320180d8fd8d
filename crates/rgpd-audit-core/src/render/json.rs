use serde::Serialize;

use super::{DocumentFormat, DocumentMeta, DocumentRenderer, RenderError};
use crate::types::ReportModel;

/// Renders a report as pretty-printed JSON: `{ "meta": ..., "report": ... }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct Document<'a> {
    meta: &'a DocumentMeta,
    report: &'a ReportModel,
}

impl DocumentRenderer for JsonRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Json
    }

    fn render(&self, report: &ReportModel, meta: &DocumentMeta) -> Result<Vec<u8>, RenderError> {
        let mut bytes = serde_json::to_vec_pretty(&Document { meta, report })?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
