use super::{DocumentFormat, DocumentMeta, DocumentRenderer, RenderError};
use crate::types::{ReportItem, ReportModel};

/// Renders a report as a Markdown document.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render straight to a `String`.
    pub fn render_string(&self, report: &ReportModel, meta: &DocumentMeta) -> String {
        let mut out = String::new();

        out.push_str(&format!("# {}\n\n", meta.title));
        if let Some(intro) = &meta.introduction {
            out.push_str(&format!("{}\n\n", intro));
        }
        if let Some(at) = &meta.generated_at {
            out.push_str(&format!("_Generated on {}_\n\n", at.format("%Y-%m-%d %H:%M UTC")));
        }

        out.push_str("## Compliance score\n\n");
        out.push_str(&format!(
            "- Score: **{}/{}** ({}%)\n- Gaps: {} (high risk: {})\n\n",
            report.score,
            report.max_score,
            report.compliance_percent(),
            report.non_compliant_items().count(),
            report.high_risk_items().count()
        ));

        if !report.items.is_empty() {
            out.push_str("## Findings\n\n");
            for (position, item) in report.items.iter().enumerate() {
                render_item(&mut out, position + 1, item);
            }
        }

        out.push_str("## Conclusion\n\n");
        out.push_str(&report.conclusion);
        out.push('\n');
        out
    }
}

fn render_item(out: &mut String, position: usize, item: &ReportItem) {
    out.push_str(&format!("### {}. {}\n\n", position, single_line(&item.question_text)));
    if let Some(domain) = &item.domain {
        out.push_str(&format!("- Domain: {}\n", domain));
    }
    out.push_str(&format!("- Answer: {}\n", list_continuation(&item.answer)));

    let status = match item.is_compliant {
        Some(true) => "compliant",
        Some(false) => "NOT compliant",
        None => "informational",
    };
    out.push_str(&format!("- Status: {}\n", status));

    match item.risk_level {
        Some(risk) => out.push_str(&format!(
            "- Criticality: {} (risk: {})\n",
            item.criticality_label, risk
        )),
        None => out.push_str(&format!("- Criticality: {}\n", item.criticality_label)),
    }

    if let Some(law) = &item.law_reference {
        out.push_str(&format!("- Legal basis: _{}_\n", law));
    }
    if let Some(link) = &item.reference_link {
        out.push_str(&format!("- Learn more: [{}]({})\n", link.citation, link.url));
    }
    if let Some(guidance) = &item.guidance_text {
        out.push('\n');
        out.push_str(&blockquote(guidance));
    }
    out.push('\n');
}

/// Headings cannot span lines.
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indent continuation lines so they stay inside the list item.
fn list_continuation(text: &str) -> String {
    text.trim_end().replace('\n', "\n  ")
}

fn blockquote(text: &str) -> String {
    let mut out = String::new();
    for line in text.trim_end().lines() {
        if line.is_empty() {
            out.push_str(">\n");
        } else {
            out.push_str(&format!("> {}\n", line));
        }
    }
    out
}

impl DocumentRenderer for MarkdownRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Markdown
    }

    fn render(&self, report: &ReportModel, meta: &DocumentMeta) -> Result<Vec<u8>, RenderError> {
        Ok(self.render_string(report, meta).into_bytes())
    }
}
