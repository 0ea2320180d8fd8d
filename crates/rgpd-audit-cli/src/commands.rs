use anyhow::Context;
use chrono::Utc;
use rgpd_audit_core::{
    builtin, evaluate, renderer_for, AnswerSet, DocumentFormat, DocumentMeta, QuestionKind,
    Questionnaire, NO,
};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

fn load_questionnaire(path: Option<&Path>) -> anyhow::Result<Questionnaire> {
    match path {
        Some(path) => Questionnaire::from_path(path)
            .with_context(|| format!("failed to load questionnaire {}", path.display())),
        None => builtin::rgpd_questionnaire().context("built-in questionnaire is invalid"),
    }
}

pub fn cmd_evaluate(
    answers_path: &Path,
    questionnaire_path: Option<&Path>,
    format: DocumentFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let questionnaire = load_questionnaire(questionnaire_path)?;
    let answers = AnswerSet::from_path(answers_path)
        .with_context(|| format!("failed to load answers {}", answers_path.display()))?;

    let report = evaluate(&questionnaire, &answers).context("evaluation failed")?;
    tracing::info!(
        score = report.score,
        max_score = report.max_score,
        gaps = report.non_compliant_items().count(),
        "Report evaluated"
    );

    let meta = DocumentMeta::from_questionnaire(&questionnaire).generated_at(Utc::now());
    let bytes = renderer_for(format)
        .render(&report, &meta)
        .context("failed to render report")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                media_type = format.media_type(),
                "Report written"
            );
        }
        None => {
            std::io::stdout()
                .write_all(&bytes)
                .context("failed to write report to stdout")?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct QuestionnaireSummary<'a> {
    name: &'a str,
    version: &'a str,
    questions: usize,
    scored: usize,
    free_text: usize,
}

impl<'a> QuestionnaireSummary<'a> {
    fn of(questionnaire: &'a Questionnaire) -> Self {
        let scored = questionnaire.max_score();
        Self {
            name: &questionnaire.name,
            version: &questionnaire.questionnaire_version,
            questions: questionnaire.questions.len(),
            scored,
            free_text: questionnaire.questions.len() - scored,
        }
    }
}

pub fn cmd_validate(path: &Path, json: bool) -> anyhow::Result<()> {
    let questionnaire = Questionnaire::from_path(path)
        .with_context(|| format!("invalid questionnaire {}", path.display()))?;
    let summary = QuestionnaireSummary::of(&questionnaire);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "OK: {} v{} ({} questions, {} scored, {} free text)",
            summary.name, summary.version, summary.questions, summary.scored, summary.free_text
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct QuestionRow<'a> {
    id: u32,
    kind: QuestionKind,
    criticality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<&'a str>,
    text: &'a str,
}

pub fn cmd_questions(path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let questionnaire = load_questionnaire(path)?;
    let rows: Vec<QuestionRow> = questionnaire
        .questions
        .iter()
        .map(|q| QuestionRow {
            id: q.id,
            kind: q.kind,
            criticality: q.criticality_label(),
            domain: q.domain.as_deref(),
            text: &q.text,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        let kind = match row.kind {
            QuestionKind::Boolean => "yes/no",
            QuestionKind::FreeText => "text",
        };
        println!("{:>3}  {:<6}  {:>5}  {}", row.id, kind, row.criticality, row.text);
    }
    Ok(())
}

pub fn cmd_template(path: Option<&Path>) -> anyhow::Result<()> {
    let questionnaire = load_questionnaire(path)?;
    print!("{}", answers_template(&questionnaire));
    Ok(())
}

/// YAML answers skeleton: boolean questions pre-filled "No", free text empty.
fn answers_template(questionnaire: &Questionnaire) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Answers for: {}\n", questionnaire.name));
    out.push_str("# Boolean questions take \"Yes\" or \"No\".\n");
    for question in &questionnaire.questions {
        let value = match question.kind {
            QuestionKind::Boolean => NO,
            QuestionKind::FreeText => "",
        };
        out.push_str(&format!("\n# {}\n", question.text.replace('\n', " ")));
        out.push_str(&format!("{}: \"{}\"\n", question.id, value));
    }
    out
}
