//! Property tests for audit evaluation invariants.

use proptest::prelude::*;
use rgpd_audit_core::{
    AnswerSet, EvaluationError, Evaluator, EvaluatorConfig, QuestionKind, QuestionSpec, NO, YES,
};

/// A question plus the answer it receives.
#[derive(Debug, Clone)]
struct Case {
    kind: QuestionKind,
    criticality: u8,
    compliant: bool,
    free_text: String,
    has_texts: bool,
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (
        prop_oneof![3 => Just(QuestionKind::Boolean), 1 => Just(QuestionKind::FreeText)],
        0u8..=10,
        any::<bool>(),
        ".{0,20}",
        any::<bool>(),
    )
        .prop_map(|(kind, criticality, compliant, free_text, has_texts)| Case {
            kind,
            criticality,
            compliant,
            free_text,
            has_texts,
        })
}

fn build(cases: &[Case]) -> (Vec<QuestionSpec>, AnswerSet) {
    let mut questions = Vec::with_capacity(cases.len());
    let mut answers = AnswerSet::new();

    for (index, case) in cases.iter().enumerate() {
        let id = index as u32;
        let question = match case.kind {
            QuestionKind::Boolean => {
                let q = QuestionSpec::boolean(id, format!("Question {}", id), case.criticality);
                if case.has_texts {
                    q.with_tip("Tip")
                        .with_recommendation("Recommendation")
                        .with_law_reference("Article 5 GDPR")
                        .with_reference_link("https://gdpr-info.eu/art-5-gdpr/", "Art. 5")
                } else {
                    q
                }
            }
            QuestionKind::FreeText => QuestionSpec::free_text(id, format!("Question {}", id)),
        };

        let answer = match case.kind {
            QuestionKind::Boolean if case.compliant => YES.to_string(),
            QuestionKind::Boolean => NO.to_string(),
            QuestionKind::FreeText => case.free_text.clone(),
        };

        questions.push(question);
        answers.insert(id, answer);
    }

    (questions, answers)
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(cases in prop::collection::vec(case_strategy(), 0..30)) {
        let (questions, answers) = build(&cases);
        let evaluator = Evaluator::default();

        let first = evaluator.evaluate(&questions, &answers).unwrap();
        let second = evaluator.evaluate(&questions, &answers).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn score_counts_compliant_boolean_items(
        cases in prop::collection::vec(case_strategy(), 0..30),
    ) {
        let (questions, answers) = build(&cases);
        let report = Evaluator::default().evaluate(&questions, &answers).unwrap();

        let compliant = report.items.iter().filter(|i| i.is_compliant == Some(true)).count();
        let boolean_specs = questions.iter().filter(|q| q.kind == QuestionKind::Boolean).count();

        prop_assert_eq!(report.score as usize, compliant);
        prop_assert_eq!(report.max_score as usize, boolean_specs);
        prop_assert!(report.score <= report.max_score);
    }

    #[test]
    fn items_follow_questionnaire_order(cases in prop::collection::vec(case_strategy(), 0..30)) {
        let (questions, answers) = build(&cases);
        let report = Evaluator::default().evaluate(&questions, &answers).unwrap();

        prop_assert_eq!(report.items.len(), questions.len());
        for (item, question) in report.items.iter().zip(&questions) {
            prop_assert_eq!(item.question_id, question.id);
            prop_assert_eq!(&item.question_text, &question.text);
            prop_assert_eq!(&item.criticality_label, &format!("{}/10", question.criticality));
        }
    }

    #[test]
    fn derived_fields_follow_the_answer(cases in prop::collection::vec(case_strategy(), 0..30)) {
        let (questions, answers) = build(&cases);
        let report = Evaluator::default().evaluate(&questions, &answers).unwrap();

        for item in &report.items {
            match (item.kind, item.is_compliant) {
                (QuestionKind::FreeText, compliant) => {
                    prop_assert_eq!(compliant, None);
                    prop_assert!(item.guidance_text.is_none());
                    prop_assert!(item.law_reference.is_none());
                    prop_assert!(item.reference_link.is_none());
                }
                (QuestionKind::Boolean, Some(true)) => {
                    prop_assert!(item.guidance_text.is_some());
                    prop_assert!(item.law_reference.is_none());
                    prop_assert!(item.reference_link.is_none());
                }
                (QuestionKind::Boolean, Some(false)) => {
                    prop_assert!(item.guidance_text.as_deref().is_some_and(|g| !g.is_empty()));
                    prop_assert!(item.law_reference.as_deref().is_some_and(|l| !l.is_empty()));
                }
                (QuestionKind::Boolean, None) => prop_assert!(false, "boolean item without status"),
            }
        }
    }

    #[test]
    fn free_text_never_changes_max_score(
        cases in prop::collection::vec(case_strategy(), 0..20),
        extra in ".{0,20}",
    ) {
        let (mut questions, mut answers) = build(&cases);
        let before = Evaluator::default().evaluate(&questions, &answers).unwrap();

        let id = questions.len() as u32;
        questions.push(QuestionSpec::free_text(id, "Which tools?"));
        answers.insert(id, extra);
        let after = Evaluator::default().evaluate(&questions, &answers).unwrap();

        prop_assert_eq!(before.max_score, after.max_score);
        prop_assert_eq!(before.score, after.score);
    }

    #[test]
    fn removing_any_answer_is_reported(
        cases in prop::collection::vec(case_strategy(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let (questions, answers) = build(&cases);
        let missing = pick.index(questions.len()) as u32;

        let partial: AnswerSet = answers
            .ids()
            .filter(|id| *id != missing)
            .map(|id| (id, answers.get(id).unwrap_or_default().to_string()))
            .collect();

        let err = Evaluator::default().evaluate(&questions, &partial).unwrap_err();
        prop_assert_eq!(err, EvaluationError::MissingAnswer { id: missing });
    }

    #[test]
    fn non_yes_no_boolean_answer_is_rejected(value in "[A-Za-z]{1,8}") {
        prop_assume!(value != YES && value != NO);
        let questions = vec![QuestionSpec::boolean(0, "Q", 5)];
        let err = Evaluator::new(EvaluatorConfig::default())
            .evaluate(&questions, &AnswerSet::new().with(0, value.clone()))
            .unwrap_err();
        prop_assert_eq!(err, EvaluationError::InvalidAnswer { id: 0, value });
    }
}
