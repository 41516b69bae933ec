use std::sync::Arc;

use exam_core::model::{
    AnswerKey, ExamQuotas, ExamSettings, Question, QuestionBank, QuestionDraft, QuestionId,
    QuestionKind,
};
use exam_core::time::fixed_clock;
use services::{ExamLoopService, ExamPhase, TimerTick};

fn boolean_question(id: u64) -> Question {
    QuestionDraft {
        kind: QuestionKind::Boolean,
        prompt: format!("Statement {id} holds"),
        options: vec!["true".into(), "false".into()],
        answer: AnswerKey::One("true".into()),
        points: 1,
    }
    .validate()
    .unwrap()
    .assign_id(QuestionId::new(id))
}

fn loop_service() -> ExamLoopService {
    let bank = Arc::new(
        QuestionBank::new(vec![boolean_question(1), boolean_question(2)]).unwrap(),
    );
    ExamLoopService::new(fixed_clock(), bank)
        .with_settings(ExamSettings::new(10).unwrap())
        .with_seed(1)
}

#[test]
fn twenty_ticks_force_submission_exactly_once() {
    let service = loop_service();
    let mut session = service.start_exam(&ExamQuotas::new(2, 0, 0));
    assert_eq!(session.time_left(), 20);

    // The countdown is idle until the first answer.
    assert_eq!(service.tick(&mut session), TimerTick::Idle);

    session.select_answer(0, "true", true);
    for _ in 0..19 {
        service.tick(&mut session);
    }
    assert_eq!(session.phase(), ExamPhase::InProgress);

    assert_eq!(service.tick(&mut session), TimerTick::Expired);
    assert_eq!(session.phase(), ExamPhase::Submitted);

    let report = service.finish_grading(&mut session).unwrap().clone();

    // Later ticks neither re-submit nor touch the stored report.
    for _ in 0..5 {
        assert_eq!(service.tick(&mut session), TimerTick::Idle);
    }
    assert_eq!(session.report(), Some(&report));
    assert_eq!(session.time_left(), 0);
}

#[test]
fn cancelled_submit_resumes_the_countdown_without_losing_a_second() {
    let service = loop_service();
    let mut session = service.start_exam(&ExamQuotas::new(2, 0, 0));

    session.select_answer(0, "true", true);
    for _ in 0..5 {
        service.tick(&mut session);
    }
    assert_eq!(session.time_left(), 15);

    service.request_submit(&mut session).unwrap();
    // Paused while the confirmation is pending.
    assert_eq!(service.tick(&mut session), TimerTick::Idle);
    assert_eq!(session.time_left(), 15);

    assert!(service.cancel_submit(&mut session));
    assert_eq!(service.tick(&mut session), TimerTick::Running(14));
}

#[test]
fn stale_cancel_after_regeneration_does_not_rearm() {
    let service = loop_service();
    let mut session = service.start_exam(&ExamQuotas::new(2, 0, 0));

    session.select_answer(0, "true", true);
    service.request_submit(&mut session).unwrap();
    assert!(service.regenerate(&mut session, &ExamQuotas::new(2, 0, 0)));

    // The pending request belongs to the discarded paper.
    assert!(!service.cancel_submit(&mut session));
    assert_eq!(service.tick(&mut session), TimerTick::Idle);
    assert_eq!(session.time_left(), 20);
}

#[test]
fn forced_submission_grades_whatever_was_answered() {
    let service = loop_service();
    let mut session = service.start_exam(&ExamQuotas::new(2, 0, 0));

    session.select_answer(0, "true", true);
    for _ in 0..20 {
        service.tick(&mut session);
    }
    assert!(session.is_submitted());

    let report = service.finish_grading(&mut session).unwrap();
    assert_eq!(report.correct_count(), 1);
    assert_eq!(report.score(), 1);
    assert_eq!(report.possible(), 2);
    assert_eq!(report.incorrect_indices().len(), 1);
}
