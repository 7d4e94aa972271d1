use std::time::Duration;

use quiz_core::SessionPhase;
use quiz_core::model::{QuestionId, QuizLength};
use remote::{InMemoryQuizApi, RemoteError};

use super::test_harness::setup_view_harness;
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_stats_and_lengths() {
    let mut harness = setup_view_harness(InMemoryQuizApi::sample());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Quiz Statistics"), "missing stats in {html}");
    assert!(html.contains(">6<"), "missing total in {html}");
    assert!(html.contains("science: 2"), "missing kind count in {html}");
    assert!(html.contains("Quick Quiz (5 Questions)"), "missing quick in {html}");
    assert!(html.contains("Challenge Mode (20 Questions)"), "missing challenge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_hides_stats_when_unavailable() {
    let api = InMemoryQuizApi::sample();
    api.fail_next_stats(RemoteError::Network("refused".into()));
    let mut harness = setup_view_harness(api);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(!html.contains("Quiz Statistics"), "unexpected stats in {html}");
    assert!(html.contains("Standard Quiz (10 Questions)"), "missing lengths in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(InMemoryQuizApi::sample());
    harness.rebuild();
    harness.start_quiz(QuizLength::Quick).await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "missing progress in {html}");
    assert!(html.contains("Answered: 0/5"), "missing answered in {html}");
    assert!(html.contains("⏰ 30s"), "missing timer in {html}");
    assert!(html.contains("Which planet is known as the Red Planet?"), "missing prompt in {html}");
    assert!(html.contains("timer--calm"), "missing timer tone in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_answers_and_submits() {
    let mut harness = setup_view_harness(InMemoryQuizApi::sample());
    harness.rebuild();
    harness.start_quiz(QuizLength::Quick).await;

    harness.dispatch(QuizIntent::Select(1)).await;
    let html = harness.render();
    assert!(html.contains("option--selected"), "missing selection in {html}");
    assert!(html.contains("Answered: 1/5"), "missing answered in {html}");

    for _ in 0..5 {
        harness.dispatch(QuizIntent::Next).await;
    }
    let html = harness.render();
    assert!(html.contains("Ready to Submit?"), "missing confirm in {html}");
    assert!(
        html.contains("Unanswered questions will be marked as incorrect."),
        "missing warning in {html}"
    );

    harness.dispatch(QuizIntent::Submit).await;
    let html = harness.render();
    assert!(html.contains("Quiz Results"), "missing results in {html}");
    assert!(html.contains("1 out of 5 correct"), "missing score in {html}");
    assert!(html.contains("No answer"), "missing unanswered row in {html}");
    assert!(html.contains("Take Another Quiz"), "missing restart in {html}");

    let submissions = harness.api.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].get(QuestionId::new(1)), Some(1));
    assert_eq!(submissions[0].len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_keeps_answers_when_submit_fails() {
    let mut harness = setup_view_harness(InMemoryQuizApi::sample());
    harness.rebuild();
    harness.start_quiz(QuizLength::Quick).await;
    harness.dispatch(QuizIntent::Select(2)).await;
    for _ in 0..5 {
        harness.dispatch(QuizIntent::Next).await;
    }

    harness
        .api
        .fail_next_submit(RemoteError::Service("status 503".into()));
    harness.dispatch(QuizIntent::Submit).await;

    let html = harness.render();
    assert!(html.contains("Ready to Submit?"), "missing confirm in {html}");
    assert!(html.contains("Failed to submit quiz answers."), "missing error in {html}");
    assert_eq!(
        harness.with_quiz(|vm| (vm.phase(), vm.answered_count())),
        Some((SessionPhase::ConfirmSubmit, 1))
    );
    assert!(harness.api.submissions().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn load_failure_returns_home_with_banner() {
    let api = InMemoryQuizApi::sample();
    api.fail_next_fetch(RemoteError::Network("connection refused".into()));
    let mut harness = setup_view_harness(api);
    harness.rebuild();
    harness.start_quiz(QuizLength::Standard).await;

    let html = harness.render();
    assert!(
        html.contains("Failed to load quiz questions. Make sure the backend is running."),
        "missing banner in {html}"
    );
    assert!(html.contains("Quick Quiz (5 Questions)"), "not back home in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn empty_question_set_offers_way_back() {
    let mut harness = setup_view_harness(InMemoryQuizApi::new());
    harness.rebuild();
    harness.start_quiz(QuizLength::Quick).await;

    let html = harness.render();
    assert!(html.contains("No questions available!"), "missing empty state in {html}");
    assert!(html.contains("Go Back"), "missing back button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn cancel_returns_home() {
    let mut harness = setup_view_harness(InMemoryQuizApi::sample());
    harness.rebuild();
    harness.start_quiz(QuizLength::Quick).await;
    harness.dispatch(QuizIntent::Select(0)).await;
    harness.dispatch(QuizIntent::Cancel).await;

    let html = harness.render();
    assert!(!html.contains("Question 1 of 5"), "quiz still showing in {html}");
    assert!(html.contains("Quick Quiz (5 Questions)"), "not back home in {html}");
    assert!(harness.api.submissions().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn countdown_moves_on_and_keeps_the_answer() {
    let mut harness = setup_view_harness(InMemoryQuizApi::sample());
    harness.rebuild();
    harness.start_quiz(QuizLength::Quick).await;
    harness.dispatch(QuizIntent::Select(1)).await;

    harness.run_for(Duration::from_secs(5)).await;
    let remaining = harness.with_quiz(|vm| vm.session().time_remaining()).flatten();
    assert!(
        matches!(remaining, Some(secs) if secs < 30 && secs > 20),
        "unexpected remaining {remaining:?}"
    );

    harness.run_for(Duration::from_secs(27)).await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 5"), "did not move on in {html}");
    assert!(html.contains("Answered: 1/5"), "answer lost in {html}");
    assert_eq!(
        harness.with_quiz(|vm| vm.session().answer_for(QuestionId::new(1))),
        Some(Some(1))
    );
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn countdown_stops_once_the_last_question_expires() {
    let mut harness = setup_view_harness(InMemoryQuizApi::sample());
    harness.rebuild();
    harness.start_quiz(QuizLength::Quick).await;

    harness.run_for(Duration::from_secs(5 * 30 + 10)).await;
    let html = harness.render();
    assert!(html.contains("Ready to Submit?"), "missing confirm in {html}");
    assert_eq!(
        harness.with_quiz(|vm| (vm.phase(), vm.ticker_key(), vm.session().time_remaining())),
        Some((SessionPhase::ConfirmSubmit, None, None))
    );

    harness.run_for(Duration::from_secs(60)).await;
    assert_eq!(
        harness.with_quiz(|vm| (vm.phase(), vm.ticker_key(), vm.answered_count())),
        Some((SessionPhase::ConfirmSubmit, None, 0))
    );
    assert!(harness.render().contains("Ready to Submit?"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cancelling_mid_countdown_leaves_no_ticker_behind() {
    let mut harness = setup_view_harness(InMemoryQuizApi::sample());
    harness.rebuild();
    harness.start_quiz(QuizLength::Quick).await;
    harness.run_for(Duration::from_secs(10)).await;
    assert!(harness.render().contains("Question 1 of 5"));

    harness.dispatch(QuizIntent::Cancel).await;
    harness.run_for(Duration::from_secs(60)).await;
    let html = harness.render();
    assert!(html.contains("Quick Quiz (5 Questions)"), "not back home in {html}");
    assert!(!html.contains("Cancel Quiz"), "quiz still showing in {html}");

    harness.start_quiz(QuizLength::Quick).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "fresh quiz missing in {html}");
    assert!(html.contains("⏰ 30s"), "fresh countdown not full in {html}");
}
