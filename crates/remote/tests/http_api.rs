use std::time::Duration;

use quiz_core::model::{AnswerSubmission, QuestionId};
use remote::{HttpQuizApi, QuizApi, RemoteError};
use url::Url;

fn api_for(server: &mockito::ServerGuard) -> HttpQuizApi {
    HttpQuizApi::new(
        Url::parse(&server.url()).expect("mock server url"),
        Duration::from_secs(5),
    )
    .expect("http client")
}

#[tokio::test(flavor = "current_thread")]
async fn fetches_question_set() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/quiz/5")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"questions":[
                {"id":3,"question":"Pick one","type":"multiple_choice","options":["a","b","c"]},
                {"id":8,"question":"And another","options":["x","y"]}
            ],"total_questions":2}"#,
        )
        .create_async()
        .await;

    let quiz = api_for(&server).fetch_question_set(5).await.unwrap();

    mock.assert_async().await;
    assert_eq!(quiz.len(), 2);
    assert_eq!(quiz.questions()[0].id(), QuestionId::new(3));
    assert_eq!(quiz.questions()[1].options().len(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn submits_answers_keyed_by_question_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/submit-quiz")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "answers": { "3": 1 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"score":{"percentage":50.0,"correct":1,"total":2},
                "results":[
                  {"question_id":3,"question":"Pick one","user_answer":1,"correct_answer":1,"correct_answer_text":"b","is_correct":true},
                  {"question_id":8,"question":"And another","user_answer":null,"correct_answer":0,"correct_answer_text":"x","is_correct":false}
                ]}"#,
        )
        .create_async()
        .await;

    let mut submission = AnswerSubmission::default();
    submission.answers.insert(QuestionId::new(3), 1);

    let results = api_for(&server).submit_answers(&submission).await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.score.correct, 1);
    assert_eq!(results.per_question.len(), 2);
    assert_eq!(results.unanswered_count(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn fetches_stats() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/stats")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total_questions":42,"question_types":{"multiple_choice":30,"true_false":12}}"#)
        .create_async()
        .await;

    let stats = api_for(&server).fetch_stats().await.unwrap();

    assert_eq!(stats.total_questions, 42);
    assert_eq!(stats.question_type_counts.get("true_false"), Some(&12));
}

#[tokio::test(flavor = "current_thread")]
async fn error_status_is_a_service_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/quiz/10")
        .with_status(500)
        .create_async()
        .await;

    let err = api_for(&server).fetch_question_set(10).await.unwrap_err();

    assert!(matches!(err, RemoteError::Service(_)), "got {err:?}");
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_body_is_a_service_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/stats")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create_async()
        .await;

    let err = api_for(&server).fetch_stats().await.unwrap_err();

    assert!(matches!(err, RemoteError::Service(_)), "got {err:?}");
}

#[tokio::test(flavor = "current_thread")]
async fn unreachable_service_is_a_network_error() {
    // Port 9 (discard) is closed on test hosts; the connect fails fast.
    let api = HttpQuizApi::new(
        Url::parse("http://127.0.0.1:9").unwrap(),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = api.fetch_stats().await.unwrap_err();

    assert!(err.is_network(), "got {err:?}");
}
