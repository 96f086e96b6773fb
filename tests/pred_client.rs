//! End-to-end tests of the suggestion client against a local HTTP server

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wordle_assist::commands::{build_puzzle, run_suggest};
use wordle_assist::core::PuzzleState;
use wordle_assist::suggest::{
    ClientConfig, PredClient, PredictRequest, SuggestError, Suggester, SuggestionOutcome,
};

const OK_BODY: &str = r#"{"success":true,"result":{"to_exploit":[[0.929,"house"],[0.5,"mouse"]],"to_explore":[[1.0,"crane"]]}}"#;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn reply(status: StatusCode, body: &'static str) -> Router {
    Router::new().route("/pred", post(move || async move { (status, body) }))
}

fn client(server: &str) -> PredClient {
    PredClient::new(&ClientConfig {
        server: server.to_string(),
        timeout: None,
    })
    .unwrap()
}

fn request() -> PredictRequest {
    let mut puzzle = PuzzleState::new(5);
    puzzle.accept_suggestion("weary").unwrap();
    puzzle.toggle(0, 1).unwrap();
    puzzle.toggle(0, 4).unwrap();
    puzzle.toggle(0, 4).unwrap();
    PredictRequest::from_puzzle(&puzzle, "en", 3)
}

#[tokio::test]
async fn success_yields_both_lists() {
    let server = serve(reply(StatusCode::OK, OK_BODY)).await;

    let outcome = client(&server).suggest(request()).await;

    let SuggestionOutcome::Ok(lists) = outcome else {
        panic!("expected suggestions, got {outcome:?}");
    };
    assert_eq!(
        lists.to_exploit,
        vec![(0.929, "house".to_string()), (0.5, "mouse".to_string())]
    );
    assert_eq!(lists.to_explore, vec![(1.0, "crane".to_string())]);
}

#[tokio::test]
async fn request_body_carries_rows_and_digit_codes() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::default();
    let router = Router::new()
        .route(
            "/pred",
            post(
                |State(seen): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                    *seen.lock().unwrap() = Some(body);
                    OK_BODY
                },
            ),
        )
        .with_state(Arc::clone(&seen));
    let server = serve(router).await;

    let outcome = client(&server).suggest(request()).await;
    assert!(outcome.is_ok());

    let body = seen.lock().unwrap().take().unwrap();
    assert_eq!(
        body,
        json!({
            "wordlen": 5,
            "lang": "en",
            "trial": ["WEARY"],
            "resp": ["01002"],
            "k": 3,
        })
    );
}

#[tokio::test]
async fn service_failure_message_is_passed_through() {
    let server = serve(reply(
        StatusCode::OK,
        r#"{"success":false,"msg":"Unknown word"}"#,
    ))
    .await;

    let outcome = client(&server).suggest(request()).await;
    assert_eq!(outcome, SuggestionOutcome::Err("Unknown word".to_string()));
}

#[tokio::test]
async fn service_failure_without_message_uses_fallback() {
    let server = serve(reply(StatusCode::OK, r#"{"success":false}"#)).await;

    let outcome = client(&server).suggest(request()).await;
    assert_eq!(outcome, SuggestionOutcome::Err("Failed to fetch".to_string()));
}

#[tokio::test]
async fn error_status_prefers_body_message() {
    let server = serve(reply(
        StatusCode::BAD_REQUEST,
        r#"{"success":false,"msg":"wordlen must be <= 10"}"#,
    ))
    .await;

    let err = client(&server).fetch(&request()).await.unwrap_err();
    match err {
        SuggestError::Status { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "wordlen must be <= 10");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_without_body_names_the_status() {
    let server = serve(reply(StatusCode::INTERNAL_SERVER_ERROR, "boom")).await;

    let outcome = client(&server).suggest(request()).await;
    let SuggestionOutcome::Err(message) = outcome else {
        panic!("expected an error");
    };
    assert!(message.contains("500"), "{message}");
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let server = serve(reply(StatusCode::OK, "<html>not json</html>")).await;

    let outcome = client(&server).suggest(request()).await;
    let SuggestionOutcome::Err(message) = outcome else {
        panic!("expected an error");
    };
    assert!(message.starts_with("Malformed response"), "{message}");
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = client(&format!("http://{addr}")).suggest(request()).await;
    assert!(!outcome.is_ok());
}

#[tokio::test]
async fn timeout_is_an_error() {
    let router = Router::new().route(
        "/pred",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            OK_BODY
        }),
    );
    let server = serve(router).await;
    let client = PredClient::new(&ClientConfig {
        server,
        timeout: Some(Duration::from_millis(100)),
    })
    .unwrap();

    let err = client.fetch(&request()).await.unwrap_err();
    assert!(matches!(err, SuggestError::Http(_)));
}

#[test]
fn one_shot_command_succeeds_and_fails_with_the_service() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let good = runtime.block_on(serve(reply(StatusCode::OK, OK_BODY)));
    let bad = runtime.block_on(serve(reply(
        StatusCode::OK,
        r#"{"success":false,"msg":"No candidates left"}"#,
    )));
    let state = build_puzzle(&["weary=20010".to_string()], None, 5).unwrap();

    run_suggest(&client(&good), runtime.handle(), &state, "en", 5).unwrap();

    let err = run_suggest(&client(&bad), runtime.handle(), &state, "en", 5).unwrap_err();
    assert!(err.to_string().contains("No candidates left"), "{err}");
}
