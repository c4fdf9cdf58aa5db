//! End-to-end move flow: decode -> select -> apply -> describe ->
//! encode, including the contract that concurrent requests never see
//! each other's positions through the shared provider.

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use backend::engine::MoveProvider;
use backend::{api, board};
use serde_json::{json, Value};
use shakmaty::{CastlingMode, Position};
use stockfish_uci::EngineError;
use tower::ServiceExt;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Deterministic provider: always the first legal move of the
/// submitted position. Good enough to stand in for the engine, and
/// recomputable from the outside for cross-talk checks.
struct FirstLegal;

fn first_legal_uci(fen: &str) -> Result<String, EngineError> {
    let position = board::decode(fen).map_err(|e| EngineError::Protocol(e.to_string()))?;
    let mv = position
        .legal_moves()
        .first()
        .cloned()
        .ok_or_else(|| EngineError::Protocol("no legal moves".to_string()))?;
    Ok(mv.to_uci(CastlingMode::Standard).to_string())
}

#[async_trait]
impl MoveProvider for FirstLegal {
    async fn select(&mut self, fen: &str, _budget: Duration) -> Result<String, EngineError> {
        first_legal_uci(fen)
    }
}

async fn make_move(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/make-move")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn make_move_plays_a_move_on_the_submitted_position() {
    let app = api::router(FirstLegal);

    let (status, body) = make_move(app, json!({"fen": START_FEN})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let fen = body["fen"].as_str().expect("fen");
    assert_ne!(fen, START_FEN, "a move must change the position");

    let uci = body["uci_move"].as_str().expect("uci_move");
    assert!(uci.len() == 4 || uci.len() == 5, "got {uci}");

    let san = body["san_move"].as_str().expect("san_move");
    assert!(!san.is_empty());

    // The response position is exactly the submitted position with
    // the reported move applied.
    let before = board::decode(START_FEN).unwrap();
    let mv = board::move_from_uci(&before, uci).expect("reported move is legal");
    let after = board::apply(before, &mv).unwrap();
    assert_eq!(fen, board::encode(&after));
}

#[tokio::test]
async fn make_move_ignores_auxiliary_context_fields() {
    let app = api::router(FirstLegal);

    let (status, body) = make_move(
        app,
        json!({"fen": START_FEN, "pgn": "1. e4 e5", "moveNumber": "2"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn concurrent_requests_each_get_their_own_move() {
    let app = api::router(FirstLegal);

    // Eight distinct positions, one per in-flight request.
    let openings = ["e2e4", "d2d4", "g1f3", "c2c4", "b1c3", "g2g3", "e2e3", "f2f4"];
    let fens: Vec<String> = openings
        .iter()
        .map(|uci| {
            let start = board::decode(START_FEN).unwrap();
            let mv = board::move_from_uci(&start, uci).unwrap();
            board::encode(&board::apply(start, &mv).unwrap())
        })
        .collect();

    let responses = futures::future::join_all(
        fens.iter()
            .map(|fen| make_move(app.clone(), json!({ "fen": fen }))),
    )
    .await;

    for (fen, (status, body)) in fens.iter().zip(responses) {
        assert_eq!(status, StatusCode::OK, "request for {fen} failed: {body}");
        assert_eq!(body["success"], true);

        // No cross-talk: the reported move is the provider's answer
        // for this request's position, applied to this position.
        let expected_uci = first_legal_uci(fen).unwrap();
        assert_eq!(body["uci_move"], json!(expected_uci));

        let before = board::decode(fen).unwrap();
        let mv = board::move_from_uci(&before, &expected_uci).unwrap();
        let after = board::apply(before, &mv).unwrap();
        assert_eq!(body["fen"], json!(board::encode(&after)));
    }
}

#[tokio::test]
async fn bot_move_returns_a_san_move() {
    let app = api::router(FirstLegal);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/bot-move")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"fen": START_FEN, "difficulty": "hard"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    let san = body["move"].as_str().expect("move");
    assert!(san == "e4" || san == "d4", "hard opens centrally, got {san}");
}
