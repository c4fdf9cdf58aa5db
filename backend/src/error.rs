//! Error types for the move service
//!
//! Every failure in the decode -> select -> apply -> encode chain is
//! mapped to one HTTP response shape: status 400 with a JSON body
//! `{"detail": "<message>"}`. The enum keeps the kinds distinct so the
//! status mapping stays deterministic per variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use shakmaty::fen::ParseFenError;
use stockfish_uci::EngineError;
use thiserror::Error;

/// A position string that does not describe a legal chess position.
#[derive(Debug, Error)]
pub enum InvalidPositionError {
    /// The FEN text itself is malformed (field count, piece letters,
    /// side-to-move marker, ...).
    #[error("invalid FEN: {0}")]
    Syntax(#[from] ParseFenError),

    /// The FEN parsed, but the described position breaks chess
    /// structure (missing king, pawns on back ranks, ...).
    #[error("illegal position: {0}")]
    Illegal(String),
}

/// A move that is not playable in the position it was paired with.
#[derive(Debug, Error)]
#[error("move `{mv}` is not legal in this position")]
pub struct IllegalMoveError {
    pub mv: String,
}

/// Boundary error for the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The submitted position was rejected by the board codec.
    #[error(transparent)]
    InvalidPosition(#[from] InvalidPositionError),

    /// The engine process could not be reached or did not answer.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(#[from] EngineError),

    /// The engine answered with a move the position does not allow.
    #[error(transparent)]
    IllegalEngineMove(#[from] IllegalMoveError),

    /// The position has no legal moves to choose from.
    #[error("no legal moves in this position")]
    NoLegalMoves,
}

impl ApiError {
    /// One status per kind. Engine failures are reported as 400 rather
    /// than 5xx; the caller cannot tell client fault from server fault
    /// apart in this service's contract.
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPosition(_)
            | ApiError::EngineUnavailable(_)
            | ApiError::IllegalEngineMove(_)
            | ApiError::NoLegalMoves => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        tracing::warn!(%detail, "request failed");
        (self.status(), Json(json!({ "detail": detail }))).into_response()
    }
}
