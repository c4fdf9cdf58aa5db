use crate::board;
use crate::engine::{MoveProvider, MOVE_TIME};
use crate::error::ApiError;
use crate::heuristic::{self, Difficulty};
use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// The one engine handle for the whole process. The mutex is the
/// serialization gate: one pipe, one in-flight search at a time.
pub type SharedEngine = Arc<Mutex<Box<dyn MoveProvider>>>;

#[derive(Clone)]
pub struct AppState {
    engine: SharedEngine,
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub fen: String,
    pub pgn: Option<String>,
    #[serde(rename = "moveNumber")]
    pub move_number: Option<String>,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub fen: String,
    pub san_move: String,
    pub uci_move: String,
    pub success: bool,
}

#[derive(Deserialize)]
pub struct BotMoveRequest {
    pub fen: String,
    pub difficulty: Option<String>,
}

#[derive(Serialize)]
pub struct BotMoveResponse {
    #[serde(rename = "move")]
    pub mv: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub fn router(provider: impl MoveProvider + 'static) -> Router {
    let state = AppState {
        engine: Arc::new(Mutex::new(Box::new(provider))),
    };

    Router::new()
        .route("/api/make-move", post(make_move))
        .route("/api/bot-move", post(bot_move))
        .route("/engineRunning", post(engine_running))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Engine move for a submitted position: decode -> select -> apply ->
/// describe -> encode.
async fn make_move(
    State(state): State<AppState>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    if request.pgn.is_some() || request.move_number.is_some() {
        // Accepted for compatibility, not consulted for selection.
        tracing::debug!(
            pgn = ?request.pgn,
            move_number = ?request.move_number,
            "ignoring auxiliary move context"
        );
    }

    let position = board::decode(&request.fen)?;

    let reply = {
        let mut engine = state.engine.lock().await;
        engine.select(&request.fen, MOVE_TIME).await?
    };

    let chosen = board::move_from_uci(&position, &reply)?;
    let (uci_move, san_move) = board::describe(&position, &chosen);
    let position = board::apply(position, &chosen)?;

    Ok(Json(MoveResponse {
        fen: board::encode(&position),
        san_move,
        uci_move,
        success: true,
    }))
}

/// Heuristic move without the engine, tiered by difficulty.
async fn bot_move(Json(request): Json<BotMoveRequest>) -> Result<Json<BotMoveResponse>, ApiError> {
    let position = board::decode(&request.fen)?;
    let difficulty = Difficulty::from_param(request.difficulty.as_deref());
    let san = heuristic::pick(&position, difficulty).ok_or(ApiError::NoLegalMoves)?;
    Ok(Json(BotMoveResponse { mv: san }))
}

/// Liveness only. Never touches the engine, so it answers even when
/// the engine process is gone.
async fn engine_running() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "chessbot is running",
    })
}
