//! The move-selection capability the HTTP layer is written against.
//!
//! The production implementation is [`stockfish_uci::UciEngine`];
//! tests substitute their own providers.

use std::time::Duration;

use async_trait::async_trait;
use stockfish_uci::{EngineError, UciEngine};

/// Wall-clock search allowance per selection call. Fixed by design;
/// requests cannot ask for deeper searches.
pub const MOVE_TIME: Duration = Duration::from_millis(500);

/// "Given a position, choose one move."
///
/// The returned move is in coordinate (UCI) notation and is promised
/// legal for `fen` by the implementor. Callers must only pass
/// positions that have at least one legal move.
#[async_trait]
pub trait MoveProvider: Send {
    async fn select(&mut self, fen: &str, time_budget: Duration) -> Result<String, EngineError>;
}

#[async_trait]
impl MoveProvider for UciEngine {
    async fn select(&mut self, fen: &str, time_budget: Duration) -> Result<String, EngineError> {
        self.best_move(fen, time_budget).await
    }
}
