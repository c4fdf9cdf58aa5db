//! chessbot backend: a thin HTTP wrapper around a UCI chess engine.
//!
//! Request flow: decode FEN -> ask the move provider -> apply the move
//! -> re-encode -> respond. All chess vocabulary (parsing, legality,
//! notation) comes from `shakmaty`; all move selection comes from the
//! external engine process behind [`engine::MoveProvider`].

pub mod api;
pub mod board;
pub mod engine;
pub mod error;
pub mod heuristic;
