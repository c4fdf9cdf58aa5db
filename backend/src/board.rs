//! Board codec: FEN text <-> in-memory position, plus move notation.
//!
//! All chess mechanics are delegated to `shakmaty`; this module only
//! fixes the conversions and error mapping the HTTP layer relies on.
//! Moves are rendered relative to the position *before* they are
//! applied, which is what both SAN disambiguation and the UCI castling
//! encoding need.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position};

use crate::error::{IllegalMoveError, InvalidPositionError};

/// Parse FEN text into a position, rejecting anything that is not a
/// structurally legal chess position.
pub fn decode(text: &str) -> Result<Chess, InvalidPositionError> {
    let fen: Fen = text.trim().parse()?;
    fen.into_position(CastlingMode::Standard)
        .map_err(|e| InvalidPositionError::Illegal(e.to_string()))
}

/// Render a position back to FEN. Round-trip stable with [`decode`].
pub fn encode(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal).to_string()
}

/// Play `mv` on `position`, producing the resulting position.
pub fn apply(position: Chess, mv: &Move) -> Result<Chess, IllegalMoveError> {
    let rendered = mv.to_uci(CastlingMode::Standard).to_string();
    position
        .play(mv.clone())
        .map_err(|_| IllegalMoveError { mv: rendered })
}

/// Render `mv` in both notations: `(uci, san)`, computed against the
/// pre-move `position`.
pub fn describe(position: &Chess, mv: &Move) -> (String, String) {
    let uci = mv.to_uci(CastlingMode::Standard).to_string();
    let san = SanPlus::from_move(position.clone(), mv.clone()).to_string();
    (uci, san)
}

/// Interpret a coordinate-notation reply from the engine as a move of
/// `position`. This is the one place the engine's legality promise is
/// actually checked, so a garbled reply surfaces as an error instead
/// of corrupting the board.
pub fn move_from_uci(position: &Chess, uci: &str) -> Result<Move, IllegalMoveError> {
    let illegal = || IllegalMoveError {
        mv: uci.to_string(),
    };
    let parsed: UciMove = uci.parse().map_err(|_| illegal())?;
    parsed.to_move(position).map_err(|_| illegal())
}
