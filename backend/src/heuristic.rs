//! Engine-free fallback bot: picks a move from the legal SAN list by
//! a difficulty tier, the way the original sidecar bot played. No
//! search, just string-level preferences over SAN.

use rand::seq::IndexedRandom;
use shakmaty::san::SanPlus;
use shakmaty::{Chess, Position};

/// Squares whose mention in a SAN string counts as "central play".
const CENTER_SQUARES: [&str; 4] = ["e4", "e5", "d4", "d5"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    /// Lenient parse: anything unrecognized plays at full strength.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("easy") => Difficulty::Easy,
            Some("medium") => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }
}

/// Pick one legal move (as SAN) for `position`, or `None` if the
/// position has no legal moves.
///
/// Tiers: `easy` is uniform random; `medium` prefers checks, then
/// captures; `hard` additionally prefers central-square moves before
/// falling back to anything.
pub fn pick(position: &Chess, difficulty: Difficulty) -> Option<String> {
    let sans: Vec<String> = position
        .legal_moves()
        .iter()
        .map(|m| SanPlus::from_move(position.clone(), m.clone()).to_string())
        .collect();
    if sans.is_empty() {
        return None;
    }

    let tiers: &[fn(&str) -> bool] = match difficulty {
        Difficulty::Easy => &[],
        Difficulty::Medium => &[is_check, is_capture],
        Difficulty::Hard => &[is_check, is_capture, is_central],
    };

    let mut rng = rand::rng();
    for tier in tiers {
        let pool: Vec<&String> = sans.iter().filter(|s| tier(s.as_str())).collect();
        if let Some(choice) = pool.choose(&mut rng) {
            return Some((*choice).clone());
        }
    }
    sans.choose(&mut rng).cloned()
}

fn is_check(san: &str) -> bool {
    san.contains('+') || san.contains('#')
}

fn is_capture(san: &str) -> bool {
    san.contains('x')
}

fn is_central(san: &str) -> bool {
    CENTER_SQUARES.iter().any(|sq| san.contains(sq))
}
