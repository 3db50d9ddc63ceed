use super::error::PgnError;
use shakmaty::{CastlingMode, Chess, Move, Position, fen::Fen, san::SanPlus};
use std::fmt;

/// Position type the parser replays moves on.
///
/// The parser never looks inside a move: it only asks the position to turn a
/// SAN token into one and to play it.
pub trait Rules: Clone + fmt::Debug {
    type Move: Clone + fmt::Debug;

    fn standard_start() -> Self;

    fn from_fen(fen: &str) -> Result<Self, PgnError>;

    /// The legal move named by `san` in this position, if any.
    fn resolve(&self, san: &str) -> Option<Self::Move>;

    /// Plays a move previously returned by [`Rules::resolve`] on this position.
    fn apply(&mut self, m: &Self::Move);
}

impl Rules for Chess {
    type Move = Move;

    fn standard_start() -> Self {
        Chess::default()
    }

    fn from_fen(fen: &str) -> Result<Self, PgnError> {
        let setup = fen.parse::<Fen>().map_err(|source| PgnError::InvalidFen {
            fen: fen.to_string(),
            source,
        })?;

        setup
            .into_position(CastlingMode::Standard)
            .map_err(|e| PgnError::InvalidPosition(Box::new(e)))
    }

    fn resolve(&self, san: &str) -> Option<Move> {
        let san: SanPlus = san.parse().ok()?;
        san.san.to_move(self).ok()
    }

    fn apply(&mut self, m: &Move) {
        self.play_unchecked(*m);
    }
}
