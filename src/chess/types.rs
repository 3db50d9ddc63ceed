use super::error::PgnError;
use super::outcome::GameResult;
use super::rules::Rules;
use shakmaty::Chess;
use smallvec::SmallVec;

pub type MoveList<M> = SmallVec<[M; 128]>;

/// A parsed game: where it started, what was played, how it ended.
#[derive(Debug, Clone)]
pub struct Game<P: Rules = Chess> {
    starting_position: P,
    moves: MoveList<P::Move>,
    result: GameResult,
}

impl<P: Rules> Game<P> {
    pub(crate) fn new(starting_position: P, moves: MoveList<P::Move>, result: GameResult) -> Self {
        Self {
            starting_position,
            moves,
            result,
        }
    }

    pub fn starting_position(&self) -> &P {
        &self.starting_position
    }

    /// Moves in play order.
    pub fn moves(&self) -> &[P::Move] {
        &self.moves
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Position after each ply, replayed from the starting position.
    pub fn positions(&self) -> impl Iterator<Item = P> + '_ {
        let mut position = self.starting_position.clone();
        self.moves.iter().map(move |m| {
            position.apply(m);
            position.clone()
        })
    }

    pub fn final_position(&self) -> P {
        self.positions()
            .last()
            .unwrap_or_else(|| self.starting_position.clone())
    }
}

/// Live position and move history of the game being assembled.
pub struct GameContext<P: Rules> {
    position: P,
    moves: MoveList<P::Move>,
}

impl<P: Rules> GameContext<P> {
    pub fn new(starting_position: P) -> Self {
        Self {
            position: starting_position,
            moves: MoveList::new(),
        }
    }

    pub fn position(&self) -> &P {
        &self.position
    }

    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// Resolves `san` against the live position, plays it and records it.
    pub fn play(&mut self, san: &str) -> Result<(), PgnError> {
        let m = self
            .position
            .resolve(san)
            .ok_or_else(|| PgnError::IllegalMove {
                token: san.to_string(),
                ply: self.moves.len() + 1,
            })?;

        self.position.apply(&m);
        self.moves.push(m);
        Ok(())
    }

    pub fn into_moves(self) -> MoveList<P::Move> {
        self.moves
    }
}
