//! Reads chess games from PGN text: the starting position, the moves played
//! from it and the result.
//!
//! ```no_run
//! use pgn_game::PgnReader;
//! use std::{fs::File, io::BufReader};
//!
//! let file = File::open("games.pgn")?;
//! let mut reader = PgnReader::new(BufReader::new(file));
//! while let Some(game) = reader.read_game()? {
//!     println!("{} after {} plies", game.result(), game.moves().len());
//! }
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

pub mod chess;

pub use chess::{Game, GameContext, GameResult, MoveList, PgnError, PgnReader, Rules};
