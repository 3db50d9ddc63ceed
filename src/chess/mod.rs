pub mod error;
pub mod filter;
pub mod header;
pub mod input;
pub mod logging;
pub mod moves;
pub mod outcome;
pub mod reader;
pub mod rules;
pub mod stream;
pub mod types;

pub use error::PgnError;
pub use outcome::GameResult;
pub use reader::PgnReader;
pub use rules::Rules;
pub use types::{Game, GameContext, MoveList};
