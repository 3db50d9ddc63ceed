use shakmaty::{Chess, PositionError, fen::ParseFenError};
use std::io;

/// Fatal conditions of a single `read_game` call.
///
/// Running out of input is not an error: it is reported as `Ok(None)`.
#[derive(thiserror::Error, Debug)]
pub enum PgnError {
    /// The `Result` tag is missing or not one of `1-0`, `0-1`, `1/2-1/2`.
    #[error("malformed result: '{0}'")]
    MalformedResult(String),

    /// A cleaned movetext token does not name a legal move.
    #[error("illegal move '{token}' at ply {ply}")]
    IllegalMove { token: String, ply: usize },

    #[error("invalid FEN '{fen}': {source}")]
    InvalidFen {
        fen: String,
        #[source]
        source: ParseFenError,
    },

    /// The FEN parsed but does not describe a legal chess position.
    #[error(transparent)]
    InvalidPosition(#[from] Box<PositionError<Chess>>),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PgnError {
    /// Token the error was raised for, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::MalformedResult(token) | Self::IllegalMove { token, .. } => Some(token.as_str()),
            Self::InvalidFen { fen, .. } => Some(fen.as_str()),
            Self::InvalidPosition(_) | Self::Io(_) => None,
        }
    }
}
