use super::error::PgnError;
use std::fmt;
use std::str::FromStr;

/// Final result of a game, as recorded by a PGN result token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameResult {
    /// Decodes a result token. Only the exact literals `1-0`, `0-1` and
    /// `1/2-1/2` are recognized.
    pub fn decode(token: &str) -> Option<Self> {
        match token {
            "1-0" => Some(Self::WhiteWin),
            "0-1" => Some(Self::BlackWin),
            "1/2-1/2" => Some(Self::Draw),
            _ => None,
        }
    }

    /// Signed outcome from white's point of view.
    pub const fn score(self) -> i8 {
        match self {
            Self::WhiteWin => 1,
            Self::BlackWin => -1,
            Self::Draw => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WhiteWin => "1-0",
            Self::BlackWin => "0-1",
            Self::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameResult {
    type Err = PgnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s).ok_or_else(|| PgnError::MalformedResult(s.to_string()))
    }
}
