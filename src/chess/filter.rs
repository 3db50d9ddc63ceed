use super::outcome::GameResult;
use super::stream::PgnStream;
use std::io::{self, BufRead};

/// First token of the next game's header block.
const NEXT_GAME_TAG: &str = "[Event";

/// Why the movetext of a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovetextEnd {
    /// A result token terminated the movetext.
    Result(GameResult),
    /// The next game's `[Event` tag was reached.
    NextGame,
    Exhausted,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TokenClass<'a> {
    End(MovetextEnd),
    Skip,
    San(&'a str),
}

/// Classifies a single whitespace-delimited movetext token.
///
/// Comments and tags are recognized by their first or last character only, so
/// the inner words of a multi-word `{ ... }` comment are not filtered.
pub(crate) fn classify(token: &str) -> TokenClass<'_> {
    if token.is_empty() {
        return TokenClass::End(MovetextEnd::Exhausted);
    }
    if token == NEXT_GAME_TAG {
        return TokenClass::End(MovetextEnd::NextGame);
    }
    if let Some(result) = GameResult::decode(token) {
        return TokenClass::End(MovetextEnd::Result(result));
    }

    if is_comment_fragment(token) || is_move_number(token) {
        return TokenClass::Skip;
    }

    match strip_trailing_glyphs(token) {
        "" => TokenClass::Skip,
        san => TokenClass::San(san),
    }
}

fn is_comment_fragment(token: &str) -> bool {
    token.starts_with(['{', '[']) || token.ends_with(['}', ']'])
}

/// `14.` and `14...`
fn is_move_number(token: &str) -> bool {
    token.ends_with('.')
}

/// Removes every trailing `!` and `?`, e.g. `Nf3!?` becomes `Nf3`.
pub fn strip_trailing_glyphs(token: &str) -> &str {
    token.trim_end_matches(['!', '?'])
}

/// Cleaned SAN candidates read lazily from the movetext of one game.
///
/// The sequence stops at the first terminating token, which is consumed but
/// not yielded; [`MoveTokens::end`] tells which kind it was.
pub struct MoveTokens<'s, R> {
    stream: &'s mut PgnStream<R>,
    end: Option<MovetextEnd>,
}

impl<'s, R: BufRead> MoveTokens<'s, R> {
    pub fn new(stream: &'s mut PgnStream<R>) -> Self {
        Self { stream, end: None }
    }

    /// `None` while the movetext has not been fully consumed.
    pub fn end(&self) -> Option<MovetextEnd> {
        self.end
    }
}

impl<R: BufRead> Iterator for MoveTokens<'_, R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end.is_some() {
            return None;
        }

        loop {
            let token = match self.stream.read_token() {
                Ok(Some(token)) => token,
                Ok(None) => {
                    self.end = Some(MovetextEnd::Exhausted);
                    return None;
                }
                Err(e) => {
                    self.end = Some(MovetextEnd::Exhausted);
                    return Some(Err(e));
                }
            };

            match classify(&token) {
                TokenClass::End(end) => {
                    self.end = Some(end);
                    return None;
                }
                TokenClass::Skip => continue,
                TokenClass::San(san) => return Some(Ok(san.to_string())),
            }
        }
    }
}
