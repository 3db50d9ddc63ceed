use super::stream::PgnStream;
use std::io::{self, BufRead};

const FEN_TAG: &str = "[FEN \"";
const RESULT_TAG: &str = "[Result \"";

/// The two header values the parser keeps. Empty when the tag is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub fen: String,
    pub result: String,
}

impl HeaderFields {
    fn capture(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix(FEN_TAG) {
            self.fen = tag_value(rest).to_string();
            log::debug!("found FEN {}", self.fen);
        } else if let Some(rest) = line.strip_prefix(RESULT_TAG) {
            self.result = tag_value(rest).to_string();
        }
    }
}

fn tag_value(rest: &str) -> &str {
    let rest = rest.trim_end();
    rest.strip_suffix("\"]")
        .unwrap_or_else(|| rest.trim_end_matches([']', '"']))
}

/// Reads header lines up to the blank line that opens the movetext.
///
/// Blank lines before the first header are leftovers of the previous game and
/// are skipped rather than taken as the separator of an empty header block, so
/// extra blank lines between games do not produce a game with no `Result` tag.
/// Returns `None` if the stream ends before the separator.
pub fn scan_headers<R: BufRead>(stream: &mut PgnStream<R>) -> io::Result<Option<HeaderFields>> {
    let mut headers = HeaderFields::default();
    let mut started = false;

    while let Some(line) = stream.read_line()? {
        if line.trim().is_empty() {
            if started {
                return Ok(Some(headers));
            }
            continue;
        }

        started = true;
        headers.capture(&line);
    }

    Ok(None)
}
