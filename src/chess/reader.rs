use super::{
    error::PgnError,
    filter::{MoveTokens, MovetextEnd},
    header::scan_headers,
    outcome::GameResult,
    rules::Rules,
    stream::PgnStream,
    types::{Game, GameContext},
};
use shakmaty::Chess;
use std::io::BufRead;

/// Reads games one at a time from a PGN stream.
///
/// Each successful call leaves the stream at the first header line of the
/// following game, so calling [`PgnReader::read_game`] until it returns
/// `Ok(None)` walks a whole file. After an error the stream position is
/// unspecified.
pub struct PgnReader<R> {
    stream: PgnStream<R>,
    games_read: usize,
}

impl<R: BufRead> PgnReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            stream: PgnStream::new(inner),
            games_read: 0,
        }
    }

    /// Number of games returned so far.
    pub fn games_read(&self) -> usize {
        self.games_read
    }

    pub fn read_game(&mut self) -> Result<Option<Game>, PgnError> {
        self.read_game_with::<Chess>()
    }

    pub fn read_game_with<P: Rules>(&mut self) -> Result<Option<Game<P>>, PgnError> {
        let Some(headers) = scan_headers(&mut self.stream)? else {
            return Ok(None);
        };

        let starting_position = if headers.fen.is_empty() {
            log::info!("no FEN tag, starting from the standard position");
            P::standard_start()
        } else {
            P::from_fen(&headers.fen)?
        };

        let result: GameResult = headers.result.parse()?;

        let mut context = GameContext::new(starting_position.clone());
        let mut tokens = MoveTokens::new(&mut self.stream);
        for token in tokens.by_ref() {
            context.play(&token?)?;
        }
        let end = tokens.end();

        match end {
            Some(MovetextEnd::Result(trailing)) => {
                if trailing != result {
                    log::warn!(
                        "movetext ends with {trailing} but the Result tag says {result}; \
                         keeping {result}"
                    );
                }
                self.skip_trailer()?;
            }
            Some(MovetextEnd::NextGame) => {
                log::debug!("movetext ran into the next game without a result token");
            }
            Some(MovetextEnd::Exhausted) | None => {}
        }

        self.games_read += 1;
        Ok(Some(Game::new(
            starting_position,
            context.into_moves(),
            result,
        )))
    }

    /// Consumes the rest of the result line and the blank separator after it.
    fn skip_trailer(&mut self) -> Result<(), PgnError> {
        if self.stream.read_line()?.is_some() {
            self.stream.skip_blank_line()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgn_reader::{Reader, SanPlus, Skip, Visitor};
    use shakmaty::{EnPassantMode, Position, fen::Fen};
    use std::io::{self, BufReader, Cursor, Read};
    use std::ops::ControlFlow;

    const IMMORTAL: &str = r#"[Event "London"]
[Site "London ENG"]
[Date "1851.06.21"]
[White "Adolf Anderssen"]
[Black "Lionel Kieseritzky"]
[Result "1-0"]

1. e4 e5 2. f4 exf4 3. Bc4 Qh4+ 4. Kf1 b5 5. Bxb5 Nf6 6. Nf3 Qh6 7. d3 Nh5
8. Nh4 Qg5 9. Nf5 c6 10. g4 Nf6 11. Rg1 cxb5 12. h4 Qg6 13. h5 Qg5 14. Qf3
Ng8 15. Bxf4 Qf6 16. Nc3 Bc5 17. Nd5 Qxb2 18. Bd6 Bxg1 19. e5 Qxa1+ 20. Ke2
Na6 21. Nxg7+ Kd8 22. Qf6+ Nxf6 23. Be7# 1-0

"#;

    const SCHOLARS_MATE: &str = r#"[Event "Club"]
[Result "1-0"]

1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6?? 4. Qxf7# 1-0

"#;

    fn reader(text: &str) -> PgnReader<Cursor<Vec<u8>>> {
        PgnReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    fn fen_of(pos: &Chess) -> String {
        Fen::from_position(pos, EnPassantMode::Legal).to_string()
    }

    #[derive(Default)]
    struct SanCounter {
        sans: usize,
    }

    impl Visitor for SanCounter {
        type Tags = ();
        type Movetext = ();
        type Output = usize;

        fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
            self.sans = 0;
            ControlFlow::Continue(())
        }

        fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
            ControlFlow::Continue(())
        }

        fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
            ControlFlow::Continue(Skip(true))
        }

        fn san(&mut self, _: &mut Self::Movetext, _: SanPlus) -> ControlFlow<Self::Output> {
            self.sans += 1;
            ControlFlow::Continue(())
        }

        fn end_game(&mut self, _: Self::Movetext) -> Self::Output {
            self.sans
        }
    }

    #[test]
    fn test_read_game_basic() {
        let mut reader = reader(SCHOLARS_MATE);

        let game = reader.read_game().unwrap().expect("Should have parsed a game");
        assert_eq!(game.moves().len(), 7);
        assert_eq!(game.result(), GameResult::WhiteWin);
        assert_eq!(game.result().score(), 1);
        assert_eq!(reader.games_read(), 1);
    }

    #[test]
    fn test_read_game_move_count_matches_pgn_reader() {
        let mut ours = reader(IMMORTAL);
        let game = ours.read_game().unwrap().expect("Should have parsed a game");

        let mut oracle = Reader::new(IMMORTAL.as_bytes());
        let sans = oracle
            .read_game(&mut SanCounter::default())
            .unwrap()
            .expect("pgn-reader should see a game");

        assert_eq!(sans, 45);
        assert_eq!(game.moves().len(), sans);
        assert!(game.final_position().is_checkmate());
    }

    #[test]
    fn test_read_game_missing_fen_uses_standard_start() {
        let mut reader = reader(SCHOLARS_MATE);

        let game = reader.read_game().unwrap().unwrap();
        assert_eq!(fen_of(game.starting_position()), fen_of(&Chess::default()));
    }

    #[test]
    fn test_read_game_from_fen() {
        let mut reader = reader(
            r#"[Event "Endgame"]
[SetUp "1"]
[FEN "4k3/8/4K3/8/8/8/8/7R w - - 0 1"]
[Result "1-0"]

1. Rh8# 1-0
"#,
        );

        let game = reader.read_game().unwrap().unwrap();
        assert_eq!(fen_of(game.starting_position()), "4k3/8/4K3/8/8/8/8/7R w - - 0 1");
        assert_eq!(game.moves().len(), 1);
        assert_eq!(
            fen_of(&game.final_position()),
            "4k2R/8/4K3/8/8/8/8/8 b - - 1 1"
        );
    }

    #[test]
    fn test_read_game_uses_last_fen_tag() {
        let mut reader = reader(
            r#"[FEN "4k3/8/4K3/8/8/8/8/8 w - - 0 1"]
[FEN "4k3/8/4K3/8/8/8/8/7R w - - 0 1"]
[Result "1-0"]

1. Rh8# 1-0
"#,
        );

        let game = reader.read_game().unwrap().unwrap();
        assert_eq!(fen_of(game.starting_position()), "4k3/8/4K3/8/8/8/8/7R w - - 0 1");
        assert_eq!(game.moves().len(), 1);
        assert!(game.final_position().is_checkmate());
    }

    #[test]
    fn test_read_game_headers_then_end_of_stream_is_none() {
        let mut reader = reader("[Event \"Truncated\"]\n[Result \"1-0\"]\n");
        assert!(reader.read_game().unwrap().is_none());
        assert_eq!(reader.games_read(), 0);
    }

    #[test]
    fn test_read_game_empty_stream_is_none() {
        assert!(reader("").read_game().unwrap().is_none());
        assert!(reader("\n\n\n").read_game().unwrap().is_none());
    }

    #[test]
    fn test_read_game_skips_move_numbers_and_annotations() {
        let mut reader = reader(
            "[Result \"1/2-1/2\"]\n\n1. e4!? e5 2. Nf3 Nc6?! 3. Bb5!! a6 14... 1/2-1/2\n",
        );

        let game = reader.read_game().unwrap().unwrap();
        assert_eq!(game.moves().len(), 6);
        assert_eq!(game.result(), GameResult::Draw);
    }

    #[test]
    fn test_read_game_missing_result_is_malformed() {
        let mut reader = reader("[Event \"No result\"]\n\n1. e4 e5 1-0\n");

        let err = reader.read_game().unwrap_err();
        assert!(matches!(err, PgnError::MalformedResult(ref token) if token.is_empty()));
    }

    #[test]
    fn test_read_game_unknown_result_is_malformed() {
        let mut reader = reader("[Result \"*\"]\n\n1. e4 *\n");

        let err = reader.read_game().unwrap_err();
        assert!(matches!(err, PgnError::MalformedResult(ref token) if token == "*"));
    }

    #[test]
    fn test_read_game_illegal_move() {
        let mut reader = reader("[Result \"0-1\"]\n\n1. e4 e5 2. Ke3 Nc6 0-1\n");

        let err = reader.read_game().unwrap_err();
        assert!(matches!(
            err,
            PgnError::IllegalMove { ref token, ply: 3 } if token == "Ke3"
        ));
        assert_eq!(reader.games_read(), 0);
    }

    #[test]
    fn test_read_game_multi_word_comment_is_rejected_as_move() {
        let mut reader = reader("[Result \"1-0\"]\n\n1. e4 { king pawn } e5 1-0\n");

        let err = reader.read_game().unwrap_err();
        assert!(matches!(err, PgnError::IllegalMove { ref token, .. } if token == "king"));
    }

    #[test]
    fn test_read_game_single_word_comments_are_skipped() {
        let mut reader = reader("[Result \"1-0\"]\n\n1. e4 {best} e5 [%clk 0:01:00] 1-0\n");
        // `[%clk` and `0:01:00]` are both tag fragments.
        let game = reader.read_game().unwrap().unwrap();
        assert_eq!(game.moves().len(), 2);
    }

    #[test]
    fn test_read_game_invalid_fen_is_propagated() {
        let mut reader = reader("[FEN \"garbage\"]\n[Result \"1-0\"]\n\n1-0\n");

        let err = reader.read_game().unwrap_err();
        assert!(matches!(err, PgnError::InvalidFen { .. }));
    }

    #[test]
    fn test_read_game_sequential_games() {
        let text = format!("{SCHOLARS_MATE}{IMMORTAL}");
        let mut reader = reader(&text);

        let first = reader.read_game().unwrap().expect("first game");
        let second = reader.read_game().unwrap().expect("second game");

        assert_eq!(first.moves().len(), 7);
        assert_eq!(second.moves().len(), 45);
        assert!(reader.read_game().unwrap().is_none());
        assert_eq!(reader.games_read(), 2);
    }

    #[test]
    fn test_read_game_sequential_games_without_blank_trailer() {
        let text = "[Result \"0-1\"]\n\n1. f3 e5 2. g4 Qh4# 0-1\n[Result \"1-0\"]\n\n1. e4 1-0";
        let mut reader = reader(text);

        let first = reader.read_game().unwrap().unwrap();
        let second = reader.read_game().unwrap().unwrap();

        assert_eq!(first.result(), GameResult::BlackWin);
        assert_eq!(first.moves().len(), 4);
        assert_eq!(second.result(), GameResult::WhiteWin);
        assert_eq!(second.moves().len(), 1);
        assert!(reader.read_game().unwrap().is_none());
    }

    #[test]
    fn test_read_game_without_result_token_stops_at_next_event() {
        let text = concat!(
            "[Event \"A\"]\n[Result \"1-0\"]\n\n1. e4 e5\n\n",
            "[Event \"B\"]\n[Result \"0-1\"]\n\n1. d4 0-1\n",
        );
        let mut reader = reader(text);

        let first = reader.read_game().unwrap().unwrap();
        let second = reader.read_game().unwrap().unwrap();

        assert_eq!(first.moves().len(), 2);
        assert_eq!(second.result(), GameResult::BlackWin);
        assert_eq!(second.moves().len(), 1);
    }

    #[test]
    fn test_read_game_header_result_wins_over_movetext_token() {
        let mut reader = reader("[Result \"1-0\"]\n\n1. e4 0-1\n");

        let game = reader.read_game().unwrap().unwrap();
        assert_eq!(game.result(), GameResult::WhiteWin);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk gone"))
        }
    }

    #[test]
    fn test_read_game_io_error_in_movetext_is_fatal() {
        let input = "[Result \"1-0\"]\n\n1. e4 ".as_bytes().chain(Broken);
        let mut reader = PgnReader::new(BufReader::new(input));

        let err = reader.read_game().unwrap_err();
        assert!(matches!(err, PgnError::Io(ref e) if e.to_string() == "disk gone"));
        assert_eq!(reader.games_read(), 0);
    }

    #[derive(Debug, Clone)]
    struct Tally(usize);

    impl Rules for Tally {
        type Move = String;

        fn standard_start() -> Self {
            Tally(0)
        }

        fn from_fen(fen: &str) -> Result<Self, PgnError> {
            Ok(Tally(fen.len()))
        }

        fn resolve(&self, san: &str) -> Option<String> {
            Some(san.to_string())
        }

        fn apply(&mut self, _: &String) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_read_game_with_custom_rules() {
        let mut reader =
            reader("[FEN \"abc\"]\n[Result \"0-1\"]\n\n1. anything goes 2. here 0-1\n");

        let game = reader.read_game_with::<Tally>().unwrap().unwrap();
        assert_eq!(game.starting_position().0, 3);
        assert_eq!(game.moves(), ["anything", "goes", "here"]);
        assert_eq!(game.final_position().0, 6);
    }
}
