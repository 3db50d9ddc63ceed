use super::types::Game;
use serde_json::{Value, json};
use shakmaty::{CastlingMode, Chess, EnPassantMode, fen::Fen};

pub fn fen_string(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// One JSON object per game, with the UCI move and resulting FEN of every ply.
pub fn game_json(game: &Game, source: &str, index: usize) -> Value {
    let moves: Vec<Value> = game
        .moves()
        .iter()
        .zip(game.positions())
        .enumerate()
        .map(|(ply, (m, pos))| {
            json!({
                "ply": ply + 1,
                "uci": m.to_uci(CastlingMode::Standard).to_string(),
                "fen": fen_string(&pos),
            })
        })
        .collect();

    json!({
        "file": source,
        "game": index,
        "result": game.result().as_str(),
        "score": game.result().score(),
        "start_fen": fen_string(game.starting_position()),
        "moves": moves,
    })
}

/// Tab-separated `file, game, result, plies, final FEN`.
pub fn game_summary(game: &Game, source: &str, index: usize) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        source,
        index,
        game.result(),
        game.moves().len(),
        fen_string(&game.final_position())
    )
}
