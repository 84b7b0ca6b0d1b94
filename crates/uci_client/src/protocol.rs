//! Text of the UCI conversation: commands we send and tokens we look for.

/// Bytes read from the engine per call; responses are reassembled into lines.
pub const READ_BUFFER_SIZE: usize = 4096;

pub const UCI: &str = "uci";
pub const UCI_OK: &str = "uciok";
pub const IS_READY: &str = "isready";
pub const READY_OK: &str = "readyok";
pub const UCI_NEW_GAME: &str = "ucinewgame";
pub const STOP: &str = "stop";
pub const QUIT: &str = "quit";
pub const BEST_MOVE: &str = "bestmove";

/// Length of a move as this client speaks it: `<from><to>`, e.g. `e2e4`.
pub const MOVE_TEXT_LEN: usize = 4;

/// Checks the shape of a coordinate move: two squares, `[a-h][1-8]` each.
/// Promotion suffixes are not part of the format.
pub fn is_move_text(txt: &str) -> bool {
    let b = txt.as_bytes();
    b.len() == MOVE_TEXT_LEN
        && b.chunks(2)
            .all(|sq| (b'a'..=b'h').contains(&sq[0]) && (b'1'..=b'8').contains(&sq[1]))
}

/// `position startpos moves ...` for the moves played so far.
pub fn position_command(moves: &[String]) -> String {
    if moves.is_empty() {
        "position startpos".to_string()
    } else {
        format!("position startpos moves {}", moves.join(" "))
    }
}

/// Extracts the engine's move from a response containing `bestmove`.
///
/// The move is the four characters right after `bestmove ` (token plus one
/// space). Returns `None` when the token is missing or the text ends early.
pub fn parse_bestmove(response: &str) -> Option<&str> {
    let pos = response.find(BEST_MOVE)?;
    let start = pos + BEST_MOVE.len() + 1;
    response.get(start..start + MOVE_TEXT_LEN)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
