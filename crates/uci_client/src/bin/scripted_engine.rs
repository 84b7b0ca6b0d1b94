//! Scripted UCI responder used by the session integration tests.
//!
//! Not a chess engine: it knows no rules and only exists so that
//! `tests/session_tests.rs` can reach it through `CARGO_BIN_EXE_scripted_engine`.
//! Do not install it alongside the library.
//!
//! The first argument picks a behaviour:
//! - `normal` (default): answers the handshake and mirrors the last move,
//!   or `0000` when the position repeats a move text
//! - `mute`: never sends `uciok`
//! - `silent`: never answers `go`, not even after `stop`
//! - `slow-stop`: answers `go` only once `stop` arrives
//! - `crash`: exits as soon as `go` arrives
//! - `chunked`: writes the bestmove line in small flushed pieces
//! - `stubborn`: ignores `quit` and stays alive after stdin closes

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Mute,
    Silent,
    SlowStop,
    Crash,
    Chunked,
    Stubborn,
}

fn mode_from_args() -> Mode {
    match std::env::args().nth(1).as_deref() {
        Some("mute") => Mode::Mute,
        Some("silent") => Mode::Silent,
        Some("slow-stop") => Mode::SlowStop,
        Some("crash") => Mode::Crash,
        Some("chunked") => Mode::Chunked,
        Some("stubborn") => Mode::Stubborn,
        _ => Mode::Normal,
    }
}

/// Answer a move with its mirror image across the board: e2e4 -> e7e5.
fn mirror(mv: &str) -> String {
    mv.bytes()
        .enumerate()
        .map(|(i, b)| {
            if i % 2 == 1 && (b'1'..=b'8').contains(&b) {
                (b'1' + b'8' - b) as char
            } else {
                b as char
            }
        })
        .collect()
}

fn send_bestmove(stdout: &mut impl Write, mode: Mode, last_move: Option<&str>) {
    let best = last_move.map(mirror).unwrap_or_else(|| "e2e4".to_string());
    writeln!(stdout, "info depth 1 score cp 0 nodes 1 pv {best}").ok();
    let line = format!("bestmove {best} ponder g1f3\n");
    if mode == Mode::Chunked {
        for piece in line.as_bytes().chunks(5) {
            stdout.write_all(piece).ok();
            stdout.flush().ok();
            thread::sleep(Duration::from_millis(5));
        }
    } else {
        stdout.write_all(line.as_bytes()).ok();
    }
    stdout.flush().ok();
}

fn main() {
    let mode = mode_from_args();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut last_move: Option<String> = None;
    let mut searching = false;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                writeln!(stdout, "id name ScriptedEngine").ok();
                writeln!(stdout, "id author chess3d").ok();
                if mode != Mode::Mute {
                    writeln!(stdout, "uciok").ok();
                }
                stdout.flush().ok();
            }
            "isready" => {
                writeln!(stdout, "readyok").ok();
                stdout.flush().ok();
            }
            "ucinewgame" => {
                last_move = None;
            }
            "position" => {
                let moves: Vec<&str> = parts
                    .iter()
                    .skip_while(|&&p| p != "moves")
                    .skip(1)
                    .copied()
                    .collect();
                // Same move text twice means the client replayed a move; answer null.
                let replayed = moves
                    .iter()
                    .enumerate()
                    .any(|(i, mv)| moves[..i].contains(mv));
                last_move = if replayed {
                    Some("0000".to_string())
                } else {
                    moves.last().map(|mv| mv.to_string())
                };
            }
            "go" => match mode {
                Mode::Crash => std::process::exit(3),
                Mode::Silent => {}
                Mode::SlowStop => searching = true,
                _ => send_bestmove(&mut stdout, mode, last_move.as_deref()),
            },
            "stop" => {
                if searching {
                    searching = false;
                    send_bestmove(&mut stdout, mode, last_move.as_deref());
                }
            }
            "quit" => {
                if mode != Mode::Stubborn {
                    break;
                }
            }
            _ => {
                // ignore unknown commands
            }
        }
    }

    if mode == Mode::Stubborn {
        loop {
            thread::sleep(Duration::from_secs(1));
        }
    }
}
