use std::env;
use std::process::ExitCode;

use chess_rules::{Game, MoveOutcome};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--help") {
        eprintln!("usage: game_status [--fen <fen>] <move1> <move2> ...");
        return ExitCode::SUCCESS;
    }

    let mut moves = args.iter().map(String::as_str);
    let mut game = Game::new();
    let mut rest: Vec<&str> = Vec::new();
    while let Some(arg) = moves.next() {
        if arg == "--fen" {
            let Some(fen) = moves.next() else {
                eprintln!("--fen needs a value");
                return ExitCode::FAILURE;
            };
            if let Err(err) = game.load_fen(fen) {
                eprintln!("bad fen: {err}");
                return ExitCode::FAILURE;
            }
        } else {
            rest.push(arg);
        }
    }

    for text in rest {
        match game.play_coordinate(text) {
            Ok(MoveOutcome::Applied(_)) => {}
            Ok(MoveOutcome::AwaitingPromotion(_)) => {
                eprintln!("{text}: promotion needs a piece, e.g. {text}q");
                return ExitCode::FAILURE;
            }
            Ok(MoveOutcome::Rejected(reason)) => {
                eprintln!("{text}: {reason}");
                return ExitCode::FAILURE;
            }
            Err(err) => {
                eprintln!("{text}: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    let turn = game.current_turn();
    println!("{}", game.board());
    println!("fen: {}", game.fen());
    for line in game.history().move_log() {
        println!("{line}");
    }
    println!("side_to_move: {turn}");
    println!("legal_moves: {}", game.all_legal_moves().len());
    println!("check: {}", game.is_in_check(turn));
    println!("checkmate: {}", game.is_checkmate());
    println!("stalemate: {}", game.is_stalemate());
    ExitCode::SUCCESS
}
