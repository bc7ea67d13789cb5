//! Benchmarks for move generation, FEN handling and game replay.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_rules::{Game, Position};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    let startpos = Position::starting();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    let kiwipete: Position = KIWIPETE.parse().unwrap();
    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    for (name, fen) in [
        ("startpos", chess_rules::board::STARTING_FEN),
        ("middlegame", MIDDLEGAME),
        ("kiwipete", KIWIPETE),
    ] {
        let pos: Position = fen.parse().unwrap();
        group.bench_function(name, |b| b.iter(|| black_box(pos.legal_moves())));
    }

    group.finish();
}

fn bench_fen(c: &mut Criterion) {
    let mut group = c.benchmark_group("fen");

    group.bench_function("parse_kiwipete", |b| {
        b.iter(|| Position::from_fen(black_box(KIWIPETE)))
    });

    let pos: Position = KIWIPETE.parse().unwrap();
    group.bench_function("write_kiwipete", |b| b.iter(|| black_box(pos.to_fen())));

    group.finish();
}

fn bench_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("game");

    // Ruy Lopez to move 6, both sides castled
    let moves = [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6", "e1g1", "f8e7", "f1e1",
        "e8g8",
    ];
    group.bench_function("replay_ruy_lopez", |b| {
        b.iter(|| {
            let mut game = Game::new();
            for text in moves {
                let _ = game.play_coordinate(black_box(text));
            }
            game.fen()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_fen, bench_game);
criterion_main!(benches);
