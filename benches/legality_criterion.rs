use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use spell_chess::game_state::chess_types::{Color, GameStatus};
use spell_chess::game_state::game_state::GameState;
use spell_chess::move_generation::game_status::evaluate_status;
use spell_chess::move_generation::legal_move_generator::generate_legal_moves;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_moves: usize,
    expected_status: GameStatus,
}

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTPOS_FEN,
        expected_moves: 20,
        expected_status: GameStatus::Active,
    },
    BenchCase {
        name: "back_rank_mate",
        fen: "R3k3/8/4K3/8/8/8/8/8 b - - 0 1",
        expected_moves: 0,
        expected_status: GameStatus::Checkmate,
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTPOS_FEN,
        expected_moves: 20,
        expected_status: GameStatus::Active,
    },
    BenchCase {
        name: "middlegame",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_moves: 48,
        expected_status: GameStatus::Active,
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_moves: 14,
        expected_status: GameStatus::Active,
    },
    BenchCase {
        name: "back_rank_mate",
        fen: "R3k3/8/4K3/8/8/8/8/8 b - - 0 1",
        expected_moves: 0,
        expected_status: GameStatus::Checkmate,
    },
    BenchCase {
        name: "corner_stalemate",
        fen: "k7/8/1Q6/8/8/8/8/7K b - - 0 1",
        expected_moves: 0,
        expected_status: GameStatus::Stalemate,
    },
];

fn suite_name() -> &'static str {
    match std::env::var("SPELL_CHESS_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => "standard",
        _ => "quick",
    }
}

fn selected_cases() -> &'static [BenchCase] {
    match suite_name() {
        "standard" => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn bench_legality(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("legality_{}", suite_name()));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in selected_cases() {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let side: Color = game.side_to_move;

        // Correctness guard before benchmarking.
        let moves = generate_legal_moves(&game, side);
        assert_eq!(moves.len(), case.expected_moves, "move count mismatch for {}", case.name);
        assert_eq!(evaluate_status(&game), case.expected_status, "status mismatch for {}", case.name);

        group.throughput(Throughput::Elements(case.expected_moves.max(1) as u64));

        group.bench_with_input(
            BenchmarkId::new("generate_legal_moves", case.name),
            &game,
            |b, game| {
                b.iter(|| {
                    let moves = generate_legal_moves(black_box(game), black_box(side));
                    black_box(moves.len())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("evaluate_status", case.name),
            &game,
            |b, game| b.iter(|| black_box(evaluate_status(black_box(game)))),
        );
    }

    group.finish();
}

criterion_group!(legality_benches, bench_legality);
criterion_main!(legality_benches);
