use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bounceline::rules::{check_game_winner, check_win_for_player, find_winning_move};
use bounceline::search::{find_minimax_move, SearchLimits, Searcher};
use bounceline::{Board, EngineConfig, Player, RuleConfig};

fn midgame() -> Board {
    Board::parse(
        "......
         ..XO..
         .OXX..
         ..XO..
         ...O..
         ......",
    )
    .expect("valid diagram")
}

fn bench_rules(c: &mut Criterion) {
    let board = midgame();
    let mut group = c.benchmark_group("rules");
    for (name, rules) in [
        ("straight", RuleConfig::STRAIGHT),
        ("bounce", RuleConfig::new(true, false)),
        ("bounce_teeth", RuleConfig::new(true, true)),
    ] {
        group.bench_function(format!("winner_{name}"), |b| {
            b.iter(|| black_box(check_game_winner(black_box(&board), rules, 5)))
        });
        group.bench_function(format!("winning_move_{name}"), |b| {
            b.iter(|| black_box(find_winning_move(black_box(&board), Player::A, rules, 5)))
        });
    }
    group.bench_function("path", |b| {
        b.iter(|| black_box(check_win_for_player(black_box(&board), Player::A)))
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let board = midgame();
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("search");
    group.sample_size(20);

    group.bench_function("minimax_move_straight", |b| {
        b.iter(|| black_box(find_minimax_move(&board, Player::A, RuleConfig::STRAIGHT, &config)))
    });
    group.bench_function("minimax_move_bounce_teeth", |b| {
        b.iter(|| {
            black_box(find_minimax_move(&board, Player::A, RuleConfig::new(true, true), &config))
        })
    });
    for depth in [2u8, 3, 4] {
        group.bench_function(format!("iterative_depth_{depth}"), |b| {
            b.iter(|| {
                let mut searcher = Searcher::new(&config, RuleConfig::STRAIGHT, Player::A);
                black_box(searcher.search_iterative(&board, SearchLimits::depth(depth)))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rules, bench_search);
criterion_main!(benches);
