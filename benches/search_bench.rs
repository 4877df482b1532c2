use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use gambit::search::{search, Engine};
use gambit::types::EngineConfig;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};

fn pos_from_fen(fen: &str) -> Chess {
    let fen: Fen = fen.parse().unwrap();
    fen.into_position(CastlingMode::Standard).unwrap()
}

fn bench_search(c: &mut Criterion) {
    let startpos = Chess::default();
    let kiwipete = pos_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");

    c.bench_function("search_depth_3_startpos", |b| {
        b.iter(|| {
            let mut engine = Engine::new(&EngineConfig::default());
            search(&mut engine, &startpos, 3, Duration::from_secs(30))
        })
    });

    c.bench_function("search_depth_3_kiwipete", |b| {
        b.iter(|| {
            let mut engine = Engine::new(&EngineConfig::default());
            search(&mut engine, &kiwipete, 3, Duration::from_secs(30))
        })
    });

    c.bench_function("search_depth_4_startpos", |b| {
        b.iter(|| {
            let mut engine = Engine::new(&EngineConfig::default());
            search(&mut engine, &startpos, 4, Duration::from_secs(30))
        })
    });
}

fn bench_movegen(c: &mut Criterion) {
    let startpos = Chess::default();
    let kiwipete = pos_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");

    c.bench_function("movegen_startpos", |b| b.iter(|| startpos.legal_moves().len()));
    c.bench_function("movegen_kiwipete", |b| b.iter(|| kiwipete.legal_moves().len()));
}

criterion_group!(benches, bench_search, bench_movegen);
criterion_main!(benches);
