use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bitris::core::{Piece, Playfield, Session, Spawner};
use bitris::engine::{best_action_sequence, AutoPlay};
use bitris::types::{Direction, Intent, RotateDirection, ShapeKind};

fn bench_tick(c: &mut Criterion) {
    c.bench_function("gravity_tick", |b| {
        let mut session = Session::seeded(12345);
        b.iter(|| {
            if !session.is_running() {
                session = Session::seeded(12345);
            }
            black_box(session.tick_gravity());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Playfield::new();
            // Fill bottom 4 rows
            for row in 16..20 {
                for col in 0..10 {
                    field.occupy(col, row);
                }
            }
            black_box(field.clear_full_rows());
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut spawner = Spawner::seeded(12345, 3, Default::default());

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            black_box(spawner.spawn());
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let field = Playfield::new();
    let mut piece = Piece::new(ShapeKind::T);

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !piece.try_move(&field, Direction::Right) {
                piece.reset();
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let field = Playfield::from_ascii(&["##.#######", "##.#######"]);
    let mut piece = Piece::new(ShapeKind::I);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(piece.rotate(&field, RotateDirection::Clockwise));
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let field = Playfield::from_ascii(&[
        "....##....",
        "#..####.##",
        "##.######.",
        "####.#####",
    ]);

    c.bench_function("search_t_piece", |b| {
        b.iter(|| black_box(best_action_sequence(&field, &Piece::new(ShapeKind::T))))
    });

    c.bench_function("autoplay_100_pieces", |b| {
        b.iter(|| {
            let mut session = Session::seeded(7);
            while session.is_running() && session.pieces_locked() < 100 {
                let intents = session.best_action_sequence();
                session.step(&intents);
            }
            black_box(session.score())
        })
    });
}

fn bench_intent(c: &mut Criterion) {
    c.bench_function("apply_intent", |b| {
        let mut session = Session::seeded(12345);
        b.iter(|| black_box(session.apply_intent(Intent::Rotate)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_spawn,
    bench_try_move,
    bench_rotate,
    bench_search,
    bench_intent
);
criterion_main!(benches);
