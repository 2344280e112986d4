use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use leitner_core::model::{default_boxes, PersistedCard, SessionState};
use leitner_core::Scheduler;

fn make_state(cards: usize) -> SessionState {
    SessionState {
        current_session: 20,
        cards: (0..cards)
            .map(|i| PersistedCard {
                front: format!("front-{i}"),
                back: format!("back-{i}"),
                level: i % 3,
            })
            .collect(),
    }
}

fn loaded(cards: usize) -> Scheduler {
    let mut scheduler = Scheduler::new(&default_boxes()).unwrap().with_seed(42);
    scheduler.restore(make_state(cards)).unwrap();
    scheduler
}

fn bench_select_due(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_due");

    for cards in [100usize, 1_000, 10_000] {
        group.bench_function(format!("cards={cards}"), |b| {
            b.iter_batched(
                || loaded(cards),
                |mut scheduler| black_box(scheduler.select_due()),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_restore_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("restore_snapshot");
    let state = make_state(10_000);

    group.bench_function("restore", |b| {
        b.iter_batched(
            || state.clone(),
            |state| {
                let mut scheduler = Scheduler::new(&default_boxes()).unwrap();
                scheduler.restore(black_box(state)).unwrap();
                scheduler
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("snapshot", |b| {
        let scheduler = loaded(10_000);
        b.iter(|| black_box(scheduler.snapshot()))
    });

    group.finish();
}

criterion_group!(benches, bench_select_due, bench_restore_snapshot);
criterion_main!(benches);
