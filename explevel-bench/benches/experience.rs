//! explevel Benchmark Suite
//!
//! Hot paths a game touches every frame or every save:
//!   formula_power_round_trip ......... level → experience → level
//!   store_add_experience_1000 ........ id lookup + gain for 1000 entities
//!   store_progress_1000 .............. progress for 1000 entities
//!   store_save_load_1000 ............. JSON dump and reload of 1000 entities

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use explevel_core::{EntityId, EntityStore, Formula};

fn populated_store(count: i64) -> (EntityStore, Vec<EntityId>) {
    let mut store = EntityStore::new();
    let ids = (0..count)
        .map(|i| {
            let formula = if i % 2 == 0 {
                Formula::Linear
            } else {
                Formula::power_default()
            };
            store
                .spawn(format!("Entity {i}"), i % 50 + 1, formula)
                .expect("spawn")
        })
        .collect();
    (store, ids)
}

/// Benchmark: Power formula round trip.
fn bench_formula(c: &mut Criterion) {
    let formula = Formula::power_default();
    c.bench_function("formula_power_round_trip", |b| {
        b.iter(|| {
            let xp = formula.experience_for_level(black_box(42));
            black_box(formula.level_for_experience(xp));
        });
    });
}

/// Benchmark: Experience gain resolved by id across 1000 entities.
fn bench_add_experience(c: &mut Criterion) {
    let (mut store, ids) = populated_store(1000);
    c.bench_function("store_add_experience_1000", |b| {
        b.iter(|| {
            for id in &ids {
                store.add_experience(black_box(id), black_box(1)).expect("add");
            }
        });
    });
}

/// Benchmark: Progress computation across 1000 entities.
fn bench_progress(c: &mut Criterion) {
    let (store, ids) = populated_store(1000);
    c.bench_function("store_progress_1000", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(store.progress(black_box(id)).expect("progress"));
            }
        });
    });
}

/// Benchmark: Whole-store save and reload.
fn bench_save_load(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("entityDB.json");
    let (mut store, _) = populated_store(1000);

    c.bench_function("store_save_load_1000", |b| {
        b.iter(|| {
            store.save_to_file(&path).expect("save");
            store.load_from_file(&path).expect("load");
        });
    });
}

criterion_group!(
    benches,
    bench_formula,
    bench_add_experience,
    bench_progress,
    bench_save_load,
);
criterion_main!(benches);
