use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use herbarium::catalog::{Catalog, Plant, UNASSIGNED};
use herbarium::engine::{Engine, QuizAnswers};
use herbarium::persist::PersistenceMode;

// a synthetic catalog with some spread across the care attributes
fn catalog_with(n: usize) -> Catalog {
    let catalog = Catalog::open(PersistenceMode::InMemory).expect("catalog");
    for i in 0..n {
        let plant = Plant::new(
            UNASSIGNED,
            format!("Genus{i:05} specimen"),
            format!("specimen number {i}"),
            (i % 8) as i32,
            (i % 4) as i32,
            (i % 10) as f64 / 2.0,
            i % 2 == 0,
            i % 3 == 0,
        );
        catalog.upsert_plant(plant).expect("seed");
    }
    catalog
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let catalog = catalog_with(100);
    let engine = Engine::new(&catalog);
    c.bench_function("prefix search 100", |b| {
        b.iter(|| engine.full_plants_by_name(black_box("genus000")))
    });

    let catalog = catalog_with(1_000);
    let engine = Engine::new(&catalog);
    c.bench_function("prefix search 1k", |b| {
        b.iter(|| engine.full_plants_by_name(black_box("genus000")))
    });
    c.bench_function("projected search 1k", |b| {
        b.iter(|| engine.plants_by_name(black_box("genus000")))
    });
    // matches every 120th record exactly
    let exact = QuizAnswers {
        toxicity: true,
        sun: 0,
        air_purifying: true,
        mature_size: 0.0,
        care_difficulty: 0,
    };
    c.bench_function("quiz exact 1k", |b| {
        b.iter(|| engine.plants_by_quiz(black_box(&exact)))
    });
    // matches nothing, so the easy non-toxic fallback engages
    let miss = QuizAnswers {
        toxicity: true,
        sun: 99,
        air_purifying: false,
        mature_size: 42.0,
        care_difficulty: 9,
    };
    c.bench_function("quiz fallback 1k", |b| {
        b.iter(|| engine.plants_by_quiz(black_box(&miss)))
    });

    let catalog = catalog_with(10_000);
    let engine = Engine::new(&catalog);
    c.bench_function("prefix search 10k", |b| {
        b.iter(|| engine.full_plants_by_name(black_box("genus000")))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
