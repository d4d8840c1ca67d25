use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use lifesim::entity::{Archetype, Difficulty, PlayerConfig};
use lifesim::{GameSession, SimulationConfig, StoryletCatalog};

fn fresh_session(catalog: &Arc<StoryletCatalog>) -> GameSession {
    let player = PlayerConfig::new("Bench", Archetype::Analyst, Difficulty::Balanced, true);
    GameSession::new_game(42, player, Arc::clone(catalog), SimulationConfig::default())
        .unwrap()
}

fn bench_step(c: &mut Criterion) {
    let catalog = Arc::new(StoryletCatalog::builtin().unwrap());

    c.bench_function("step_one_day", |b| {
        b.iter_batched(
            || fresh_session(&catalog),
            |mut session| {
                session.step(black_box(24)).unwrap();
                session
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("play_one_year", |b| {
        b.iter_batched(
            || fresh_session(&catalog),
            |mut session| {
                for _ in 0..365 {
                    if let Some(event) = session.current_event() {
                        let choice = event.choices[0].id.to_string();
                        session
                            .choose_option(event.storylet_id.as_str(), &choice, 0)
                            .unwrap();
                    }
                    session.step(24).unwrap();
                }
                session
            },
            BatchSize::SmallInput,
        )
    });

    let session = fresh_session(&catalog);
    c.bench_function("full_snapshot", |b| {
        b.iter(|| black_box(session.full_snapshot()))
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
