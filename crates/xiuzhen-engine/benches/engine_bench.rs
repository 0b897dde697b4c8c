use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xiuzhen_core::{default_state, EngineConfig};
use xiuzhen_engine::{settle, Command, Engine, SeededRandom, TickMode};

const T: i64 = 1_700_000_000_000;

fn bench_catch_up(c: &mut Criterion) {
    let cfg = EngineConfig::default();
    let state = default_state(T);
    c.bench_function("offline_catch_up_8h", |b| {
        b.iter(|| {
            let now = black_box(T + cfg.catch_up_cap_ms);
            let (s, _) = settle(state.clone(), now, TickMode::Offline, &cfg);
            s
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let mut engine = match Engine::with_random(EngineConfig::default(), SeededRandom::new(42)) {
        Ok(e) => e,
        Err(e) => panic!("bench config rejected: {e}"),
    };
    let mut state = default_state(T);
    state.years_cultivated = 1.0e12;
    state.lingshi = 1.0e12;
    let mut now = T;
    c.bench_function("dispatch_mixed", |b| {
        b.iter(|| {
            now += 5_000;
            for command in [
                Command::Tick,
                Command::Adventure,
                Command::RerollRoot,
                Command::EquipItem {
                    equipment_id: "spirit-ring".into(),
                },
            ] {
                state = engine.apply(std::mem::take(&mut state), command, now);
            }
        })
    });
}

criterion_group!(benches, bench_catch_up, bench_dispatch);
criterion_main!(benches);
