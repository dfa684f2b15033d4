use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lynx::environment::chess_environment::ChessEnvironment;
use lynx::environment::config::EnvConfig;
use lynx::environment::policies::{Policy, RandomLegalPolicy, UniformActionPolicy};

const EPISODE_PLIES: u32 = 80;

fn build_env() -> ChessEnvironment {
    let config = EnvConfig {
        self_color: 0,
        max_episode_plies: Some(EPISODE_PLIES),
    };
    ChessEnvironment::new(config).expect("benchmark environment should build")
}

fn run_episode<P: Policy>(env: &mut ChessEnvironment, policy: &mut P) -> u32 {
    env.reset().expect("reset should succeed");
    loop {
        let action = policy.choose_action(env);
        let step = env.step(black_box(&action)).expect("step should succeed");
        if step.terminal() {
            return env.plies();
        }
    }
}

fn bench_env_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("env_step");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    group.throughput(Throughput::Elements(u64::from(EPISODE_PLIES)));
    group.bench_function("random_legal_episode", |b| {
        let mut env = build_env();
        let mut policy = RandomLegalPolicy::new(StdRng::seed_from_u64(1));
        b.iter(|| black_box(run_episode(&mut env, &mut policy)));
    });

    group.throughput(Throughput::Elements(1));
    group.bench_function("uniform_action_episode", |b| {
        let mut env = build_env();
        let mut policy = UniformActionPolicy::new(StdRng::seed_from_u64(1));
        b.iter(|| black_box(run_episode(&mut env, &mut policy)));
    });

    group.finish();
}

criterion_group!(env_step_benches, bench_env_step);
criterion_main!(env_step_benches);
