//! Action-selection policies used by the episode runner, validation, and
//! benchmarks.
//!
//! `RandomLegalPolicy` picks uniformly among the rules engine's legal moves.
//! `UniformActionPolicy` samples every action field uniformly from its spec
//! range, so most of its actions are illegal.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::environment::action::Action;
use crate::environment::chess_environment::ChessEnvironment;
use crate::rules::rules_engine::RulesEngine;
use crate::specs::registry::{action_spec, find_spec};

pub trait Policy {
    fn name(&self) -> &str;

    fn choose_action<R: RulesEngine>(&mut self, env: &ChessEnvironment<R>) -> Action;
}

/// Submitted when there is nothing legal to play; the environment resets or
/// rejects it.
const NULL_ACTION: Action = Action {
    from: [1, 1],
    to: [1, 1],
    prom: 0,
};

pub struct RandomLegalPolicy<G: Rng> {
    rng: G,
}

impl<G: Rng> RandomLegalPolicy<G> {
    pub fn new(rng: G) -> Self {
        Self { rng }
    }
}

impl<G: Rng> Policy for RandomLegalPolicy<G> {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action<R: RulesEngine>(&mut self, env: &ChessEnvironment<R>) -> Action {
        let legal_actions = env.legal_actions();
        legal_actions
            .as_slice()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(NULL_ACTION)
    }
}

pub struct UniformActionPolicy<G: Rng> {
    rng: G,
}

impl<G: Rng> UniformActionPolicy<G> {
    pub fn new(rng: G) -> Self {
        Self { rng }
    }

    fn sample_field(&mut self, name: &str, count: usize) -> Vec<i32> {
        match find_spec(action_spec(), name) {
            Some(spec) => (0..count)
                .map(|_| self.rng.random_range(spec.minimum..=spec.maximum))
                .collect(),
            None => vec![0; count],
        }
    }
}

impl<G: Rng> Policy for UniformActionPolicy<G> {
    fn name(&self) -> &str {
        "uniform"
    }

    fn choose_action<R: RulesEngine>(&mut self, _env: &ChessEnvironment<R>) -> Action {
        let from = self.sample_field("from", 2);
        let to = self.sample_field("to", 2);
        let prom = self.sample_field("prom", 1);

        Action::new([from[0], from[1]], [to[0], to[1]], prom[0])
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::environment::config::EnvConfig;
    use crate::specs::validation::check_action;

    fn started_env() -> ChessEnvironment {
        let mut env: ChessEnvironment =
            ChessEnvironment::new(EnvConfig::default()).expect("environment should build");
        env.reset().expect("reset should succeed");
        env
    }

    #[test]
    fn random_legal_policy_only_picks_legal_actions() {
        let mut env = started_env();
        let mut policy = RandomLegalPolicy::new(StdRng::seed_from_u64(3));

        for _ in 0..20 {
            let action = policy.choose_action(&env);
            assert!(env.legal_actions().contains(&action));
            let step = env.step(&action).expect("step should succeed");
            if step.terminal() {
                break;
            }
            assert_ne!(step.reward, -1.0);
        }
    }

    #[test]
    fn seeded_policies_are_reproducible() {
        let env = started_env();
        let mut first = RandomLegalPolicy::new(StdRng::seed_from_u64(9));
        let mut second = RandomLegalPolicy::new(StdRng::seed_from_u64(9));
        assert_eq!(first.choose_action(&env), second.choose_action(&env));

        let mut first = UniformActionPolicy::new(StdRng::seed_from_u64(9));
        let mut second = UniformActionPolicy::new(StdRng::seed_from_u64(9));
        assert_eq!(first.choose_action(&env), second.choose_action(&env));
    }

    #[test]
    fn uniform_actions_stay_inside_the_action_spec() {
        let env = started_env();
        let mut policy = UniformActionPolicy::new(StdRng::seed_from_u64(21));

        for _ in 0..200 {
            assert_eq!(check_action(&policy.choose_action(&env)), Ok(()));
        }
    }

    #[test]
    fn policies_are_named() {
        assert_eq!(RandomLegalPolicy::new(StdRng::seed_from_u64(0)).name(), "random");
        assert_eq!(UniformActionPolicy::new(StdRng::seed_from_u64(0)).name(), "uniform");
    }
}
