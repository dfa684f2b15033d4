//! Conformance checks against the spec registry.
//!
//! `check_observation` / `check_action` compare one value with its declared
//! shape and range. `validate_environment` drives a whole environment with
//! actions sampled from the action spec and checks every transition it
//! returns, the same way an agent framework would before training on it.

use rand::Rng;
use thiserror::Error;

use crate::encoding::state_encoder::Observation;
use crate::environment::action::Action;
use crate::environment::chess_environment::ChessEnvironment;
use crate::environment::policies::{Policy, UniformActionPolicy};
use crate::environment::time_step::{StepType, TimeStep};
use crate::errors::EnvError;
use crate::rules::rules_engine::RulesEngine;
use crate::specs::array_spec::ArraySpec;
use crate::specs::registry::{action_spec, observation_spec};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecViolation {
    #[error("field '{0}' is missing")]
    MissingField(&'static str),

    #[error("field '{field}' has {actual} elements, expected {expected}")]
    Shape {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("field '{field}' value {value} is outside [{minimum}, {maximum}]")]
    OutOfRange {
        field: &'static str,
        value: i32,
        minimum: i32,
        maximum: i32,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Spec(#[from] SpecViolation),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("transition contract broken: {0}")]
    Contract(String),
}

/// Totals gathered while validating an environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub episodes: usize,
    pub steps: usize,
    pub illegal_terminations: usize,
}

pub fn check_values(
    specs: &[ArraySpec],
    values: &[(&'static str, Vec<i32>)],
) -> Result<(), SpecViolation> {
    for spec in specs {
        let (_, field_values) = values
            .iter()
            .find(|(name, _)| *name == spec.name)
            .ok_or(SpecViolation::MissingField(spec.name))?;

        if field_values.len() != spec.element_count() {
            return Err(SpecViolation::Shape {
                field: spec.name,
                expected: spec.element_count(),
                actual: field_values.len(),
            });
        }

        if let Some(&value) = field_values.iter().find(|&&value| !spec.contains(value)) {
            return Err(SpecViolation::OutOfRange {
                field: spec.name,
                value,
                minimum: spec.minimum,
                maximum: spec.maximum,
            });
        }
    }

    Ok(())
}

pub fn check_observation(observation: &Observation) -> Result<(), SpecViolation> {
    check_values(observation_spec(), &observation.field_values())
}

pub fn check_action(action: &Action) -> Result<(), SpecViolation> {
    check_values(action_spec(), &action.field_values())
}

/// Run `episodes` episodes with actions sampled uniformly from the action
/// spec and check every transition.
pub fn validate_environment<R: RulesEngine, G: Rng>(
    env: &mut ChessEnvironment<R>,
    episodes: usize,
    rng: G,
) -> Result<ValidationReport, ValidationError> {
    let mut policy = UniformActionPolicy::new(rng);
    validate_with_policy(env, &mut policy, episodes)
}

pub fn validate_with_policy<R: RulesEngine, P: Policy>(
    env: &mut ChessEnvironment<R>,
    policy: &mut P,
    episodes: usize,
) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::default();

    for _ in 0..episodes {
        let first = env.reset()?;
        if first.step_type != StepType::First {
            return Err(ValidationError::Contract("reset did not return a first step".to_owned()));
        }
        check_time_step(&first)?;

        loop {
            let action = policy.choose_action(env);
            let legal = env.legal_actions().contains(&action);
            let step = env.step(&action)?;
            check_time_step(&step)?;
            report.steps += 1;

            if step.step_type == StepType::First {
                return Err(ValidationError::Contract(
                    "step inside an episode returned a first step".to_owned(),
                ));
            }
            if !legal && !step.terminal() {
                return Err(ValidationError::Contract(format!(
                    "illegal action {action:?} did not end the episode"
                )));
            }
            if step.terminal() {
                if !legal {
                    report.illegal_terminations += 1;
                }
                break;
            }
        }

        report.episodes += 1;
    }

    Ok(report)
}

fn check_time_step(step: &TimeStep) -> Result<(), ValidationError> {
    check_observation(&step.observation)?;

    if !step.reward.is_finite() || !(-1.0..=1.0).contains(&step.reward) {
        return Err(ValidationError::Contract(format!("reward {} out of range", step.reward)));
    }
    let expected_discount = if step.terminal() { 0.0 } else { 1.0 };
    if step.discount != expected_discount {
        return Err(ValidationError::Contract(format!(
            "discount {} on {:?} step",
            step.discount, step.step_type
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::encoding::state_encoder::encode;
    use crate::environment::config::EnvConfig;
    use crate::environment::policies::RandomLegalPolicy;
    use crate::rules::chess_types::STARTING_POSITION_FEN;

    #[test]
    fn starting_observation_conforms() {
        let observation = encode(STARTING_POSITION_FEN, 0).expect("startpos should encode");
        assert_eq!(check_observation(&observation), Ok(()));
    }

    #[test]
    fn out_of_range_observation_is_reported() {
        let mut observation = encode(STARTING_POSITION_FEN, 0).expect("startpos should encode");
        observation.board[3][3] = 7;
        assert_eq!(
            check_observation(&observation),
            Err(SpecViolation::OutOfRange {
                field: "board",
                value: 7,
                minimum: -6,
                maximum: 6
            })
        );

        observation.board[3][3] = 0;
        observation.color = 2;
        assert!(matches!(
            check_observation(&observation),
            Err(SpecViolation::OutOfRange { field: "color", .. })
        ));
    }

    #[test]
    fn actions_are_checked_against_the_action_spec() {
        assert_eq!(check_action(&Action::new([5, 2], [5, 4], 0)), Ok(()));
        assert!(matches!(
            check_action(&Action::new([5, 0], [5, 4], 0)),
            Err(SpecViolation::OutOfRange { field: "from", value: 0, .. })
        ));
        assert!(matches!(
            check_action(&Action::new([5, 2], [5, 4], -7)),
            Err(SpecViolation::OutOfRange { field: "prom", .. })
        ));
    }

    #[test]
    fn missing_and_misshapen_fields_are_reported() {
        let values = vec![("from", vec![1, 1]), ("to", vec![1])];
        assert_eq!(
            check_values(action_spec(), &values),
            Err(SpecViolation::Shape {
                field: "to",
                expected: 2,
                actual: 1
            })
        );

        let values = vec![("from", vec![1, 1]), ("to", vec![1, 2])];
        assert_eq!(
            check_values(action_spec(), &values),
            Err(SpecViolation::MissingField("prom"))
        );
    }

    #[test]
    fn environment_passes_validation_with_uniform_actions() {
        let mut env: ChessEnvironment =
            ChessEnvironment::new(EnvConfig::default()).expect("environment should build");
        let report = validate_environment(&mut env, 10, StdRng::seed_from_u64(7))
            .expect("environment should validate");

        assert_eq!(report.episodes, 10);
        assert!(report.steps >= 10);
    }

    #[test]
    fn environment_passes_validation_with_random_legal_play() {
        let config = EnvConfig {
            self_color: 1,
            max_episode_plies: Some(60),
        };
        let mut env: ChessEnvironment = ChessEnvironment::new(config).expect("environment should build");
        let mut policy = RandomLegalPolicy::new(StdRng::seed_from_u64(11));
        let report = validate_with_policy(&mut env, &mut policy, 3).expect("environment should validate");

        assert_eq!(report.episodes, 3);
        assert_eq!(report.illegal_terminations, 0);
    }
}
