//! Transition records returned by `reset` and `step`.

use serde::Serialize;

use crate::encoding::state_encoder::Observation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepType {
    /// Returned by `reset`.
    First,
    Mid,
    /// The episode ended on this transition.
    Last,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStep {
    pub step_type: StepType,
    pub observation: Observation,
    pub reward: f32,
    pub discount: f32,
}

impl TimeStep {
    pub fn first(observation: Observation) -> Self {
        Self {
            step_type: StepType::First,
            observation,
            reward: 0.0,
            discount: 1.0,
        }
    }

    pub fn transition(observation: Observation, reward: f32) -> Self {
        Self {
            step_type: StepType::Mid,
            observation,
            reward,
            discount: 1.0,
        }
    }

    pub fn termination(observation: Observation, reward: f32) -> Self {
        Self {
            step_type: StepType::Last,
            observation,
            reward,
            discount: 0.0,
        }
    }

    #[inline]
    pub fn terminal(&self) -> bool {
        self.step_type == StepType::Last
    }

    /// `(observation, reward, terminal)`.
    pub fn into_parts(self) -> (Observation, f32, bool) {
        let terminal = self.terminal();
        (self.observation, self.reward, terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::state_encoder::encode;
    use crate::rules::chess_types::STARTING_POSITION_FEN;

    fn start() -> Observation {
        encode(STARTING_POSITION_FEN, 0).expect("startpos should encode")
    }

    #[test]
    fn into_parts_yields_observation_reward_and_terminal_flag() {
        let (observation, reward, terminal) = TimeStep::transition(start(), 0.0).into_parts();
        assert_eq!(observation, start());
        assert_eq!(reward, 0.0);
        assert!(!terminal);

        let (_, reward, terminal) = TimeStep::termination(start(), -1.0).into_parts();
        assert_eq!(reward, -1.0);
        assert!(terminal);

        assert!(!TimeStep::first(start()).into_parts().2);
    }

    #[test]
    fn discount_is_zero_only_on_the_last_step() {
        assert_eq!(TimeStep::first(start()).discount, 1.0);
        assert_eq!(TimeStep::transition(start(), 0.0).discount, 1.0);
        assert_eq!(TimeStep::termination(start(), 1.0).discount, 0.0);
    }
}
