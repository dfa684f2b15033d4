//! Episodic chess environment.
//!
//! Owns one live game behind a `RulesEngine`, applies one ply per `step`, and
//! turns every resulting position into a structured observation. Rejected
//! actions never escape as errors: they end the episode with a penalty.
//!
//! Lifecycle:
//! - `Initial`: constructed, never stepped or reset.
//! - `Active`: game in progress.
//! - `Terminated`: the game ended, an illegal action was submitted, or the
//!   episode hit its ply limit. The next `step` resets.

use log::{debug, info, warn};

use crate::encoding::state_encoder::{encode, Observation};
use crate::environment::action::Action;
use crate::environment::config::EnvConfig;
use crate::environment::time_step::TimeStep;
use crate::errors::{EnvResult, IllegalActionError};
use crate::rules::chess_types::{Color, GameResult, STARTING_POSITION_FEN};
use crate::rules::game::Game;
use crate::rules::rules_engine::RulesEngine;
use crate::specs::array_spec::ArraySpec;
use crate::specs::registry::{action_spec, observation_spec};
use crate::specs::validation::check_action;

/// Reward for an action the rules engine rejects, whoever's turn it was.
pub const ILLEGAL_ACTION_PENALTY: f32 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeState {
    Initial,
    Active,
    Terminated,
}

#[derive(Debug, Clone)]
pub struct ChessEnvironment<R: RulesEngine = Game> {
    config: EnvConfig,
    game: R,
    observation: Observation,
    state: EpisodeState,
    plies: u32,
}

impl<R: RulesEngine> ChessEnvironment<R> {
    /// Environment at the canonical starting position.
    pub fn new(config: EnvConfig) -> EnvResult<Self> {
        Self::with_position(config, STARTING_POSITION_FEN)
    }

    /// Environment whose first episode starts from `record`. Later resets
    /// still return to the canonical starting position.
    pub fn with_position(config: EnvConfig, record: &str) -> EnvResult<Self> {
        config.validate()?;
        let game = R::new_game(record)?;
        let observation = encode(&game.current_record(), config.self_color)?;

        Ok(Self {
            config,
            game,
            observation,
            state: EpisodeState::Initial,
            plies: 0,
        })
    }

    pub fn reset(&mut self) -> EnvResult<TimeStep> {
        let game = R::new_game(STARTING_POSITION_FEN)?;
        let observation = encode(&game.current_record(), self.config.self_color)?;

        self.game = game;
        self.observation = observation.clone();
        self.state = EpisodeState::Active;
        self.plies = 0;

        debug!("reset to {STARTING_POSITION_FEN}");
        Ok(TimeStep::first(observation))
    }

    pub fn step(&mut self, action: &Action) -> EnvResult<TimeStep> {
        if self.state == EpisodeState::Terminated || self.game.is_game_over() {
            debug!("step after episode end, resetting");
            return self.reset();
        }
        self.state = EpisodeState::Active;

        if let Err(rejected) = self.try_play(action) {
            warn!("illegal action {action:?}: {rejected}");
            self.state = EpisodeState::Terminated;
            return Ok(TimeStep::termination(self.observation.clone(), ILLEGAL_ACTION_PENALTY));
        }

        self.plies += 1;
        let observation = encode(&self.game.current_record(), self.config.self_color)?;
        self.observation = observation.clone();

        if let Some(result) = self.game.result() {
            let reward = self.reward_for(result);
            info!(
                "episode over after {} plies: {result:?}, reward {reward}",
                self.plies
            );
            self.state = EpisodeState::Terminated;
            return Ok(TimeStep::termination(observation, reward));
        }

        if self.config.max_episode_plies.is_some_and(|limit| self.plies >= limit) {
            info!("episode truncated after {} plies", self.plies);
            self.state = EpisodeState::Terminated;
            return Ok(TimeStep::termination(observation, 0.0));
        }

        debug!("ply {}: {}", self.plies, self.game.current_record());
        Ok(TimeStep::transition(observation, 0.0))
    }

    pub fn observation_spec(&self) -> &'static [ArraySpec] {
        observation_spec()
    }

    pub fn action_spec(&self) -> &'static [ArraySpec] {
        action_spec()
    }

    #[inline]
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[inline]
    pub fn current_observation(&self) -> &Observation {
        &self.observation
    }

    #[inline]
    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn record(&self) -> String {
        self.game.current_record()
    }

    /// The rules engine's legal moves, expressed as actions.
    pub fn legal_actions(&self) -> Vec<Action> {
        let mover = self.side_to_move();
        self.game
            .legal_moves()
            .iter()
            .map(|mv| Action::from_move_squares(self.game.move_squares(mv), mover))
            .collect()
    }

    fn side_to_move(&self) -> Color {
        if self.observation.color == 0 {
            Color::Light
        } else {
            Color::Dark
        }
    }

    fn try_play(&mut self, action: &Action) -> Result<(), IllegalActionError> {
        check_action(action).map_err(|violation| IllegalActionError::OutOfSpec(violation.to_string()))?;

        let text = action.to_move_text()?;
        if !action.promotion_signed_for(self.side_to_move()) {
            return Err(IllegalActionError::Illegal(text));
        }
        let mv = self.game.parse_move(&text)?;
        self.game.apply_move(mv)?;

        debug!("played {text}");
        Ok(())
    }

    /// +1 when the result favors this environment's color, -1 when it
    /// favors the opponent, 0 for a draw.
    fn reward_for(&self, result: GameResult) -> f32 {
        let color_factor = if self.config.self_color == 0 { 1 } else { -1 };
        (color_factor * result.first_player_score()) as f32
    }
}
