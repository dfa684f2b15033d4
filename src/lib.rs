//! Crate root module declarations for the Lynx chess environment.
//!
//! Exposes the bundled rules engine, the position-record codec and
//! observation encoder, the observation/action spec registry, the episodic
//! environment with its policies, and a position tree for search tooling.

pub mod errors;

pub mod rules {
    pub mod algebraic;
    pub mod attacks;
    pub mod chess_types;
    pub mod fen;
    pub mod game;
    pub mod long_algebraic;
    pub mod move_apply;
    pub mod move_generation;
    pub mod position;
    pub mod rules_engine;
}

pub mod encoding {
    pub mod board_codec;
    pub mod lookup_tables;
    pub mod position_decomposer;
    pub mod state_encoder;
}

pub mod specs {
    pub mod array_spec;
    pub mod registry;
    pub mod validation;
}

pub mod environment {
    pub mod action;
    pub mod chess_environment;
    pub mod config;
    pub mod policies;
    pub mod time_step;
}

pub mod search {
    pub mod position_tree;
}

pub mod utils {
    pub mod render_observation;
}
