//! Core simulation logic: boards, neighborhoods, payoffs and the round engine.
//!
//! A spatial Prisoner's Dilemma: every agent on a rectangular grid plays its
//! Moore neighbors, then copies the strategy of the best scorer around it.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod neighbors;
pub mod output;
pub mod payoff;
pub mod setup;

pub use board::{Board, BoardBuilder, Cell, Coord, Dimensions, Strategy};
pub use config::{ConfigError, SimConfig};
pub use engine::{evolve_once, imitate, score_board, RoundEngine, Simulation};
pub use error::{SimError, SimResult};
pub use neighbors::{neighbors, Direction, NeighborTable, Neighbors, Placement};
pub use payoff::{play, Payoff, PayoffParams};
pub use setup::LoadError;
