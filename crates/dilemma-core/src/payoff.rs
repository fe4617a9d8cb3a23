//! Payoff Evaluator
//!
//! The two-level Prisoner's Dilemma payoff used for every pairwise game.

use serde::Serialize;
use tracing::warn;

use crate::board::Strategy;
use crate::error::{SimError, SimResult};

/// Validated game parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayoffParams {
    b: f64,
}

impl PayoffParams {
    /// Creates parameters for a defector's exploitation payoff `b`.
    ///
    /// `b` must be finite. Values `<= 1` are accepted but remove any
    /// temptation to defect, so they are logged.
    pub fn new(b: f64) -> SimResult<Self> {
        if !b.is_finite() {
            return Err(SimError::InvalidPayoff(b));
        }
        if b <= 1.0 {
            warn!(b, "payoff parameter b <= 1, defection is never tempting");
        }
        Ok(Self { b })
    }

    /// Payoff a defector receives against a cooperator.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Plays one game from `own`'s perspective.
    pub fn play(&self, own: Strategy, opponent: Strategy) -> Payoff {
        play(own, opponent, self.b)
    }
}

/// Score increments produced by a single game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Payoff {
    /// Added to the cell that initiated the game
    pub own: f64,
    /// Added to its opponent
    pub opponent: f64,
}

impl Payoff {
    pub const fn new(own: f64, opponent: f64) -> Self {
        Self { own, opponent }
    }
}

/// Evaluates one game between `own` and `opponent`.
///
/// | own \ opponent | C        | D        |
/// |----------------|----------|----------|
/// | C              | (1, 1)   | (0, b)   |
/// | D              | (b, 0)   | (0, 0)   |
pub fn play(own: Strategy, opponent: Strategy, b: f64) -> Payoff {
    match (own, opponent) {
        (Strategy::Cooperate, Strategy::Cooperate) => Payoff::new(1.0, 1.0),
        (Strategy::Cooperate, Strategy::Defect) => Payoff::new(0.0, b),
        (Strategy::Defect, Strategy::Cooperate) => Payoff::new(b, 0.0),
        (Strategy::Defect, Strategy::Defect) => Payoff::new(0.0, 0.0),
    }
}
