//! Round Engine
//!
//! One round is two phases over a frozen board:
//!
//! 1. **Scoring**: every cell plays every neighbor. Both sides of each game
//!    are credited, and since each cell iterates its own neighbors every
//!    adjacent pair plays twice per round.
//! 2. **Imitation**: every cell adopts the strategy of the highest-scoring
//!    cell in its closed neighborhood. The cell itself is the first
//!    candidate and a neighbor only replaces the current best when strictly
//!    greater, so ties keep the earlier candidate.
//!
//! The next generation is built in full from the scored board before it is
//! returned; no cell ever reads partially-updated state.

use tracing::{debug, info};

use crate::board::{Board, Cell, Dimensions, Strategy};
use crate::error::{SimError, SimResult};
use crate::neighbors::NeighborTable;
use crate::payoff::PayoffParams;

/// Evolution rules bound to one board size.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    params: PayoffParams,
    table: NeighborTable,
}

impl RoundEngine {
    /// Creates an engine for boards of the given size.
    ///
    /// Fails with [`SimError::SingleCell`] for a 1x1 board.
    pub fn new(dims: Dimensions, params: PayoffParams) -> SimResult<Self> {
        Ok(Self {
            params,
            table: NeighborTable::new(dims)?,
        })
    }

    pub fn params(&self) -> &PayoffParams {
        &self.params
    }

    pub fn dims(&self) -> Dimensions {
        self.table.dims()
    }

    fn check_dims(&self, board: &Board) -> SimResult<()> {
        let expected = self.table.dims();
        if board.dims() != expected {
            return Err(SimError::DimensionMismatch {
                expected_rows: expected.rows(),
                expected_cols: expected.cols(),
                rows: board.rows(),
                cols: board.cols(),
            });
        }
        Ok(())
    }

    /// Scoring phase. Returns a copy of `board` carrying this round's scores.
    pub fn score(&self, board: &Board) -> SimResult<Board> {
        self.check_dims(board)?;
        let dims = self.table.dims();

        let mut scored = board.with_scores_reset();
        let cells = scored.cells_mut();
        for index in 0..cells.len() {
            let own = cells[index].strategy;
            for &neighbor in self.table.at_index(index) {
                let other = dims.index_of(neighbor)?;
                let payoff = self.params.play(own, cells[other].strategy);
                cells[index].score += payoff.own;
                cells[other].score += payoff.opponent;
            }
        }

        Ok(scored)
    }

    /// Imitation phase. Builds the next generation from a scored board.
    pub fn imitate(&self, scored: &Board) -> SimResult<Board> {
        self.check_dims(scored)?;
        imitate_with(&self.table, scored)
    }

    /// Runs one full round: scoring followed by imitation.
    pub fn evolve(&self, board: &Board) -> SimResult<Board> {
        let scored = self.score(board)?;
        self.imitate(&scored)
    }
}

/// Scores `board` for one round without advancing it.
pub fn score_board(board: &Board, params: &PayoffParams) -> SimResult<Board> {
    RoundEngine::new(board.dims(), *params)?.score(board)
}

/// Applies the imitation rule to an already scored board.
pub fn imitate(scored: &Board) -> SimResult<Board> {
    let table = NeighborTable::new(scored.dims())?;
    imitate_with(&table, scored)
}

/// Each cell takes the strategy of the best-scoring cell in its closed
/// neighborhood. `table` must match the board size.
fn imitate_with(table: &NeighborTable, scored: &Board) -> SimResult<Board> {
    let dims = table.dims();
    let cells = scored.cells();

    let mut next = Vec::with_capacity(cells.len());
    for index in 0..cells.len() {
        let mut best = index;
        for &neighbor in table.at_index(index) {
            let candidate = dims.index_of(neighbor)?;
            if cells[candidate].score > cells[best].score {
                best = candidate;
            }
        }
        next.push(Cell::new(cells[best].strategy));
    }

    Ok(Board::from_cells(dims, next))
}

/// Runs one full round on `board`, returning the next generation.
///
/// The input is left untouched and every score on the result is zero.
pub fn evolve_once(board: &Board, params: &PayoffParams) -> SimResult<Board> {
    RoundEngine::new(board.dims(), *params)?.evolve(board)
}

/// A multi-round run and its recorded generation sequence.
///
/// Index 0 of [`Simulation::generations`] is the initial board; index `i` is
/// the board after `i` rounds.
#[derive(Debug, Clone)]
pub struct Simulation {
    engine: RoundEngine,
    generations: Vec<Board>,
}

impl Simulation {
    /// Starts a run from `initial`. Any scores on it are discarded.
    pub fn new(initial: Board, params: PayoffParams) -> SimResult<Self> {
        let engine = RoundEngine::new(initial.dims(), params)?;
        Ok(Self {
            engine,
            generations: vec![initial.with_scores_reset()],
        })
    }

    pub fn params(&self) -> &PayoffParams {
        self.engine.params()
    }

    /// Number of rounds played so far.
    pub fn round(&self) -> usize {
        self.generations.len() - 1
    }

    /// The most recent generation.
    pub fn latest(&self) -> &Board {
        &self.generations[self.generations.len() - 1]
    }

    pub fn generations(&self) -> &[Board] {
        &self.generations
    }

    pub fn into_generations(self) -> Vec<Board> {
        self.generations
    }

    /// Plays one round and records the resulting generation.
    pub fn step(&mut self) -> SimResult<&Board> {
        let next = self.engine.evolve(self.latest())?;
        debug!(
            round = self.generations.len(),
            cooperators = next.count(Strategy::Cooperate),
            defectors = next.count(Strategy::Defect),
            "round complete"
        );
        self.generations.push(next);
        Ok(self.latest())
    }

    /// Plays `rounds` rounds and returns the whole generation sequence.
    pub fn run(&mut self, rounds: u32) -> SimResult<&[Board]> {
        info!(
            rounds,
            dims = %self.engine.dims(),
            b = self.engine.params().b(),
            "starting simulation"
        );
        self.generations.reserve(rounds as usize);
        for _ in 0..rounds {
            self.step()?;
        }

        let last = self.latest();
        info!(
            generations = self.generations.len(),
            cooperation = last.cooperation_fraction(),
            "simulation finished"
        );
        Ok(&self.generations)
    }
}
