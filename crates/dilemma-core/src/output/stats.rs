//! Statistics Output
//!
//! Per-generation strategy counts and a run summary for analysis.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::board::{Board, Strategy};
use crate::payoff::PayoffParams;

/// Statistics file name inside the output directory
pub const STATS_FILE_NAME: &str = "stats.json";

/// Strategy counts for one generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub cooperators: usize,
    pub defectors: usize,
    pub cooperation_fraction: f64,
}

impl GenerationStats {
    pub fn from_board(generation: usize, board: &Board) -> Self {
        Self {
            generation,
            cooperators: board.count(Strategy::Cooperate),
            defectors: board.count(Strategy::Defect),
            cooperation_fraction: board.cooperation_fraction(),
        }
    }
}

/// Overall run statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub rows: usize,
    pub cols: usize,
    pub b: f64,
    pub rounds: usize,
    pub final_cooperation_fraction: f64,
    /// First round after which the board never changed again, if any
    pub stable_from: Option<usize>,
    pub generations: Vec<GenerationStats>,
}

impl RunSummary {
    /// Summarizes a generation sequence. Returns `None` for an empty sequence.
    pub fn from_generations(generations: &[Board], params: &PayoffParams) -> Option<Self> {
        let first = generations.first()?;
        let last = generations.last()?;

        let history: Vec<GenerationStats> = generations
            .iter()
            .enumerate()
            .map(|(i, board)| GenerationStats::from_board(i, board))
            .collect();

        Some(Self {
            rows: first.rows(),
            cols: first.cols(),
            b: params.b(),
            rounds: generations.len() - 1,
            final_cooperation_fraction: last.cooperation_fraction(),
            stable_from: stable_from(generations),
            generations: history,
        })
    }
}

/// Earliest generation index from which every later board is identical.
///
/// Only reported when at least one round confirms it.
fn stable_from(generations: &[Board]) -> Option<usize> {
    let last = generations.last()?;
    let mut start = generations.len() - 1;
    while start > 0 && generations[start - 1] == *last {
        start -= 1;
    }
    (start < generations.len() - 1).then_some(start)
}

/// Write the run summary as pretty JSON into `dir`.
pub fn write_summary(summary: &RunSummary, dir: &Path) -> std::io::Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let path = dir.join(STATS_FILE_NAME);
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Dimensions;
    use crate::engine::Simulation;

    use Strategy::{Cooperate as C, Defect as D};

    #[test]
    fn test_generation_stats() {
        let board = Board::from_rows(vec![vec![C, D, D, D]]).unwrap();
        let stats = GenerationStats::from_board(3, &board);
        assert_eq!(stats.generation, 3);
        assert_eq!(stats.cooperators, 1);
        assert_eq!(stats.defectors, 3);
        assert_eq!(stats.cooperation_fraction, 0.25);
    }

    #[test]
    fn test_summary_of_takeover() {
        let board = Board::from_rows(vec![vec![C, C, C], vec![C, D, C], vec![C, C, C]]).unwrap();
        let params = PayoffParams::new(3.0).unwrap();
        let mut sim = Simulation::new(board, params).unwrap();
        sim.run(3).unwrap();

        let summary = RunSummary::from_generations(sim.generations(), &params).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.rounds, 3);
        assert_eq!(summary.generations.len(), 4);
        assert_eq!(summary.generations[0].defectors, 1);
        assert_eq!(summary.final_cooperation_fraction, 0.0);
        assert_eq!(summary.stable_from, Some(1));
    }

    #[test]
    fn test_summary_without_rounds_is_not_stable() {
        let board = Board::filled(Dimensions::new(2, 2).unwrap(), C);
        let params = PayoffParams::new(2.0).unwrap();
        let summary = RunSummary::from_generations(&[board], &params).unwrap();
        assert_eq!(summary.rounds, 0);
        assert_eq!(summary.stable_from, None);
    }

    #[test]
    fn test_summary_of_nothing() {
        let params = PayoffParams::new(2.0).unwrap();
        assert!(RunSummary::from_generations(&[], &params).is_none());
    }

    #[test]
    fn test_write_summary() {
        let dir = tempfile::tempdir().unwrap();
        let board = Board::filled(Dimensions::new(2, 2).unwrap(), D);
        let params = PayoffParams::new(2.0).unwrap();
        let summary = RunSummary::from_generations(&[board.clone(), board], &params).unwrap();

        let path = write_summary(&summary, &dir.path().join("nested")).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["rounds"], 1);
        assert_eq!(written["stable_from"], 0);
        assert_eq!(written["generations"][1]["defectors"], 4);
    }
}
