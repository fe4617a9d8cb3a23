//! Spatial Prisoner's Dilemma runner
//!
//! Plays the imitation game on a board for a number of rounds and writes the
//! final image, the animation, run statistics and the final board.

use anyhow::{Context, Result};
use clap::Parser;
use dilemma_core::config::{BoardLayout, SimConfig};
use dilemma_core::output::{write_final_board, write_summary, RunSummary};
use dilemma_core::setup::{board_to_text, format_scores, initial_board};
use dilemma_core::{score_board, Board, PayoffParams, Simulation};
use dilemma_render::{write_gif, write_png, BoardRenderer, RenderOptions};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments for the runner
#[derive(Parser, Debug)]
#[command(name = "spatial_dilemma")]
#[command(about = "Spatial Prisoner's Dilemma on a grid of imitating agents")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board file to start from
    #[arg(long, conflicts_with = "random")]
    board: Option<PathBuf>,

    /// Payoff a defector earns against a cooperator
    #[arg(long)]
    b: Option<f64>,

    /// Number of rounds to play
    #[arg(long)]
    rounds: Option<u32>,

    /// Generate a random board of the given size, e.g. 50x80
    #[arg(long, value_name = "ROWSxCOLS", value_parser = parse_dims)]
    random: Option<(usize, usize)>,

    /// Seed for the random board
    #[arg(long)]
    seed: Option<u64>,

    /// Chance that a random cell starts as a defector
    #[arg(long)]
    defector_fraction: Option<f64>,

    /// Directory for output files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Side of one cell in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Skip the animated GIF
    #[arg(long)]
    no_gif: bool,

    /// Print the final board to stdout
    #[arg(long)]
    print_final: bool,

    /// Print the scores the final board earns in one more round
    #[arg(long)]
    print_scores: bool,
}

impl Args {
    /// Applies command line values on top of the configuration.
    fn apply(&self, config: &mut SimConfig) {
        if let Some(path) = &self.board {
            config.board.path = Some(path.clone());
        }
        if let Some((rows, cols)) = self.random {
            config.board.path = None;
            config.board.layout = BoardLayout::Random;
            config.board.random_rows = rows;
            config.board.random_cols = cols;
        }
        if let Some(b) = self.b {
            config.simulation.b = b;
        }
        if let Some(rounds) = self.rounds {
            config.simulation.rounds = rounds;
        }
        if let Some(seed) = self.seed {
            config.board.seed = seed;
        }
        if let Some(fraction) = self.defector_fraction {
            config.board.defector_fraction = fraction;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(cell_size) = self.cell_size {
            config.render.cell_size = cell_size;
        }
        if self.no_gif {
            config.render.write_gif = false;
        }
    }
}

/// Parses `ROWSxCOLS`.
fn parse_dims(text: &str) -> Result<(usize, usize), String> {
    let (rows, cols) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected ROWSxCOLS, got {text:?}"))?;
    let rows: usize = rows
        .trim()
        .parse()
        .map_err(|e| format!("bad row count {rows:?}: {e}"))?;
    let cols: usize = cols
        .trim()
        .parse()
        .map_err(|e| format!("bad column count {cols:?}: {e}"))?;
    if rows == 0 || cols == 0 {
        return Err(format!("board size must be positive, got {rows}x{cols}"));
    }
    Ok((rows, cols))
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    run(&config, args.print_final, args.print_scores)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run(config: &SimConfig, print_final: bool, print_scores: bool) -> Result<()> {
    let board = initial_board(&config.board).context("failed to build initial board")?;

    let params = PayoffParams::new(config.simulation.b)?;
    let renderer = BoardRenderer::new(RenderOptions::from(&config.render))?;

    let mut simulation = Simulation::new(board, params)?;
    simulation.run(config.simulation.rounds)?;

    let out_dir = &config.output.dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let generations = simulation.generations();
    let final_board = simulation.latest();

    let png_path = out_dir.join(format!("{}.png", config.output.name));
    write_png(&renderer, final_board, &png_path)
        .with_context(|| format!("failed to write {}", png_path.display()))?;

    if config.render.write_gif {
        let gif_path = out_dir.join(format!("{}.gif", config.output.name));
        write_gif(&renderer, generations, &gif_path)?;
    }

    if let Some(summary) = RunSummary::from_generations(generations, simulation.params()) {
        let path = write_summary(&summary, out_dir).context("failed to write run statistics")?;
        info!(
            path = %path.display(),
            cooperation = summary.final_cooperation_fraction,
            stable_from = ?summary.stable_from,
            "wrote statistics"
        );
    }

    let path = write_final_board(final_board, out_dir).context("failed to write final board")?;
    info!(path = %path.display(), "wrote final board");

    print!(
        "{}",
        report(final_board, simulation.params(), print_final, print_scores)?
    );

    Ok(())
}

/// Text printed to stdout after a run.
fn report(
    board: &Board,
    params: &PayoffParams,
    print_final: bool,
    print_scores: bool,
) -> Result<String> {
    let mut out = String::new();
    if print_final {
        out.push_str(&board_to_text(board));
    }
    if print_scores {
        let scored = score_board(board, params).context("failed to score final board")?;
        out.push_str(&format_scores(&scored));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dims() {
        assert_eq!(parse_dims("50x80"), Ok((50, 80)));
        assert_eq!(parse_dims("3X4"), Ok((3, 4)));
        assert!(parse_dims("50").is_err());
        assert!(parse_dims("0x5").is_err());
        assert!(parse_dims("ax5").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "spatial_dilemma",
            "--b",
            "1.6",
            "--rounds",
            "7",
            "--random",
            "20x30",
            "--seed",
            "5",
            "--no-gif",
        ]);
        let mut config = SimConfig::default();
        config.board.path = Some(PathBuf::from("board.txt"));
        args.apply(&mut config);

        assert_eq!(config.simulation.b, 1.6);
        assert_eq!(config.simulation.rounds, 7);
        assert_eq!(config.board.layout, BoardLayout::Random);
        assert_eq!((config.board.random_rows, config.board.random_cols), (20, 30));
        assert_eq!(config.board.seed, 5);
        assert_eq!(config.board.path, None);
        assert!(!config.render.write_gif);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::parse_from(["spatial_dilemma"]);
        let mut config = SimConfig::default();
        args.apply(&mut config);
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_report_prints_board_and_scores() {
        let board = "2 2\nCD\nDC\n".parse::<Board>().unwrap();
        let params = PayoffParams::new(0.5).unwrap();

        assert_eq!(report(&board, &params, false, false).unwrap(), "");
        assert_eq!(
            report(&board, &params, true, true).unwrap(),
            "2 2\nCD\nDC\n2.000000 2.000000\n2.000000 2.000000\n"
        );
    }

    #[test]
    fn test_print_scores_flag() {
        let args = Args::parse_from(["spatial_dilemma", "--print-scores"]);
        assert!(args.print_scores);
        assert!(!args.print_final);
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SimConfig::default();
        config.board.random_rows = 9;
        config.board.random_cols = 9;
        config.simulation.rounds = 3;
        config.output.dir = dir.path().to_path_buf();

        run(&config, false, false).unwrap();

        for name in ["Prisoners.png", "Prisoners.gif", "stats.json", "final_board.txt"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }
}
