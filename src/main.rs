use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use reversi_localization::agent::ai::{time_limit_from_millis, AlphaBetaPlayer, Difficulty};
use reversi_localization::agent::{HumanPlayer, Player};
use reversi_localization::config::{GameConfig, LocalizationConfig, PlayerConfig};
use reversi_localization::game_repr::Color;
use reversi_localization::localization::{render_heatmap, run_trials, Simulation, TrialStats};
use reversi_localization::orchestrator::Orchestrator;

#[derive(Parser, Debug)]
#[command(
    name = "reversi_localization",
    about = "Reversi against alpha-beta search, and HMM robot localization"
)]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Play Reversi on the console
    Reversi {
        /// Colour the human plays (black moves first)
        #[arg(long, value_enum, default_value_t = Side::Black)]
        color: Side,

        /// Computer search depth, 1-5
        #[arg(long, default_value_t = 4)]
        depth: u8,

        /// Per-move time limit in milliseconds, 1-1000000 (default 100 s)
        #[arg(long)]
        time_ms: Option<u64>,

        /// Let the computer play both sides
        #[arg(long, default_value_t = false)]
        auto: bool,
    },
    /// Track a simulated robot with the forward algorithm
    Localize {
        #[arg(long, default_value_t = 8)]
        width: usize,

        #[arg(long, default_value_t = 8)]
        height: usize,

        /// Time steps per trial
        #[arg(long, default_value_t = 100)]
        steps: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Independent trials; more than one runs in parallel and prints totals only
        #[arg(long, default_value_t = 1)]
        trials: usize,

        /// Print a map of cells the robot visited
        #[arg(long, default_value_t = false)]
        heatmap: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    Black,
    White,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Color::Black,
            Side::White => Color::White,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.cmd {
        Cmd::Reversi {
            color,
            depth,
            time_ms,
            auto,
        } => {
            let difficulty = Difficulty::from_depth(depth).context("bad --depth")?;
            let time_limit = time_ms
                .map(time_limit_from_millis)
                .transpose()
                .context("bad --time-ms")?;

            let config = if auto {
                GameConfig::aivai(difficulty, difficulty)
            } else {
                GameConfig::pvai(color.into(), difficulty)
            };
            let config = match time_limit {
                Some(limit) => config.with_time_limit(Some(limit)),
                None => config,
            };
            play_reversi(&config)
        }
        Cmd::Localize {
            width,
            height,
            steps,
            seed,
            trials,
            heatmap,
        } => {
            let config = LocalizationConfig {
                width,
                height,
                steps,
                seed,
                ..LocalizationConfig::default()
            };
            localize(&config, trials, heatmap)
        }
    }
}

fn make_player(config: &GameConfig, color: Color) -> Box<dyn Player> {
    match config.player(color) {
        PlayerConfig::Human => Box::new(HumanPlayer::new(
            io::stdin().lock(),
            io::stdout(),
            "You".to_string(),
        )),
        PlayerConfig::Computer { difficulty } => {
            let player = AlphaBetaPlayer::with_difficulty(difficulty);
            Box::new(player.with_time_limit(config.time_limit))
        }
    }
}

fn play_reversi(config: &GameConfig) -> Result<()> {
    let mut game = Orchestrator::new(
        make_player(config, Color::Black),
        make_player(config, Color::White),
    );

    let watching = config.human_color().is_none();
    loop {
        let color = game.current_turn();
        let Some(mv) = game.play_turn().context("game aborted")? else {
            break;
        };
        // Humans are told about moves by their own player
        if watching {
            println!("{} plays {}", color.name(), mv);
            println!("{}", game.board());
        }
    }

    let summary = game.summary();
    println!("{}", summary.final_board);
    if let Some(color) = summary.resigned {
        println!("{} resigned", color.name());
    }
    println!(
        "Black: {} tiles, White: {} tiles",
        summary.black_tiles, summary.white_tiles
    );
    match summary.result.winner() {
        Some(winner) => println!("{} wins", winner.name()),
        None => println!("Draw"),
    }
    Ok(())
}

fn localize(config: &LocalizationConfig, trials: usize, heatmap: bool) -> Result<()> {
    let grid = config.grid().context("bad grid size")?;

    let stats = if trials <= 1 {
        let rng = StdRng::seed_from_u64(config.seed);
        let mut simulation = Simulation::new(grid, config.sensor, rng);
        for _ in 0..config.steps {
            let record = simulation.step();
            let reading = record
                .reading
                .map_or_else(|| "none".to_string(), |pos| pos.to_string());
            println!(
                "step {:>4}: robot {} reading {:>8} guess {} (p={:.4}) error {}",
                record.step,
                record.actual,
                reading,
                record.guess,
                record.guess_mass,
                record.error()
            );
        }
        simulation.stats().clone()
    } else {
        run_trials(config, trials)?
    };

    print_stats(&stats);
    if heatmap {
        print!("{}", render_heatmap(&stats));
    }
    info!("localization finished after {} steps", stats.steps);
    Ok(())
}

fn print_stats(stats: &TrialStats) {
    println!("steps:            {}", stats.steps);
    println!(
        "filter:           mean error {:.3}, exact {:.1}%",
        stats.mean_error(),
        stats.hit_rate() * 100.0
    );
    println!(
        "random guessing:  mean error {:.3}, exact {:.1}%",
        stats.random_mean_error(),
        stats.random_hit_rate() * 100.0
    );
    println!("missing readings: {}", stats.missing_readings);
}
