use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rush_core::gameplay::hit_window::HitWindows;

mod collision;
mod simulate;

#[derive(Debug, Parser)]
#[command(name = "rush")]
#[command(about = "Judgement and fever simulator for rush charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plays a chart (and optionally a replay) through a judgement session.
    Simulate {
        chart: PathBuf,
        #[arg(short, long)]
        replay: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Clock step in milliseconds.
        #[arg(long, default_value_t = 10.0)]
        step: f64,
        /// Stop time; defaults to one second after the last object ends.
        #[arg(long)]
        end: Option<f64>,
        /// Scrub the clock back to this time once the end is reached.
        #[arg(long, allow_negative_numbers = true)]
        rewind_to: Option<f64>,
    },
    /// Prints the tier an offset (action time minus object time) falls into.
    Classify {
        #[arg(allow_negative_numbers = true)]
        offset: f64,
        #[arg(short, long, value_enum, default_value_t = Archetype::Minion)]
        archetype: Archetype,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Archetype {
    Minion,
    Sawblade,
    Tail,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            chart,
            replay,
            config,
            step,
            end,
            rewind_to,
        } => {
            let chart_decl = rush_runner::load_chart_json_from_path(&chart)?;
            let config = rush_runner::load_config_json_from_path(config.as_deref())?;
            let replay = match replay {
                Some(path) => rush_runner::load_replay_json_from_path(&path)?,
                None => Default::default(),
            };

            let options = simulate::SimulateOptions {
                step_ms: step,
                end_ms: end,
                rewind_to_ms: rewind_to,
            };
            simulate::run_simulation(&chart_decl, &config, &replay, &options)
                .with_context(|| format!("simulation failed: {}", chart.display()))?;
        }
        Command::Classify {
            offset,
            archetype,
            config,
        } => {
            let config = rush_runner::load_config_json_from_path(config.as_deref())?;
            let windows = match archetype {
                Archetype::Minion => HitWindows::from_decls(&config.windows.minion),
                Archetype::Sawblade => HitWindows::from_decls(&config.windows.sawblade),
                Archetype::Tail => HitWindows::from_decls(&config.windows.minion)
                    .map(|w| w.scaled(config.release_window_lenience)),
            }
            .context("invalid hit windows")?;

            println!("{:?}", windows.classify(offset));
        }
    }

    Ok(())
}
