use std::path::PathBuf;
use std::process::ExitCode;

use anstream::println;
use clap::Parser;
use owo_colors::OwoColorize;
use thiserror::Error;

use capitals::states::StateCode;
use capitals::states::TableError;
use capitals::states::read_driving_distances;
use capitals::states::read_straight_line;
use capitals::problem::Problem;
use capitals::problem::ProblemError;
use capitals::report::Strategy;
use capitals::report::run_trials;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = capitals::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Goal state code
    #[arg()]
    pub goal: StateCode,

    /// Initial state code
    #[arg()]
    pub initial: StateCode,

    /// Driving-distance edges, `Source,Destination,Distance`
    #[arg(short, long, env = "DRIVING_CSV", default_value = "data/driving.csv")]
    pub driving: PathBuf,

    /// Straight-line estimates to the goal, `State,Heuristic`
    #[arg(short, long, env = "STRAIGHTLINE_CSV", default_value = "data/straightline.csv")]
    pub straight_line: PathBuf,

    /// Timed runs per strategy
    #[arg(short, long, default_value_t = 10)]
    pub trials: usize,

    /// Dump engine memory stats per strategy
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Problem(#[from] ProblemError<StateCode>),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn run(args: &Args) -> Result<(), MainError> {
    let graph = read_driving_distances(&args.driving)?;
    let heuristics = read_straight_line(&args.straight_line)?;
    let problem = Problem::new(args.initial, args.goal, graph, heuristics)?;

    println!("Initial state: {}", args.initial.cyan());
    println!("Goal state: {}", args.goal.cyan());
    println!();

    let mut out = std::io::stdout().lock();
    let mut reports = vec![];
    for strategy in Strategy::ALL {
        println!("{}:", strategy.green());
        let report = run_trials(strategy, &problem, args.trials);
        report.write_trials(&mut out)?;
        if args.stats {
            strategy.print_memory_stats(&problem);
            println!();
        }
        reports.push(report);
    }

    println!("{}", "Averages:".green());
    for report in &reports {
        report.write_averages(&mut out)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.color.write_global();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
