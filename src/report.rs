use std::time::Duration;

use derive_more::Display;
use hrsw::Stopwatch;
use human_duration::human_duration;
use thousands::Separable;

use crate::astar::AStarSearch;
use crate::best_first::SearchOutcome;
use crate::cost::Cost;
use crate::greedy::GreedySearch;
use crate::problem::Problem;
use crate::space::State;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Strategy {
    #[display("Greedy Best First Search")]
    Greedy,
    #[display("A* Search")]
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Greedy, Strategy::AStar];

    #[must_use]
    pub fn run<St, C>(&self, problem: Problem<St, C>) -> SearchOutcome<St, C>
    where
        St: State,
        C: Cost,
    {
        match self {
            Strategy::Greedy => GreedySearch::run(problem),
            Strategy::AStar => AStarSearch::run(problem),
        }
    }

    /// Re-runs the strategy once and dumps the engine's memory stats.
    pub fn print_memory_stats<St, C>(&self, problem: &Problem<St, C>)
    where
        St: State,
        C: Cost,
    {
        match self {
            Strategy::Greedy => {
                let mut search = GreedySearch::new(problem.clone());
                let _ = search.find_goal();
                search.print_memory_stats();
            }
            Strategy::AStar => {
                let mut search = AStarSearch::new(problem.clone());
                let _ = search.find_goal();
                search.print_memory_stats();
            }
        }
    }
}

/// One timed run of a strategy.
#[derive(Clone, Debug)]
pub struct Trial<St, C>
where
    St: State,
    C: Cost,
{
    pub outcome: SearchOutcome<St, C>,
    pub elapsed: Duration,
}

/// All trials of one strategy over one problem.
#[derive(Clone, Debug)]
pub struct StrategyReport<St, C>
where
    St: State,
    C: Cost,
{
    pub strategy: Strategy,
    pub trials: Vec<Trial<St, C>>,
}

/// Runs `trials` timed, independent searches.
///
/// The problem is immutable, so every trial is the same pure computation;
/// repetition only smooths the wall-clock numbers.
#[must_use]
pub fn run_trials<St, C>(
    strategy: Strategy,
    problem: &Problem<St, C>,
    trials: usize,
) -> StrategyReport<St, C>
where
    St: State,
    C: Cost,
{
    log::info!("Running {trials} trials of {strategy}");

    let trials = (0..trials)
        .map(|_| {
            let mut stopwatch = Stopwatch::new_started();
            let outcome = strategy.run(problem.clone());
            stopwatch.stop();
            Trial {
                outcome,
                elapsed: stopwatch.elapsed(),
            }
        })
        .collect();

    StrategyReport { strategy, trials }
}

impl<St, C> StrategyReport<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn mean_expanded(&self) -> f64 {
        if self.trials.is_empty() {
            return 0.0;
        }
        let total: usize = self.trials.iter().map(|t| t.outcome.expanded).sum();
        total as f64 / self.trials.len() as f64
    }

    #[must_use]
    pub fn mean_elapsed(&self) -> Duration {
        let Ok(count) = u32::try_from(self.trials.len()) else {
            return Duration::ZERO;
        };
        if count == 0 {
            return Duration::ZERO;
        }
        self.trials.iter().map(|t| t.elapsed).sum::<Duration>() / count
    }

    /// Writes the per-trial blocks.
    pub fn write_trials<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        for trial in &self.trials {
            match &trial.outcome.path {
                Some(path) => {
                    write!(out, "Solution: ")?;
                    for (i, s) in path.states.iter().enumerate() {
                        if i > 0 {
                            write!(out, ", ")?;
                        }
                        write!(out, "{s}")?;
                    }
                    writeln!(out)?;
                    writeln!(
                        out,
                        "Number of expanded nodes: {}",
                        trial.outcome.expanded.separate_with_commas()
                    )?;
                    writeln!(out, "Number of stops on a path: {}", path.num_stops())?;
                    writeln!(out, "Execution time: {}", human_duration(&trial.elapsed))?;
                    writeln!(out, "Complete path cost: {}", path.cost)?;
                }
                None => {
                    writeln!(out, "Solution: NO SOLUTION FOUND")?;
                    writeln!(
                        out,
                        "Number of expanded nodes: {}",
                        trial.outcome.expanded.separate_with_commas()
                    )?;
                    writeln!(out, "Number of stops on a path: 0")?;
                    writeln!(out, "Execution time: {}", human_duration(&trial.elapsed))?;
                    writeln!(out, "Complete path cost: 0")?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn write_averages<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "{} - Expanded Nodes: {:.1}",
            self.strategy,
            self.mean_expanded()
        )?;
        writeln!(
            out,
            "{} - Execution Time: {}",
            self.strategy,
            human_duration(&self.mean_elapsed())
        )?;
        Ok(())
    }
}
