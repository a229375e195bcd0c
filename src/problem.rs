use thiserror::Error;

use crate::cost::Cost;
use crate::graph::Graph;
use crate::graph::HeuristicTable;
use crate::space::State;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProblemError<St: State> {
    /// The state is absent from both the graph and the heuristic table.
    #[error("Unknown state '{0}'.")]
    UnknownState(St),
    /// The graph mentions a state the heuristic table cannot estimate.
    #[error("State '{0}' has no heuristic estimate.")]
    MissingHeuristic(St),
}

/// An immutable search instance: where to start, where to stop, and the
/// graph and heuristic table to do it over.
///
/// Construction validates the configuration so the engine can assume every
/// reachable state has a heuristic estimate.
#[derive(Clone, Debug)]
pub struct Problem<St, C>
where
    St: State,
    C: Cost,
{
    initial: St,
    goal: St,
    graph: Graph<St, C>,
    heuristics: HeuristicTable<St, C>,
}

impl<St, C> Problem<St, C>
where
    St: State,
    C: Cost,
{
    pub fn new(
        initial: St,
        goal: St,
        graph: Graph<St, C>,
        heuristics: HeuristicTable<St, C>,
    ) -> Result<Self, ProblemError<St>> {
        for s in [&initial, &goal] {
            if !graph.contains(s) && !heuristics.contains(s) {
                return Err(ProblemError::UnknownState(*s));
            }
        }
        // Every state the engine may reach needs an estimate.
        for s in graph.states() {
            if !heuristics.contains(s) {
                return Err(ProblemError::MissingHeuristic(*s));
            }
        }
        if !heuristics.contains(&initial) {
            return Err(ProblemError::MissingHeuristic(initial));
        }

        Ok(Self {
            initial,
            goal,
            graph,
            heuristics,
        })
    }

    #[inline(always)]
    #[must_use]
    pub fn initial(&self) -> St {
        self.initial
    }
    #[inline(always)]
    #[must_use]
    pub fn goal(&self) -> St {
        self.goal
    }
    #[inline(always)]
    #[must_use]
    pub fn graph(&self) -> &Graph<St, C> {
        &self.graph
    }

    #[inline(always)]
    #[must_use]
    pub fn is_goal(&self, s: &St) -> bool {
        *s == self.goal
    }

    /// The straight-line estimate for `s`.
    ///
    /// Every state admitted by the engine was validated at construction.
    #[inline(always)]
    #[must_use]
    pub fn h(&self, s: &St) -> C {
        match self.heuristics.h(s) {
            Some(h) => h,
            None => unreachable!("Validated problems estimate every reachable state"),
        }
    }
}
