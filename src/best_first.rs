use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::frontier::Frontier;
use crate::frontier::Rank;
use crate::graph::Edges;
use crate::problem::Problem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Path;
use crate::space::State;

/// What a finished run hands back: the reconstructed path, if the goal was
/// reached, and how many nodes the run expanded either way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome<St, C>
where
    St: State,
    C: Cost,
{
    pub path: Option<Path<St, C>>,
    pub expanded: usize,
}

/// A single frontier-driven traversal, parameterized by the rank policy
/// `R` that decides which discovered node to expand next.
///
/// One engine, two strategies: `GreedySearch` ranks by `h` alone and
/// `AStarSearch` by `g + h`. The frontier, reached table, admission rule
/// and path reconstruction are shared.
///
/// Each value is one run: construct, call `find_goal`, read `expanded`.
#[derive(Debug)]
pub struct BestFirstSearch<R, St, C>
where
    R: Rank<C>,
    St: State,
    C: Cost,
{
    /// All the Search Nodes. Naturally forms a Search Tree as each node
    /// keeps a reference to the node it was expanded from.
    search_tree: SearchTree<St, C>,

    /// Discovered-but-not-yet-expanded entries, lowest rank first.
    /// Duplicates allowed; stale entries filtered at pop time.
    open: Frontier<R>,

    /// Best node found so far per state. The `g` recorded for a key only
    /// ever decreases over a run.
    reached: FxHashMap<St, SearchTreeIndex>,

    /// Frontier pops performed, the final goal pop included.
    expanded: usize,

    problem: Problem<St, C>,
}

impl<R, St, C> BestFirstSearch<R, St, C>
where
    R: Rank<C>,
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new(problem: Problem<St, C>) -> Self {
        let mut search = Self {
            search_tree: SearchTree::<St, C>::new(),
            open: Frontier::new(),
            reached: FxHashMap::default(),
            expanded: 0,
            problem,
        };

        let initial = search.problem.initial();
        let g = C::zero();
        let h = search.problem.h(&initial);
        let root = search
            .search_tree
            .push(SearchTreeNode::new(initial, None, g));
        search.reached.insert(initial, root);
        search.open.push(R::rank(g, h), root);

        search
    }

    /// Runs the traversal to the first goal pop, or to frontier
    /// exhaustion.
    ///
    /// `None` is a normal outcome (the goal is unreachable), not an error.
    #[must_use]
    pub fn find_goal(&mut self) -> Option<Path<St, C>> {
        while let Some(node_index) = self.open.pop() {
            // Every pop counts as an expansion, the final goal pop too.
            self.expanded += 1;

            let state = *self.search_tree[node_index].state();

            // A cheaper node for this state was admitted after this entry
            // was pushed. The cheaper entry is still queued; this one is
            // stale.
            if self.reached.get(&state) != Some(&node_index) {
                continue;
            }

            if self.problem.is_goal(&state) {
                return Some(self.search_tree.path(node_index));
            }

            // Expand. A dead end contributes zero children and the loop
            // moves on.
            let g = self.search_tree[node_index].g();
            let edges: Edges<St, C> = self.problem.graph().edges(&state).iter().copied().collect();
            for (neighbour, distance) in edges {
                let child_g = g.saturating_add(&distance);

                // Admit iff unseen or STRICTLY cheaper than the best known
                // route. Both strategies share this rule; it is what lets
                // an early suboptimal discovery be corrected later.
                let admit = match self.reached.get(&neighbour) {
                    None => true,
                    Some(&best) => child_g < self.search_tree[best].g(),
                };
                if !admit {
                    continue;
                }

                let h = self.problem.h(&neighbour);
                let child = self.search_tree.push(SearchTreeNode::new(
                    neighbour,
                    Some(node_index),
                    child_g,
                ));
                self.reached.insert(neighbour, child);
                self.open.push(R::rank(child_g, h), child);
            }

            self.verify_reached();
        }

        None
    }

    /// One-shot run over `problem`.
    #[must_use]
    pub fn run(problem: Problem<St, C>) -> SearchOutcome<St, C> {
        let mut search = Self::new(problem);
        let path = search.find_goal();
        SearchOutcome {
            path,
            expanded: search.expanded(),
        }
    }

    /// Frontier pops performed so far.
    #[inline(always)]
    #[must_use]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    #[inline(always)]
    #[must_use]
    pub fn problem(&self) -> &Problem<St, C> {
        &self.problem
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_reached(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_reached(&self) {
        // Every reached entry,
        for (s, index) in &self.reached {
            let node = &self.search_tree[*index];
            // - Points at a node for its own state.
            debug_assert_eq!(node.state(), s);
            // - Holds a cost a real run can produce.
            debug_assert!(node.g().valid());
        }
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "BestFirstSearch Stats:")?;
        let s = size_of::<SearchTreeNode<St, C>>();
        let l = self.search_tree.len();
        writeln!(
            out,
            "  - |Nodes|:    {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;

        let l = self.open.len();
        writeln!(out, "  - |Open|:     {}", l.separate_with_commas())?;

        let s = size_of::<(St, SearchTreeIndex)>();
        let l = self.reached.len();
        writeln!(
            out,
            "  - |Reached|:  {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;

        writeln!(
            out,
            "  - Expanded nodes: {}",
            self.expanded.separate_with_commas()
        )?;

        Ok(())
    }
    pub fn print_memory_stats(&self) {
        self.write_memory_stats(std::io::stdout().lock()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::StateCode;
    use crate::cost::Miles;
    use crate::graph::Graph;
    use crate::graph::HeuristicTable;

    /// Ranks by accumulated cost alone, ignoring the estimate. Exercises
    /// the engine without committing to either shipped strategy.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct UniformRank(Miles);
    impl Rank<Miles> for UniformRank {
        fn rank(g: Miles, _h: Miles) -> Self {
            Self(g)
        }
    }

    type UniformSearch = BestFirstSearch<UniformRank, StateCode, Miles>;

    fn code(s: &str) -> StateCode {
        s.parse().unwrap()
    }

    fn diamond() -> Problem<StateCode, Miles> {
        // Two routes IL→MO: direct (400) and via IN (150 + 200).
        let mut graph = Graph::new();
        graph.add_edge(code("IL"), code("MO"), 400);
        graph.add_edge(code("IL"), code("IN"), 150);
        graph.add_edge(code("IN"), code("MO"), 200);
        let mut heuristics = HeuristicTable::new();
        for (s, h) in [("IL", 300), ("IN", 200), ("MO", 0)] {
            heuristics.insert(code(s), h);
        }
        Problem::new(code("IL"), code("MO"), graph, heuristics).unwrap()
    }

    #[test]
    fn initial_equals_goal() {
        let mut graph = Graph::new();
        graph.add_edge(code("IL"), code("IN"), 150);
        let mut heuristics = HeuristicTable::new();
        heuristics.insert(code("IL"), 0);
        heuristics.insert(code("IN"), 100);
        let problem = Problem::new(code("IL"), code("IL"), graph, heuristics).unwrap();

        let outcome = UniformSearch::run(problem);
        let path = outcome.path.unwrap();
        assert_eq!(path.states, vec![code("IL")]);
        assert_eq!(path.cost, 0);
        assert_eq!(outcome.expanded, 1);
    }

    #[test]
    fn unreachable_goal_exhausts_frontier() {
        let mut graph = Graph::new();
        graph.add_edge(code("IL"), code("IN"), 150);
        let mut heuristics = HeuristicTable::new();
        heuristics.insert(code("IL"), 2000);
        heuristics.insert(code("IN"), 1900);
        heuristics.insert(code("CA"), 0);
        let problem = Problem::new(code("IL"), code("CA"), graph, heuristics).unwrap();

        let outcome = UniformSearch::run(problem);
        assert!(outcome.path.is_none());
        assert!(outcome.expanded >= 1);
    }

    #[test]
    fn cheaper_rediscovery_supersedes() {
        let outcome = UniformSearch::run(diamond());
        let path = outcome.path.unwrap();
        assert_eq!(path.states, vec![code("IL"), code("IN"), code("MO")]);
        assert_eq!(path.cost, 350);
    }

    #[test]
    fn dead_end_is_not_fatal() {
        // NV has no outgoing edges and is not the goal.
        let mut graph = Graph::new();
        graph.add_edge(code("IL"), code("NV"), 100);
        graph.add_edge(code("IL"), code("MO"), 400);
        let mut heuristics = HeuristicTable::new();
        for (s, h) in [("IL", 300), ("NV", 50), ("MO", 0)] {
            heuristics.insert(code(s), h);
        }
        let problem = Problem::new(code("IL"), code("MO"), graph, heuristics).unwrap();

        let outcome = UniformSearch::run(problem);
        let path = outcome.path.unwrap();
        assert_eq!(path.states, vec![code("IL"), code("MO")]);
        assert_eq!(path.cost, 400);
    }

    #[test]
    fn expansion_counts_every_pop() {
        let mut search = UniformSearch::new(diamond());
        let path = search.find_goal();
        assert!(path.is_some());
        // Pops: IL, IN, MO(cheap). The stale MO(400) entry ranks behind
        // the goal pop and stays queued.
        assert_eq!(search.expanded(), 3);
    }

    #[test]
    fn runs_are_idempotent() {
        let a = UniformSearch::run(diamond());
        let b = UniformSearch::run(diamond());
        assert_eq!(a, b);
    }
}
