use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cost::Cost;
use crate::space::State;

/// Out-edges per state. Road networks are sparse, most capitals border
/// fewer than eight neighbours.
pub(crate) type Edges<St, C> = SmallVec<[(St, C); 8]>;

/// Driving-distance adjacency between states.
///
/// Absence of an entry means no outgoing edges from that state. Symmetry is
/// expected of a road network but not enforced.
#[derive(Clone, Debug, Default)]
pub struct Graph<St, C>
where
    St: State,
    C: Cost,
{
    adjacency: FxHashMap<St, Edges<St, C>>,
}

impl<St, C> Graph<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            adjacency: FxHashMap::default(),
        }
    }

    pub fn add_edge(&mut self, source: St, destination: St, distance: C) {
        self.adjacency
            .entry(source)
            .or_default()
            .push((destination, distance));
    }

    /// The outgoing edges of `s`. Empty for unknown or terminal states, no
    /// implicit edge creation.
    #[inline(always)]
    #[must_use]
    pub fn edges(&self, s: &St) -> &[(St, C)] {
        self.adjacency.get(s).map_or(&[], |edges| edges.as_slice())
    }

    /// The driving distance of the edge `source → destination`, if present.
    #[must_use]
    pub fn edge_distance(&self, source: &St, destination: &St) -> Option<C> {
        self.edges(source)
            .iter()
            .find(|(d, _)| d == destination)
            .map(|(_, c)| *c)
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, s: &St) -> bool {
        self.adjacency.contains_key(s)
    }

    /// States with at least one outgoing edge.
    pub fn sources(&self) -> impl Iterator<Item = &St> {
        self.adjacency.keys()
    }

    /// Every state mentioned by the adjacency, as source or destination.
    pub fn states(&self) -> impl Iterator<Item = &St> {
        self.adjacency
            .iter()
            .flat_map(|(s, edges)| std::iter::once(s).chain(edges.iter().map(|(d, _)| d)))
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum()
    }
}

/// Straight-line distance estimates towards the fixed goal state.
///
/// For A*'s optimality these must never overestimate the true remaining
/// cost. That is a caller contract, never verified here.
#[derive(Clone, Debug, Default)]
pub struct HeuristicTable<St, C>
where
    St: State,
    C: Cost,
{
    estimates: FxHashMap<St, C>,
}

impl<St, C> HeuristicTable<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            estimates: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, s: St, estimate: C) {
        self.estimates.insert(s, estimate);
    }

    #[inline(always)]
    #[must_use]
    pub fn h(&self, s: &St) -> Option<C> {
        self.estimates.get(s).copied()
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, s: &St) -> bool {
        self.estimates.contains_key(s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.estimates.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }
}
