use nonmax::NonMaxUsize;

use crate::cost::Cost;
use crate::space::Path;
use crate::space::State;

/// A reference to a `SearchTreeNode` within its `SearchTree`.
///
/// `NonMaxUsize` keeps `Option<SearchTreeIndex>` pointer-sized, which pays
/// off across the parent links and the reached table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchTreeIndex(NonMaxUsize);

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self(NonMaxUsize::new(index).unwrap())
    }

    #[inline(always)]
    #[must_use]
    pub(crate) fn get(&self) -> usize {
        self.0.get()
    }
}

/// An immutable record of reaching `state` with accumulated cost `g`,
/// linked to the node it was expanded from.
///
/// Nodes are never mutated after creation. Finding a cheaper route to a
/// state creates a fresh node and leaves the old one unreferenced.
#[derive(Copy, Clone, Debug)]
pub struct SearchTreeNode<St, C>
where
    St: State,
    C: Cost,
{
    pub(crate) parent: Option<SearchTreeIndex>,
    pub(crate) state: St,
    pub(crate) g: C,
}

impl<St, C> SearchTreeNode<St, C>
where
    St: State,
    C: Cost,
{
    pub fn new(s: St, parent: Option<SearchTreeIndex>, g: C) -> Self {
        Self {
            parent,
            state: s,
            g,
        }
    }

    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }
    #[inline(always)]
    pub fn g(&self) -> C {
        self.g
    }
}

/// All the Search Nodes. Naturally forms a Search Tree as each node may
/// have a parent Node.
///
/// Grow-only; superseded nodes stay allocated but unreferenced.
pub(crate) struct SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, C>>,
}

impl<St, C> SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { nodes: vec![] }
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, node: SearchTreeNode<St, C>) -> SearchTreeIndex {
        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Reconstructs the start→end path ending at `node_index` by walking
    /// parent references to the root.
    ///
    /// The returned path begins at the root's state, ends at the terminal
    /// node's state, and costs the terminal node's `g`.
    #[must_use]
    pub fn path(&self, node_index: SearchTreeIndex) -> Path<St, C> {
        let cost = self[node_index].g;

        let mut states = vec![];
        let mut cursor = Some(node_index);
        while let Some(index) = cursor {
            states.push(self[index].state);
            let parent = self[index].parent;
            debug_assert!(parent != Some(index), "A node can't be its own parent");
            cursor = parent;
        }
        states.reverse();

        let path = Path { states, cost };
        debug_assert!(path.seems_valid());
        path
    }
}

impl<St, C> Default for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    type Output = SearchTreeNode<St, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.get()]
    }
}

impl<St, C> std::fmt::Debug for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}
