use crate::best_first::BestFirstSearch;
use crate::cost::Cost;
use crate::frontier::Rank;

/// The ranking for Greedy Best-First Search.
///
/// Orders by the estimate alone; accumulated cost never enters the
/// comparison. Myopic and fast, with no optimality guarantee.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GreedyRank<C: Cost> {
    h: C,
}

impl<C> Rank<C> for GreedyRank<C>
where
    C: Cost,
{
    #[inline(always)]
    fn rank(_g: C, h: C) -> Self {
        Self { h }
    }
}

pub type GreedySearch<St, C> = BestFirstSearch<GreedyRank<C>, St, C>;
