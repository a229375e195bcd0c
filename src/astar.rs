use crate::best_first::BestFirstSearch;
use crate::cost::Cost;
use crate::frontier::Rank;

/// The ranking for A*.
///
/// We prefer better f-values, and tie break for lower h.
///
/// Keeping the raw h value around (rather than tie-breaking on higher g)
/// avoids recomputing it later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank<C: Cost> {
    f: C,
    h: C,
}

impl<C> Rank<C> for AStarRank<C>
where
    C: Cost,
{
    #[inline(always)]
    fn rank(g: C, h: C) -> Self {
        Self {
            f: g.saturating_add(&h),
            h,
        }
    }
}

pub type AStarSearch<St, C> = BestFirstSearch<AStarRank<C>, St, C>;
