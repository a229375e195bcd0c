pub trait Cost:
    Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + core::cmp::Eq
    + PartialOrd
    + Ord
    + std::hash::Hash
    + num_traits::SaturatingAdd
    + num_traits::bounds::UpperBounded
    + num_traits::Zero
    + std::ops::Add<Self, Output = Self>
    + std::ops::AddAssign
{
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != num_traits::bounds::UpperBounded::max_value()
    }
}

/// Driving and straight-line distances, in whole miles.
///
/// Edges in the road network top out at a few thousand miles, so `u32`
/// leaves plenty of headroom for accumulated path costs.
pub type Miles = u32;
impl Cost for Miles {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_value_is_invalid() {
        assert!(!Miles::MAX.valid());
        assert!(0u32.valid());
        assert!(2050u32.valid());
    }
}
