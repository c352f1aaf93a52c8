//! Main-axis space distribution.

use smallvec::{SmallVec, smallvec};

use super::Justify;

/// How leftover main-axis space is spent.
///
/// `gaps` has one entry per pair of adjacent items, explicit gap included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GapPlan {
    pub gaps: SmallVec<[usize; 8]>,
    pub leading_pad: usize,
    pub trailing_pad: usize,
}

impl GapPlan {
    /// Edge padding plus every gap.
    #[must_use]
    pub fn total(&self) -> usize {
        self.leading_pad + self.gaps.iter().sum::<usize>() + self.trailing_pad
    }
}

/// Split the space left over by `item_sizes` in a container of
/// `container_size` cells.
///
/// A `container_size` of 0 means the container takes the natural size of
/// its content: there is no leftover and every mode yields the explicit gap
/// between items with no edge padding. Content larger than the container is
/// never shrunk; leftover clamps to 0.
///
/// Remainders from integer division go to the earliest gaps for
/// [`Justify::SpaceBetween`], and to the leading edge, trailing edge, then
/// gaps in order for [`Justify::SpaceEvenly`]. [`Justify::SpaceAround`] drops
/// its remainder, so its plan may total slightly less than the leftover.
#[must_use]
pub fn distribute(item_sizes: &[usize], container_size: usize, justify: Justify, gap: usize) -> GapPlan {
    let count = item_sizes.len();
    if count == 0 {
        return GapPlan::default();
    }

    let slots = count - 1;
    let content = item_sizes.iter().sum::<usize>() + gap * slots;
    let leftover = if container_size == 0 {
        0
    } else {
        if content > container_size {
            log::debug!(
                "flex content overflows container: {content} > {container_size}, leftover clamped to 0"
            );
        }
        container_size.saturating_sub(content)
    };

    let mut gaps: SmallVec<[usize; 8]> = smallvec![gap; slots];

    let (leading_pad, trailing_pad) = match justify {
        Justify::Start => (0, leftover),
        Justify::End => (leftover, 0),
        Justify::Center => {
            let leading = leftover / 2;
            (leading, leftover - leading)
        }
        Justify::SpaceBetween => {
            if slots == 0 {
                (0, leftover)
            } else {
                let per_gap = leftover / slots;
                let remainder = leftover % slots;
                for (i, g) in gaps.iter_mut().enumerate() {
                    *g += per_gap + usize::from(i < remainder);
                }
                (0, 0)
            }
        }
        Justify::SpaceAround => {
            let unit = leftover / (2 * count);
            if slots > 0 {
                let inner = (leftover - 2 * unit) / slots;
                for g in &mut gaps {
                    *g += inner;
                }
            }
            (unit, unit)
        }
        Justify::SpaceEvenly => {
            let slot = leftover / (count + 1);
            let mut remainder = leftover % (count + 1);
            let mut take = || {
                if remainder > 0 {
                    remainder -= 1;
                    slot + 1
                } else {
                    slot
                }
            };
            let leading = take();
            let trailing = take();
            for g in &mut gaps {
                *g += take();
            }
            (leading, trailing)
        }
    };

    GapPlan {
        gaps,
        leading_pad,
        trailing_pad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(gaps: &[usize], leading_pad: usize, trailing_pad: usize) -> GapPlan {
        GapPlan {
            gaps: SmallVec::from_slice(gaps),
            leading_pad,
            trailing_pad,
        }
    }

    #[test]
    fn test_no_items() {
        for justify in Justify::ALL {
            assert_eq!(distribute(&[], 40, justify, 3), GapPlan::default());
        }
    }

    #[test]
    fn test_auto_size_is_explicit_gaps_only() {
        for justify in Justify::ALL {
            assert_eq!(distribute(&[2, 5, 1], 0, justify, 2), plan(&[2, 2], 0, 0));
        }
    }

    #[test]
    fn test_start_end_center() {
        assert_eq!(distribute(&[3, 3], 11, Justify::Start, 1), plan(&[1], 0, 4));
        assert_eq!(distribute(&[3, 3], 11, Justify::End, 1), plan(&[1], 4, 0));
        assert_eq!(distribute(&[3, 3], 12, Justify::Center, 1), plan(&[1], 2, 3));
    }

    #[test]
    fn test_space_between_remainder_goes_first() {
        // leftover 7 over 3 gaps: 3, 2, 2
        assert_eq!(
            distribute(&[1, 1, 1, 1], 11, Justify::SpaceBetween, 0),
            plan(&[3, 2, 2], 0, 0)
        );
    }

    #[test]
    fn test_space_between_single_item_is_start() {
        assert_eq!(distribute(&[4], 10, Justify::SpaceBetween, 0), plan(&[], 0, 6));
    }

    #[test]
    fn test_space_around_truncates() {
        let result = distribute(&[1, 1, 1], 30, Justify::SpaceAround, 0);
        assert_eq!(result, plan(&[9, 9], 4, 4));
        assert_eq!(result.total(), 26);
    }

    #[test]
    fn test_space_around_single_item_is_symmetric() {
        assert_eq!(distribute(&[2], 10, Justify::SpaceAround, 0), plan(&[], 4, 4));
    }

    #[test]
    fn test_space_evenly_remainder_order() {
        // leftover 10 over 4 slots: leading 3, trailing 3, gaps 2, 2
        assert_eq!(
            distribute(&[1, 1, 1], 13, Justify::SpaceEvenly, 0),
            plan(&[2, 2], 3, 3)
        );
        assert_eq!(
            distribute(&[1, 1, 1], 14, Justify::SpaceEvenly, 0),
            plan(&[3, 2], 3, 3)
        );
    }

    #[test]
    fn test_overflow_clamps_to_zero() {
        for justify in Justify::ALL {
            assert_eq!(distribute(&[10, 10], 15, justify, 2), plan(&[2], 0, 0));
        }
    }

    #[test]
    fn test_gap_is_kept_under_space_modes() {
        assert_eq!(
            distribute(&[1, 1], 10, Justify::SpaceBetween, 2),
            plan(&[8], 0, 0)
        );
    }
}
