//! Integer space allocation shared by the flex box and the grid.
//!
//! Every slot is described by a [`SizeSpec`]: either a fixed size, or a ratio
//! that shares whatever the fixed slots leave over. The result always sums to
//! the available space unless the fixed slots alone exceed it, in which case
//! fixed sizes win and the layout overflows.

use tracing::trace;

/// Sizing rule for one slot along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SizeSpec {
    pub ratio: usize,
    pub fixed: Option<usize>,
}

impl Default for SizeSpec {
    fn default() -> Self {
        SizeSpec::ratio(1)
    }
}

impl SizeSpec {
    /// Proportional slot. A ratio of 0 is treated as 1.
    pub fn ratio(ratio: usize) -> Self {
        SizeSpec {
            ratio: ratio.max(1),
            fixed: None,
        }
    }

    pub fn fixed(size: usize) -> Self {
        SizeSpec {
            ratio: 1,
            fixed: Some(size),
        }
    }

    pub fn with_fixed(mut self, fixed: Option<usize>) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    /// Ratio used for sharing. A literal with `ratio: 0` still counts as 1.
    pub fn weight(&self) -> usize {
        self.ratio.max(1)
    }
}

/// Sum of the fixed sizes in `specs`.
pub fn reserved(specs: &[SizeSpec]) -> usize {
    specs.iter().filter_map(|s| s.fixed).sum()
}

/// Split `total` between `specs`.
///
/// Fixed slots get exactly their size. The rest share
/// `total - reserved` by `floor(remaining * ratio / ratio_sum)`, and the units
/// lost to truncation go one at a time to the earliest proportional slots.
pub fn allocate(total: usize, specs: &[SizeSpec]) -> Vec<usize> {
    let reserved = reserved(specs);
    let remaining = total.saturating_sub(reserved);
    let ratio_sum: usize = specs
        .iter()
        .filter(|s| s.fixed.is_none())
        .map(SizeSpec::weight)
        .sum();

    let mut sizes: Vec<usize> = specs
        .iter()
        .map(|s| match s.fixed {
            Some(n) => n,
            None if ratio_sum == 0 => 0,
            None => share(remaining, s.weight(), ratio_sum),
        })
        .collect();

    if ratio_sum > 0 {
        let handed_out: usize = specs
            .iter()
            .zip(sizes.iter())
            .filter(|(s, _)| s.fixed.is_none())
            .map(|(_, n)| *n)
            .sum();
        let mut leftover = remaining - handed_out;
        for (spec, size) in specs.iter().zip(sizes.iter_mut()) {
            if leftover == 0 {
                break;
            }
            if spec.fixed.is_none() {
                *size += 1;
                leftover -= 1;
            }
        }
    }

    if reserved > total {
        trace!(total, reserved, "fixed sizes exceed available space");
    }
    sizes
}

fn share(remaining: usize, ratio: usize, ratio_sum: usize) -> usize {
    ((remaining as u128 * ratio as u128) / ratio_sum as u128) as usize
}

/// Allocate with per-slot minimums.
///
/// Slots whose proportional share comes out below their minimum are pinned
/// at the minimum and the remainder redistributed among the others, until no
/// proportional slot is under its minimum. `ratios` and `minimums` must have
/// the same length; a missing minimum counts as 0.
pub fn allocate_with_minimums(total: usize, ratios: &[usize], minimums: &[usize]) -> Vec<usize> {
    let min_of = |i: usize| minimums.get(i).copied().unwrap_or(0);
    let mut pinned = vec![false; ratios.len()];
    loop {
        let specs: Vec<SizeSpec> = ratios
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                if pinned[i] {
                    SizeSpec::fixed(min_of(i))
                } else {
                    SizeSpec::ratio(r)
                }
            })
            .collect();
        let sizes = allocate(total, &specs);
        let mut changed = false;
        for (i, &size) in sizes.iter().enumerate() {
            if !pinned[i] && size < min_of(i) {
                pinned[i] = true;
                changed = true;
            }
        }
        if !changed {
            return sizes;
        }
    }
}
