//! Binary search over a sorted slice lands *somewhere* inside a run of equal keys,
//! which is not enough when a query must resolve ties deterministically. Every query
//! in this crate therefore goes through the same two phases: a coarse bisection to an
//! approximate index, then a linear walk to the true boundary. The walk is bounded by
//! the length of the equal-key run, giving `O(log n + k)` overall.

use gtars_core::models::Feature;

use crate::order::SortOrder;

/// Coarse phase: an index at or next to where `position` falls in `features`.
///
/// An exact hit may be any member of a run of features whose key equals `position`.
/// Otherwise this is the insertion point, so `features[i - 1] < position < features[i]`.
#[inline]
pub fn bisect<F: Feature>(features: &[F], order: SortOrder, position: f64) -> usize {
    match features.binary_search_by(|f| order.key(f).total_cmp(&position)) {
        Ok(idx) | Err(idx) => idx,
    }
}

/// Fine phase, backward: starting at `from` (clamped to the last index), walk toward
/// the front until a feature with key `< position` is found.
#[inline]
pub fn walk_back<F: Feature>(
    features: &[F],
    order: SortOrder,
    position: f64,
    from: usize,
) -> Option<usize> {
    let last = features.len().checked_sub(1)?;
    (0..=from.min(last))
        .rev()
        .find(|&idx| order.key(&features[idx]) < position)
}

/// Fine phase, forward: starting at `from`, walk toward the back until a feature with
/// key `> position` is found.
#[inline]
pub fn walk_forward<F: Feature>(
    features: &[F],
    order: SortOrder,
    position: f64,
    from: usize,
) -> Option<usize> {
    (from..features.len()).find(|&idx| order.key(&features[idx]) > position)
}

/// Index of the **last** feature whose key is strictly less than `position`.
///
/// `features` must be sorted by `order`.
pub fn last_below<F: Feature>(features: &[F], order: SortOrder, position: f64) -> Option<usize> {
    let (first, last) = (features.first()?, features.last()?);

    if order.key(last) < position {
        return Some(features.len() - 1);
    }
    if order.key(first) >= position {
        return None;
    }

    let approx = bisect(features, order, position);
    walk_back(features, order, position, approx)
}

/// Index of the **first** feature whose key is strictly greater than `position`.
///
/// `features` must be sorted by `order`.
pub fn first_above<F: Feature>(features: &[F], order: SortOrder, position: f64) -> Option<usize> {
    let (first, last) = (features.first()?, features.last()?);

    if order.key(first) > position {
        return Some(0);
    }
    if order.key(last) <= position {
        return None;
    }

    let approx = bisect(features, order, position);
    walk_forward(features, order, position, approx)
}
