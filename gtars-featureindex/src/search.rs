use gtars_core::models::Feature;

use crate::bisect::{first_above, last_below, walk_forward};
use crate::order::SortOrder;

/// Point and nearest-neighbour queries over a sorted slice of features.
///
/// Implemented for every `[F]` where `F: Feature`, so a `Vec<Region>` (or a slice of
/// any other feature type) can be queried in place. Empty slices never error; they
/// simply find nothing.
///
/// Unless stated otherwise, methods require the slice to be sorted by start
/// (see [`crate::sort_by_start`]). The `*_centered_*` methods require sorting by
/// center. Neither precondition is checked.
pub trait FeatureSearch<F: Feature> {
    /// Index of the last feature with `start < position`, or `None`.
    ///
    /// Holds even when many features share a start: the whole run of equal starts is
    /// skipped, not just the element the bisection happened to hit.
    fn index_before_start(&self, position: f64) -> Option<usize>;

    /// Index of the first feature with `center > position`. Requires center order.
    fn index_center_after(&self, position: f64) -> Option<usize>;

    /// Index of the last feature with `center < position`. Requires center order.
    fn index_center_before(&self, position: f64) -> Option<usize>;

    /// The first feature whose center is greater than `position`. Requires center order.
    fn feature_centered_after(&self, position: f64) -> Option<&F>;

    /// The last feature whose center is less than `position`. Requires center order.
    fn feature_centered_before(&self, position: f64) -> Option<&F>;

    /// *Some* feature whose extent, padded by `buffer` on both sides (inclusive),
    /// contains `position`.
    ///
    /// This is an existence query, not an enumeration. When several features qualify,
    /// which one is returned depends on the bisection path; it is neither guaranteed to
    /// be the leftmost nor the smallest. The same slice and arguments always give the
    /// same answer. Nested features can hide each other from the bisection, so `None`
    /// is only definitive for non-overlapping slices. Use
    /// [`all_features_overlapping`](Self::all_features_overlapping) to enumerate.
    fn feature_overlapping(&self, position: f64, buffer: u64) -> Option<&F>;

    /// Every feature whose extent, widened by `min_width / 2` on each side, contains
    /// `position` (bounds inclusive), in slice order.
    ///
    /// `max_lookback` bounds how far left of `position` a qualifying feature may start,
    /// and should be at least the length of the longest feature.
    fn all_features_overlapping(&self, position: f64, max_lookback: f64, min_width: f64) -> Vec<&F>;

    /// The first feature with `start > position`.
    fn nearest_feature_after(&self, position: f64) -> Option<&F>;

    /// The feature with the greatest `start < position`. Among features sharing that
    /// start the one with the smallest end wins.
    fn nearest_feature_before(&self, position: f64) -> Option<&F>;

    /// A feature containing `position` if there is one; otherwise whichever of
    /// [`nearest_feature_before`](Self::nearest_feature_before) (by its end) and
    /// [`nearest_feature_after`](Self::nearest_feature_after) (by its start) is closer.
    /// On equal distance the feature before wins.
    fn closest_feature(&self, position: f64) -> Option<&F>;
}

impl<F: Feature> FeatureSearch<F> for [F] {
    fn index_before_start(&self, position: f64) -> Option<usize> {
        last_below(self, SortOrder::Start, position)
    }

    fn index_center_after(&self, position: f64) -> Option<usize> {
        first_above(self, SortOrder::Center, position)
    }

    fn index_center_before(&self, position: f64) -> Option<usize> {
        last_below(self, SortOrder::Center, position)
    }

    fn feature_centered_after(&self, position: f64) -> Option<&F> {
        self.index_center_after(position).map(|idx| &self[idx])
    }

    fn feature_centered_before(&self, position: f64) -> Option<&F> {
        self.index_center_before(position).map(|idx| &self[idx])
    }

    fn feature_overlapping(&self, position: f64, buffer: u64) -> Option<&F> {
        let buffer = buffer as f64;
        let mut lo = 0;
        let mut hi = self.len();

        while lo != hi {
            let idx = (lo + hi) / 2;
            let feature = &self[idx];

            if position >= feature.start() as f64 - buffer {
                if position <= feature.end() as f64 + buffer {
                    return Some(feature);
                }
                if idx == lo {
                    return None;
                }
                lo = idx;
            } else {
                hi = idx;
            }
        }

        None
    }

    fn all_features_overlapping(&self, position: f64, max_lookback: f64, min_width: f64) -> Vec<&F> {
        let half_width = min_width / 2.0;
        let lookback = (position - max_lookback).max(0.0);
        let first = self.index_before_start(lookback).unwrap_or(0);

        let mut hits = Vec::new();
        for feature in &self[first..] {
            let start = feature.start() as f64 - half_width;
            // start sorted: nothing further right can contain position
            if start > position {
                break;
            }
            let end = feature.end() as f64 + half_width;
            if position >= start && position <= end {
                hits.push(feature);
            }
        }
        hits
    }

    fn nearest_feature_after(&self, position: f64) -> Option<&F> {
        let from = self.index_before_start(position).map_or(0, |idx| idx + 1);
        walk_forward(self, SortOrder::Start, position, from).map(|idx| &self[idx])
    }

    fn nearest_feature_before(&self, position: f64) -> Option<&F> {
        let idx = self.index_before_start(position)?;
        let mut best = &self[idx];

        for feature in self[..idx].iter().rev() {
            if feature.start() < best.start() {
                break;
            }
            if feature.end() < best.end() {
                best = feature;
            }
        }
        Some(best)
    }

    fn closest_feature(&self, position: f64) -> Option<&F> {
        if let Some(containing) = self.feature_overlapping(position, 0) {
            return Some(containing);
        }

        let before = self.nearest_feature_before(position);
        let after = self.nearest_feature_after(position);

        match (before, after) {
            (Some(b), Some(a)) => {
                let d_before = (position - b.end() as f64).abs();
                let d_after = (a.start() as f64 - position).abs();
                if d_before <= d_after { Some(b) } else { Some(a) }
            }
            (b, a) => b.or(a),
        }
    }
}

/// Predicate selecting features on `chr` that overlap `[start, end]`.
///
/// `start` is exclusive against the feature end and `end` inclusive against the
/// feature start, matching a half-open feature tested against a closed window.
pub fn overlaps<'a, F: Feature>(chr: &'a str, start: u64, end: u64) -> impl Fn(&F) -> bool + 'a {
    move |feature: &F| feature.chr() == chr && feature.start() <= end && feature.end() > start
}

#[cfg(test)]
mod tests {
    use super::*;

    use gtars_core::models::Region;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn regions(coords: &[(u32, u32)]) -> Vec<Region> {
        coords
            .iter()
            .map(|&(start, end)| Region::new("chr1", start, end))
            .collect()
    }

    fn coords(features: &[&Region]) -> Vec<(u32, u32)> {
        features.iter().map(|f| (f.start, f.end)).collect()
    }

    #[fixture]
    fn duplicates() -> Vec<Region> {
        regions(&[
            (0, 5),
            (10, 40),
            (10, 12),
            (10, 25),
            (10, 30),
            (18, 19),
            (30, 35),
            (30, 31),
            (50, 60),
        ])
    }

    #[rstest]
    fn test_index_before_start_is_largest_index(duplicates: Vec<Region>) {
        for p in 0..70 {
            let p = p as f64;
            let expected = duplicates.iter().rposition(|f| (f.start as f64) < p);
            assert_eq!(duplicates.index_before_start(p), expected, "position {}", p);
        }
    }

    #[rstest]
    fn test_index_before_start_edges(duplicates: Vec<Region>) {
        assert_eq!(duplicates.index_before_start(0.0), None);
        assert_eq!(duplicates.index_before_start(50.0), Some(7));
        assert_eq!(duplicates.index_before_start(50.5), Some(8));
        assert_eq!(duplicates.index_before_start(10.0), Some(0));
        assert_eq!(duplicates.index_before_start(10.5), Some(4));

        let empty: Vec<Region> = vec![];
        assert_eq!(empty.index_before_start(10.0), None);
    }

    #[rstest]
    #[case(15.0, Some(1))]
    #[case(20.0, Some(2))]
    #[case(25.0, Some(2))]
    #[case(0.0, Some(0))]
    #[case(100.0, None)]
    fn test_index_center_after(#[case] position: f64, #[case] expected: Option<usize>) {
        // centers 10, 20, 30
        let features = regions(&[(5, 15), (15, 25), (28, 32)]);
        assert_eq!(features.index_center_after(position), expected);
    }

    #[rstest]
    #[case(15.0, Some(0))]
    #[case(20.0, Some(0))]
    #[case(20.5, Some(1))]
    #[case(10.0, None)]
    #[case(100.0, Some(2))]
    fn test_index_center_before(#[case] position: f64, #[case] expected: Option<usize>) {
        let features = regions(&[(5, 15), (15, 25), (28, 32)]);
        assert_eq!(features.index_center_before(position), expected);
    }

    #[rstest]
    fn test_centered_with_equal_centers() {
        // three features centered on 20
        let features = regions(&[(5, 15), (10, 30), (15, 25), (19, 21), (40, 50)]);
        assert_eq!(features.feature_centered_after(20.0).map(|f| f.start), Some(40));
        assert_eq!(features.feature_centered_before(20.0).map(|f| f.start), Some(5));
        assert_eq!(features.feature_centered_before(10.0), None);
        assert_eq!(features.feature_centered_after(45.0), None);
    }

    #[rstest]
    fn test_feature_overlapping() {
        let features = regions(&[(0, 10), (20, 30), (40, 50)]);

        assert_eq!(features.feature_overlapping(25.0, 0).map(|f| f.start), Some(20));
        assert_eq!(features.feature_overlapping(30.0, 0).map(|f| f.start), Some(20));
        assert_eq!(features.feature_overlapping(35.0, 0), None);
        assert_eq!(features.feature_overlapping(36.0, 5).map(|f| f.start), Some(40));
        assert_eq!(features.feature_overlapping(-1.0, 0), None);
        assert_eq!(features.feature_overlapping(-1.0, 2).map(|f| f.start), Some(0));
        assert_eq!(features.feature_overlapping(51.0, 0), None);
    }

    #[rstest]
    fn test_feature_overlapping_is_repeatable(duplicates: Vec<Region>) {
        let first = duplicates.feature_overlapping(11.0, 0).map(|f| (f.start, f.end));
        assert!(first.is_some());
        for _ in 0..5 {
            assert_eq!(duplicates.feature_overlapping(11.0, 0).map(|f| (f.start, f.end)), first);
        }
    }

    #[rstest]
    fn test_feature_overlapping_empty() {
        let empty: Vec<Region> = vec![];
        assert_eq!(empty.feature_overlapping(1.0, 100), None);
    }

    #[rstest]
    fn test_all_features_overlapping() {
        let features = regions(&[(10, 20), (15, 25), (30, 40)]);
        let hits = features.all_features_overlapping(18.0, 100.0, 0.0);
        assert_eq!(coords(&hits), vec![(10, 20), (15, 25)]);
    }

    #[rstest]
    fn test_all_features_overlapping_min_width() {
        let features = regions(&[(10, 11), (30, 31)]);

        assert!(features.all_features_overlapping(14.0, 100.0, 0.0).is_empty());

        // padded to 10bp, [10, 11] becomes [5, 16]
        let hits = features.all_features_overlapping(14.0, 100.0, 10.0);
        assert_eq!(coords(&hits), vec![(10, 11)]);

        let hits = features.all_features_overlapping(25.5, 100.0, 10.0);
        assert_eq!(coords(&hits), vec![(30, 31)]);
    }

    #[rstest]
    fn test_all_features_overlapping_lookback_limits_scan() {
        let features = regions(&[(0, 1000), (100, 200), (900, 950)]);

        let hits = features.all_features_overlapping(920.0, 2000.0, 0.0);
        assert_eq!(coords(&hits), vec![(0, 1000), (900, 950)]);

        // the scan starts at the last feature before 870, skipping the long one
        let hits = features.all_features_overlapping(920.0, 50.0, 0.0);
        assert_eq!(coords(&hits), vec![(900, 950)]);
    }

    #[rstest]
    fn test_nearest_feature_after(duplicates: Vec<Region>) {
        assert_eq!(duplicates.nearest_feature_after(10.0).map(|f| f.start), Some(18));
        assert_eq!(duplicates.nearest_feature_after(9.0).map(|f| (f.start, f.end)), Some((10, 40)));
        assert_eq!(duplicates.nearest_feature_after(30.0).map(|f| f.start), Some(50));
        assert_eq!(duplicates.nearest_feature_after(50.0), None);
        assert_eq!(duplicates.nearest_feature_after(-3.0).map(|f| f.start), Some(0));

        for p in -2..60 {
            let p = p as f64;
            if let Some(f) = duplicates.nearest_feature_after(p) {
                assert!(f.start as f64 > p);
            }
        }
    }

    #[rstest]
    fn test_nearest_feature_before_prefers_smallest(duplicates: Vec<Region>) {
        let f = duplicates.nearest_feature_before(15.0).unwrap();
        assert_eq!((f.start, f.end), (10, 12));

        let f = duplicates.nearest_feature_before(45.0).unwrap();
        assert_eq!((f.start, f.end), (30, 31));

        let f = duplicates.nearest_feature_before(18.5).unwrap();
        assert_eq!((f.start, f.end), (18, 19));

        assert_eq!(duplicates.nearest_feature_before(0.0), None);

        for p in 0..70 {
            let p = p as f64;
            if let Some(f) = duplicates.nearest_feature_before(p) {
                assert!((f.start as f64) < p);
            }
        }
    }

    #[rstest]
    fn test_closest_feature_tie_goes_before() {
        let features = regions(&[(0, 10), (20, 30)]);
        let f = features.closest_feature(15.0).unwrap();
        assert_eq!((f.start, f.end), (0, 10));
    }

    #[rstest]
    #[case(12.0, (0, 10))]
    #[case(18.0, (20, 30))]
    #[case(5.0, (0, 10))]
    #[case(100.0, (20, 30))]
    #[case(-5.0, (0, 10))]
    fn test_closest_feature(#[case] position: f64, #[case] expected: (u32, u32)) {
        let features = regions(&[(0, 10), (20, 30)]);
        let f = features.closest_feature(position).unwrap();
        assert_eq!((f.start, f.end), expected);
    }

    #[rstest]
    fn test_closest_feature_empty() {
        let empty: Vec<Region> = vec![];
        assert_eq!(empty.closest_feature(3.0), None);
    }

    #[rstest]
    fn test_overlaps_predicate() {
        let mut features = regions(&[(0, 10), (20, 30), (40, 50)]);
        features.push(Region::new("chr2", 20, 30));

        let hits: Vec<&Region> = features.iter().filter(|f| overlaps("chr1", 10, 20)(*f)).collect();
        assert_eq!(coords(&hits), vec![(20, 30)]);
    }
}
