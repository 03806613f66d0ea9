use gtars_core::models::Feature;

/// The ordering a sorted feature slice satisfies.
///
/// Queries take this explicitly instead of relying on an `Ord` impl, because the same
/// features are sorted by start for most lookups and by center for others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending by start.
    Start,
    /// Ascending by `(start + end) / 2`.
    Center,
}

impl SortOrder {
    /// The sort key of `feature` under this order.
    #[inline]
    pub fn key<F: Feature>(&self, feature: &F) -> f64 {
        match self {
            SortOrder::Start => feature.start() as f64,
            SortOrder::Center => feature.center(),
        }
    }
}

/// Stable sort of `features` by `order`. Features with equal keys keep their relative
/// order.
pub fn sort_features<F: Feature>(features: &mut [F], order: SortOrder) {
    match order {
        SortOrder::Start => features.sort_by_key(|f| f.start()),
        // start + end orders identically to the center and stays integral
        SortOrder::Center => features.sort_by_key(|f| f.start() + f.end()),
    }
}

/// Stable sort of `features` ascending by start.
pub fn sort_by_start<F: Feature>(features: &mut [F]) {
    sort_features(features, SortOrder::Start);
}
