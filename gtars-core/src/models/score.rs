/// A single summarized value over `[start, end)`.
///
/// Coordinates are `u64` so that whole-genome scores, whose coordinates are offsets
/// into the concatenated genome, fit alongside chromosome-local ones.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocusScore {
    pub start: u64,
    pub end: u64,
    pub score: f32,
}

impl LocusScore {
    pub fn new(start: u64, end: u64, score: f32) -> Self {
        LocusScore { start, end, score }
    }
}
