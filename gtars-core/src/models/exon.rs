use crate::models::Feature;

/// One exon of a transcript.
///
/// `coding_start..coding_end` is the transcript's coding region (thick start/end);
/// an exon entirely outside it is non-coding. `number` and `reading_frame` are
/// assigned by `gtars_featureindex::compute_reading_frames`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exon {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub coding_start: u32,
    pub coding_end: u32,
    pub number: Option<u32>,
    pub reading_frame: Option<u8>,
}

impl Exon {
    /// A fully coding exon.
    pub fn new(chr: &str, start: u32, end: u32) -> Self {
        Exon {
            chr: chr.to_string(),
            start,
            end,
            coding_start: start,
            coding_end: end,
            number: None,
            reading_frame: None,
        }
    }

    /// An exon clipped to the coding region `coding_start..coding_end`.
    pub fn with_coding_region(chr: &str, start: u32, end: u32, coding_start: u32, coding_end: u32) -> Self {
        Exon {
            coding_start,
            coding_end,
            ..Exon::new(chr, start, end)
        }
    }

    /// Number of coding bases in this exon.
    pub fn coding_length(&self) -> u32 {
        self.end
            .min(self.coding_end)
            .saturating_sub(self.start.max(self.coding_start))
    }
}

impl Feature for Exon {
    fn chr(&self) -> &str {
        &self.chr
    }

    fn start(&self) -> u64 {
        self.start as u64
    }

    fn end(&self) -> u64 {
        self.end as u64
    }
}
