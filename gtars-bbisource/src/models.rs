use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use gtars_core::models::{Feature, LocusScore};

/// The flavor of a BBI file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BbiKind {
    BigWig,
    BigBed,
}

/// One precomputed zoom level: bins of `reduction_level` bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevelHeader {
    /// 1-based level identifier, 1 being the finest.
    pub zoom_level: u32,
    /// Bases summarized per bin.
    pub reduction_level: u32,
}

/// One bin of a precomputed zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomDataRecord {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
    pub min: f32,
    pub mean: f32,
    pub max: f32,
}

/// One raw bigWig value over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WigValue {
    pub start: u32,
    pub end: u32,
    pub value: f32,
}

/// An undecoded bigBed entry. `rest` holds the tab separated columns after the third.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedRecord {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
    pub rest: String,
}

impl Feature for BedRecord {
    fn chr(&self) -> &str {
        &self.chrom
    }

    fn start(&self) -> u64 {
        self.start as u64
    }

    fn end(&self) -> u64 {
        self.end as u64
    }
}

/// Raw, unaggregated records covering exactly one fetched interval, as parallel
/// columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTile {
    pub starts: Vec<u32>,
    pub ends: Vec<u32>,
    pub values: Vec<f32>,
}

impl DataTile {
    pub fn with_capacity(capacity: usize) -> Self {
        DataTile {
            starts: Vec::with_capacity(capacity),
            ends: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: WigValue) {
        self.starts.push(value.start);
        self.ends.push(value.end);
        self.values.push(value.value);
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = WigValue> + '_ {
        self.starts
            .iter()
            .zip(self.ends.iter())
            .zip(self.values.iter())
            .map(|((&start, &end), &value)| WigValue { start, end, value })
    }
}

impl FromIterator<WigValue> for DataTile {
    fn from_iter<T: IntoIterator<Item = WigValue>>(iter: T) -> Self {
        let mut tile = DataTile::default();
        for value in iter {
            tile.push(value);
        }
        tile
    }
}

/// The interval a [`DataTile`] was fetched for.
#[derive(Debug, Clone)]
pub struct RawDataInterval {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub tile: Arc<DataTile>,
}

impl RawDataInterval {
    pub fn new(chr: &str, start: u32, end: u32, tile: Arc<DataTile>) -> Self {
        RawDataInterval {
            chr: chr.to_string(),
            start,
            end,
            tile,
        }
    }

    /// Whether `[start, end]` on `chr` lies entirely inside this interval.
    pub fn contains(&self, chr: &str, start: u32, end: u32) -> bool {
        chr == self.chr && start >= self.start && end <= self.end
    }
}

/// How values inside a bin are summarized to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowFunction {
    Min,
    #[default]
    Mean,
    Max,
    /// No summarization: raw values only.
    None,
}

impl WindowFunction {
    /// The window functions a BBI source can serve.
    pub const AVAILABLE: [WindowFunction; 4] = [
        WindowFunction::Min,
        WindowFunction::Mean,
        WindowFunction::Max,
        WindowFunction::None,
    ];

    /// The value of `record` under this function. Anything but min and max reads the
    /// mean.
    pub fn value(&self, record: &ZoomDataRecord) -> f32 {
        match self {
            WindowFunction::Min => record.min,
            WindowFunction::Max => record.max,
            WindowFunction::Mean | WindowFunction::None => record.mean,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowFunction::Min => "min",
            WindowFunction::Mean => "mean",
            WindowFunction::Max => "max",
            WindowFunction::None => "none",
        }
    }
}

impl FromStr for WindowFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "min" => Ok(WindowFunction::Min),
            "mean" => Ok(WindowFunction::Mean),
            "max" => Ok(WindowFunction::Max),
            "none" => Ok(WindowFunction::None),
            _ => Err(format!("Unknown window function: {}", s)),
        }
    }
}

impl Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answer to a summary query.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryScores {
    /// Scores read from a precomputed zoom level (or the whole-genome aggregate).
    Precomputed(Arc<Vec<LocusScore>>),
    /// No precomputed level is fine enough: aggregate [`crate::BbiDataSource::raw_data`]
    /// instead.
    RawFallback,
    /// The chromosome isn't known, so there is nothing to show.
    NoData,
}

impl SummaryScores {
    pub fn scores(&self) -> Option<&[LocusScore]> {
        match self {
            SummaryScores::Precomputed(scores) => Some(scores.as_slice()),
            SummaryScores::RawFallback | SummaryScores::NoData => None,
        }
    }
}

/// Display scaling range estimated from the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// Pick the zoom level for `target_resolution` bases per pixel.
///
/// `headers` are ordered finest to coarsest. The result is the coarsest level whose
/// reduction level is strictly finer than the target, or the finest level when every
/// level is too coarse. `None` only when there are no levels at all.
pub fn select_zoom_level(
    headers: &[ZoomLevelHeader],
    target_resolution: f64,
) -> Option<&ZoomLevelHeader> {
    headers
        .iter()
        .rev()
        .find(|header| (header.reduction_level as f64) < target_resolution)
        .or_else(|| headers.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn headers() -> Vec<ZoomLevelHeader> {
        [10, 100, 1000]
            .iter()
            .enumerate()
            .map(|(i, &reduction_level)| ZoomLevelHeader {
                zoom_level: i as u32 + 1,
                reduction_level,
            })
            .collect()
    }

    #[rstest]
    #[case(50.0, 10)]
    #[case(100.0, 10)]
    #[case(100.5, 100)]
    #[case(5000.0, 1000)]
    #[case(1.0, 10)]
    fn test_select_zoom_level(
        headers: Vec<ZoomLevelHeader>,
        #[case] target: f64,
        #[case] expected: u32,
    ) {
        let header = select_zoom_level(&headers, target).unwrap();
        assert_eq!(header.reduction_level, expected);
    }

    #[rstest]
    fn test_select_zoom_level_no_headers() {
        assert_eq!(select_zoom_level(&[], 50.0), None);
    }

    #[rstest]
    fn test_raw_interval_contains() {
        let interval = RawDataInterval::new("chr1", 100, 200, Arc::new(DataTile::default()));
        assert!(interval.contains("chr1", 100, 200));
        assert!(interval.contains("chr1", 120, 150));
        assert!(!interval.contains("chr1", 50, 90));
        assert!(!interval.contains("chr1", 150, 250));
        assert!(!interval.contains("chr2", 120, 150));
    }

    #[rstest]
    fn test_window_function_values() {
        let record = ZoomDataRecord {
            chrom: "chr1".to_string(),
            start: 0,
            end: 10,
            min: 1.0,
            mean: 2.0,
            max: 3.0,
        };
        assert_eq!(WindowFunction::Min.value(&record), 1.0);
        assert_eq!(WindowFunction::Mean.value(&record), 2.0);
        assert_eq!(WindowFunction::Max.value(&record), 3.0);
        assert_eq!(WindowFunction::None.value(&record), 2.0);
    }

    #[rstest]
    #[case("min", WindowFunction::Min)]
    #[case("MEAN", WindowFunction::Mean)]
    #[case("none", WindowFunction::None)]
    fn test_window_function_from_str(#[case] s: &str, #[case] expected: WindowFunction) {
        assert_eq!(s.parse::<WindowFunction>(), Ok(expected));
        assert!("median".parse::<WindowFunction>().is_err());
    }

    #[rstest]
    fn test_tile_from_values() {
        let tile: DataTile = vec![
            WigValue { start: 0, end: 5, value: 1.5 },
            WigValue { start: 5, end: 9, value: 2.5 },
        ]
        .into_iter()
        .collect();

        assert_eq!(tile.starts, vec![0, 5]);
        assert_eq!(tile.ends, vec![5, 9]);
        assert_eq!(tile.values, vec![1.5, 2.5]);
        assert_eq!(tile.iter().nth(1).map(|v| v.value), Some(2.5));
    }
}
