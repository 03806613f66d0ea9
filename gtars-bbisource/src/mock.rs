//! In-memory [`BbiRead`] for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use fxhash::FxHashMap;

use crate::errors::{BbiSourceError, Result};
use crate::models::{BbiKind, BedRecord, WigValue, ZoomDataRecord, ZoomLevelHeader};
use crate::reader::{BbiIter, BbiRead};

#[derive(Debug, Default, Clone)]
pub struct Counters {
    pub value_iterations: Arc<AtomicUsize>,
    pub zoom_iterations: Arc<AtomicUsize>,
    /// While set, zoom iterators yield an error and `values` fails outright.
    pub failing: Arc<AtomicBool>,
}

impl Counters {
    pub fn values(&self) -> usize {
        self.value_iterations.load(Ordering::SeqCst)
    }

    pub fn zooms(&self) -> usize {
        self.zoom_iterations.load(Ordering::SeqCst)
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }

    fn is_failing(&self) -> bool {
        self.failing.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct MockReader {
    kind: BbiKind,
    headers: Vec<ZoomLevelHeader>,
    chroms: Vec<String>,
    zooms: FxHashMap<(u32, String), Vec<ZoomDataRecord>>,
    values: FxHashMap<String, Vec<WigValue>>,
    beds: FxHashMap<String, Vec<BedRecord>>,
    delay: Option<Duration>,
    pub counters: Counters,
}

impl MockReader {
    pub fn new(kind: BbiKind, chroms: &[&str], reduction_levels: &[u32]) -> Self {
        MockReader {
            kind,
            headers: reduction_levels
                .iter()
                .enumerate()
                .map(|(i, &reduction_level)| ZoomLevelHeader {
                    zoom_level: i as u32 + 1,
                    reduction_level,
                })
                .collect(),
            chroms: chroms.iter().map(|c| c.to_string()).collect(),
            zooms: FxHashMap::default(),
            values: FxHashMap::default(),
            beds: FxHashMap::default(),
            delay: None,
            counters: Counters::default(),
        }
    }

    /// Sleep for `delay` on every `values` call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add bins `(start, end, value)` to zoom level `zoom_level`, with min, mean and max
    /// set to `value - 1`, `value` and `value + 1`.
    pub fn with_zoom(mut self, zoom_level: u32, chrom: &str, bins: &[(u32, u32, f32)]) -> Self {
        let records = bins.iter().map(|&(start, end, value)| ZoomDataRecord {
            chrom: chrom.to_string(),
            start,
            end,
            min: value - 1.0,
            mean: value,
            max: value + 1.0,
        });
        self.zooms
            .entry((zoom_level, chrom.to_string()))
            .or_default()
            .extend(records);
        self
    }

    pub fn with_values(mut self, chrom: &str, values: &[(u32, u32, f32)]) -> Self {
        let values = values
            .iter()
            .map(|&(start, end, value)| WigValue { start, end, value });
        self.values.entry(chrom.to_string()).or_default().extend(values);
        self
    }

    pub fn with_beds(mut self, chrom: &str, entries: &[(u32, u32, &str)]) -> Self {
        let entries = entries.iter().map(|&(start, end, rest)| BedRecord {
            chrom: chrom.to_string(),
            start,
            end,
            rest: rest.to_string(),
        });
        self.beds.entry(chrom.to_string()).or_default().extend(entries);
        self
    }
}

fn overlapping<T: Clone + 'static>(
    records: Option<&Vec<T>>,
    bounds: impl Fn(&T) -> (u32, u32) + 'static,
    start: u32,
    end: u32,
) -> BbiIter<'_, T> {
    let records = records.map(|r| r.as_slice()).unwrap_or(&[]);
    Box::new(
        records
            .iter()
            .filter(move |r| {
                let (s, e) = bounds(*r);
                s < end && e > start
            })
            .cloned()
            .map(Ok),
    )
}

impl BbiRead for MockReader {
    fn kind(&self) -> BbiKind {
        self.kind
    }

    fn zoom_headers(&self) -> Vec<ZoomLevelHeader> {
        self.headers.clone()
    }

    fn chrom_names(&self) -> Vec<String> {
        self.chroms.clone()
    }

    fn zoom_records(
        &mut self,
        header: &ZoomLevelHeader,
        chrom: &str,
        start: u32,
        end: u32,
    ) -> Result<BbiIter<'_, ZoomDataRecord>> {
        self.counters.zoom_iterations.fetch_add(1, Ordering::SeqCst);
        if self.counters.is_failing() {
            return Ok(Box::new(std::iter::once(Err(BbiSourceError::ReaderError(
                "zoom block is corrupt".to_string(),
            )))));
        }
        let records = self.zooms.get(&(header.zoom_level, chrom.to_string()));
        Ok(overlapping(records, |r| (r.start, r.end), start, end))
    }

    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<BbiIter<'_, WigValue>> {
        self.counters.value_iterations.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        if self.counters.is_failing() {
            return Err(BbiSourceError::ReaderError("data block is corrupt".to_string()));
        }
        Ok(overlapping(self.values.get(chrom), |v| (v.start, v.end), start, end))
    }

    fn bed_entries(&mut self, chrom: &str, start: u32, end: u32) -> Result<BbiIter<'_, BedRecord>> {
        Ok(overlapping(self.beds.get(chrom), |b| (b.start, b.end), start, end))
    }
}
