use std::sync::{Arc, Mutex, PoisonError};

use fxhash::{FxHashMap, FxHashSet};
use log::{debug, info, warn};
use statrs::statistics::{Data, OrderStatistics};

use gtars_core::CHR_ALL;
use gtars_core::models::{Genome, LocusScore};
use gtars_featureindex::sort_by_start;

use crate::cache::{RawTileCache, WholeGenomeCache, lock};
use crate::config::BbiSourceConfig;
use crate::errors::Result;
use crate::models::{
    BbiKind, BedRecord, DataTile, SummaryScores, ValueRange, WindowFunction, ZoomLevelHeader,
    select_zoom_level,
};
use crate::reader::BbiRead;

///
/// Resolution-matched queries over a bigWig or bigBed file.
///
/// A data source decides, per query, whether a precomputed zoom level answers it or
/// whether the caller has to aggregate raw data. It keeps the most recently fetched
/// raw interval in a single-slot cache and builds whole-genome score sequences at
/// most once per window function.
///
/// Chromosome names in queries are the genome's names. They are translated to the
/// file's spelling before the reader sees them.
///
pub struct BbiDataSource<R: BbiRead> {
    reader: Mutex<R>,
    genome: Arc<dyn Genome>,
    kind: BbiKind,
    levels: Vec<ZoomLevelHeader>,
    chr_name_map: FxHashMap<String, String>,
    config: BbiSourceConfig,
    window_function: WindowFunction,
    raw_cache: RawTileCache,
    whole_genome: WholeGenomeCache,
    data_range: Option<ValueRange>,
    feature_visibility_window: Option<u64>,
}

impl<R: BbiRead> BbiDataSource<R> {
    pub fn new(reader: R, genome: Arc<dyn Genome>) -> Result<Self> {
        Self::with_config(reader, genome, BbiSourceConfig::default())
    }

    ///
    /// Create a data source with custom settings.
    ///
    /// Reads the zoom headers and chromosome list once. For bigWig files the data
    /// range is estimated here, which reads up to `config.value_sample_size` values.
    ///
    pub fn with_config(reader: R, genome: Arc<dyn Genome>, config: BbiSourceConfig) -> Result<Self> {
        config.validate()?;

        let kind = reader.kind();
        let levels = reader.zoom_headers();
        if levels.is_empty() {
            warn!("BBI file has no zoom levels, all summaries will fall back to raw data");
        }

        let mut chr_name_map = FxHashMap::default();
        for name in reader.chrom_names() {
            let canonical = genome.canonical_chr_name(&name);
            if canonical != name {
                chr_name_map.insert(canonical, name);
            }
        }

        let feature_visibility_window = match kind {
            BbiKind::BigBed => levels
                .first()
                .map(|h| h.reduction_level as u64 * config.visibility_window_multiplier),
            BbiKind::BigWig => None,
        };

        let window_function = config.window_function;
        let mut source = BbiDataSource {
            reader: Mutex::new(reader),
            genome,
            kind,
            levels,
            chr_name_map,
            config,
            window_function,
            raw_cache: RawTileCache::new(),
            whole_genome: WholeGenomeCache::new(),
            data_range: None,
            feature_visibility_window,
        };

        if kind == BbiKind::BigWig {
            source.init_value_range()?;
        }

        Ok(source)
    }

    pub fn kind(&self) -> BbiKind {
        self.kind
    }

    pub fn zoom_levels(&self) -> &[ZoomLevelHeader] {
        &self.levels
    }

    pub fn config(&self) -> &BbiSourceConfig {
        &self.config
    }

    pub fn genome(&self) -> &Arc<dyn Genome> {
        &self.genome
    }

    /// The zoom level answering `target_resolution` bases per pixel.
    pub fn select_zoom_level(&self, target_resolution: f64) -> Option<ZoomLevelHeader> {
        select_zoom_level(&self.levels, target_resolution).copied()
    }

    ///
    /// Summary scores over `[start, end)` on `chr` at display zoom `zoom`.
    ///
    /// Zoom 0 shows the whole chromosome in `bins_per_tile` pixels and each zoom step
    /// halves the bases per pixel. The finest precomputed level is only accepted
    /// within `fallback_tolerance` of the target resolution. Past that the answer is
    /// [`SummaryScores::RawFallback`] and the caller should aggregate
    /// [`raw_data`](Self::raw_data). bigBed files have no raw values, so any level is
    /// accepted for them.
    ///
    /// [`CHR_ALL`] returns the whole-genome scores for the active window function.
    ///
    pub fn summary_scores(&self, chr: &str, start: u32, end: u32, zoom: u32) -> Result<SummaryScores> {
        if chr == CHR_ALL {
            return Ok(match self.whole_genome_scores(self.window_function)? {
                Some(scores) => SummaryScores::Precomputed(scores),
                None => SummaryScores::NoData,
            });
        }

        let Some(chr_length) = self.genome.chromosome_length(chr) else {
            return Ok(SummaryScores::NoData);
        };

        let bins = 2f64.powf(zoom as f64) * self.config.bins_per_tile as f64;
        let target = chr_length as f64 / bins;

        let Some(header) = self.select_zoom_level(target) else {
            return Ok(SummaryScores::RawFallback);
        };
        debug!(
            "zoom {} on {}: target {:.2} bp/pixel, selected reduction level {}",
            zoom, chr, target, header.reduction_level
        );

        if !self.accepts(&header, target) {
            return Ok(SummaryScores::RawFallback);
        }

        let query_chr = self.file_chr_name(chr);
        let function = self.window_function;
        let mut reader = lock(&self.reader);
        let scores = reader
            .zoom_records(&header, query_chr, start, end)?
            .map(|record| {
                record.map(|r| LocusScore::new(r.start as u64, r.end as u64, function.value(&r)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SummaryScores::Precomputed(Arc::new(scores)))
    }

    fn accepts(&self, header: &ZoomLevelHeader, target: f64) -> bool {
        let finest = self.levels.first() == Some(header);
        self.kind == BbiKind::BigBed
            || !finest
            || (header.reduction_level as f64 / target) < self.config.fallback_tolerance
    }

    ///
    /// Raw values overlapping `[start, end)` on `chr`.
    ///
    /// Served from the cache when the cached interval contains the request, otherwise
    /// fetched from the reader and cached in place of the previous interval. `None`
    /// for [`CHR_ALL`] and for chromosomes unknown to the genome.
    ///
    pub fn raw_data(&self, chr: &str, start: u32, end: u32) -> Result<Option<Arc<DataTile>>> {
        if chr == CHR_ALL || self.genome.chromosome_length(chr).is_none() {
            return Ok(None);
        }

        let tile = self.raw_cache.get_or_replace(chr, start, end, || {
            let query_chr = self.file_chr_name(chr);
            let mut reader = lock(&self.reader);
            reader.values(query_chr, start, end)?.collect()
        })?;

        Ok(Some(tile))
    }

    ///
    /// Genome-wide scores for `function`, in whole-genome coordinates.
    ///
    /// Only genomes whose home chromosome is [`CHR_ALL`] have a whole-genome view, and
    /// [`WindowFunction::None`] has no summary to show, so both give `None`. The first
    /// call per function reads every long chromosome at the zoom level matching the
    /// genome's nominal length over `screen_width` pixels. Later calls return the same
    /// `Arc`.
    ///
    pub fn whole_genome_scores(&self, function: WindowFunction) -> Result<Option<Arc<Vec<LocusScore>>>> {
        if self.genome.home_chromosome() != CHR_ALL || function == WindowFunction::None {
            return Ok(None);
        }

        let scores = self
            .whole_genome
            .get_or_build(function, || self.build_whole_genome(function))?;
        Ok(Some(scores))
    }

    fn build_whole_genome(&self, function: WindowFunction) -> Result<Vec<LocusScore>> {
        let target = self.genome.nominal_length() as f64 / self.config.screen_width as f64;
        let Some(header) = self.select_zoom_level(target) else {
            warn!("no zoom levels, whole genome view for {} is empty", function);
            return Ok(Vec::new());
        };
        info!(
            "building whole genome scores ({}) at reduction level {}",
            function, header.reduction_level
        );

        let long: FxHashSet<&str> = self
            .genome
            .long_chromosome_names()
            .iter()
            .map(String::as_str)
            .collect();

        let mut reader = lock(&self.reader);
        let mut scores = Vec::new();
        for file_chr in reader.chrom_names() {
            let chr = self.genome.canonical_chr_name(&file_chr);
            if !long.contains(chr.as_str()) {
                continue;
            }
            let end = self.chrom_end(&chr);
            for record in reader.zoom_records(&header, &file_chr, 0, end)? {
                let record = record?;
                let value = function.value(&record);
                if !value.is_finite() {
                    continue;
                }
                let (Some(start), Some(end)) = (
                    self.genome.genome_coordinate(&chr, record.start as u64),
                    self.genome.genome_coordinate(&chr, record.end as u64),
                ) else {
                    continue;
                };
                scores.push(LocusScore::new(start, end, value));
            }
        }

        scores.sort_by_key(|s| s.start);
        Ok(scores)
    }

    /// Estimate the display range from the `lower_percentile` and `upper_percentile`
    /// of a sample of mean values.
    fn init_value_range(&mut self) -> Result<()> {
        let values = self.sample_values()?;
        let range = if values.is_empty() {
            ValueRange {
                min: self.config.default_data_min,
                max: self.config.default_data_max,
            }
        } else {
            let mut data = Data::new(values);
            ValueRange {
                min: data.percentile(self.config.lower_percentile),
                max: data.percentile(self.config.upper_percentile),
            }
        };
        debug!("data range estimated as [{}, {}]", range.min, range.max);
        self.data_range = Some(range);
        Ok(())
    }

    fn sample_values(&self) -> Result<Vec<f64>> {
        let sample_size = self.config.value_sample_size;
        let header = self.select_zoom_level(self.config.value_range_resolution as f64);

        let mut reader = lock(&self.reader);
        let mut values = Vec::with_capacity(sample_size.min(1 << 16));
        for file_chr in reader.chrom_names() {
            if values.len() >= sample_size {
                break;
            }
            let end = self.chrom_end(&self.genome.canonical_chr_name(&file_chr));
            let chrom_values: Box<dyn Iterator<Item = Result<f32>> + '_> = match &header {
                Some(header) => Box::new(
                    reader
                        .zoom_records(header, &file_chr, 0, end)?
                        .map(|r| r.map(|r| r.mean)),
                ),
                None => Box::new(reader.values(&file_chr, 0, end)?.map(|v| v.map(|v| v.value))),
            };
            for value in chrom_values {
                let value = value?;
                if value.is_finite() {
                    values.push(value as f64);
                    if values.len() >= sample_size {
                        break;
                    }
                }
            }
        }
        Ok(values)
    }

    ///
    /// Undecoded bigBed entries overlapping `[start, end)` on `chr`, sorted by start.
    ///
    /// Entries carry the genome's chromosome name. Empty for [`CHR_ALL`] and unknown
    /// chromosomes.
    ///
    pub fn features(&self, chr: &str, start: u32, end: u32) -> Result<Vec<BedRecord>> {
        if chr == CHR_ALL || self.genome.chromosome_length(chr).is_none() {
            return Ok(Vec::new());
        }

        let query_chr = self.file_chr_name(chr);
        let mut reader = lock(&self.reader);
        let mut records = reader
            .bed_entries(query_chr, start, end)?
            .map(|entry| {
                entry.map(|mut e| {
                    e.chrom = chr.to_string();
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;

        sort_by_start(&mut records);
        Ok(records)
    }

    /// Feature density of a bigBed file over `[start, end)`, read from its zoom levels.
    /// `None` for bigWig files and when there is nothing to show.
    pub fn coverage_scores(
        &self,
        chr: &str,
        start: u32,
        end: u32,
        zoom: u32,
    ) -> Result<Option<Arc<Vec<LocusScore>>>> {
        if self.kind != BbiKind::BigBed {
            return Ok(None);
        }
        Ok(match self.summary_scores(chr, start, end, zoom)? {
            SummaryScores::Precomputed(scores) => Some(scores),
            SummaryScores::RawFallback | SummaryScores::NoData => None,
        })
    }

    pub fn window_function(&self) -> WindowFunction {
        self.window_function
    }

    pub fn set_window_function(&mut self, function: WindowFunction) {
        self.window_function = function;
    }

    pub fn available_window_functions(&self) -> &'static [WindowFunction] {
        &WindowFunction::AVAILABLE
    }

    /// Display range estimated at construction. `None` for bigBed files.
    pub fn data_range(&self) -> Option<ValueRange> {
        self.data_range
    }

    /// Widest region, in bases, over which bigBed features should be loaded. `None`
    /// means no limit.
    pub fn feature_window_size(&self) -> Option<u64> {
        self.feature_visibility_window
    }

    /// Drop the raw tile and every whole-genome sequence.
    pub fn clear_caches(&self) {
        self.raw_cache.clear();
        self.whole_genome.clear();
    }

    /// Drop the caches and hand back the reader.
    pub fn close(self) -> R {
        self.clear_caches();
        self.reader.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn file_chr_name<'a>(&'a self, chr: &'a str) -> &'a str {
        self.chr_name_map.get(chr).map(String::as_str).unwrap_or(chr)
    }

    fn chrom_end(&self, chr: &str) -> u32 {
        self.genome
            .chromosome_length(chr)
            .map_or(u32::MAX, |len| len.min(u32::MAX as u64) as u32)
    }
}
