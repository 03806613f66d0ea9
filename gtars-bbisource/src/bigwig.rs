use std::path::Path;

use bigtools::utils::reopen::ReopenableFile;
use bigtools::{BigBedRead, BigWigRead, ZoomHeader};

use crate::errors::{BbiSourceError, Result};
use crate::models::{BbiKind, BedRecord, WigValue, ZoomDataRecord, ZoomLevelHeader};
use crate::reader::{BbiIter, BbiRead};

/// [`BbiRead`] over a bigWig or bigBed file on disk, backed by bigtools.
pub enum BigToolsReader {
    BigWig(BigWigRead<ReopenableFile>),
    BigBed(BigBedRead<ReopenableFile>),
}

fn reader_error<E: std::fmt::Display>(e: E) -> BbiSourceError {
    BbiSourceError::ReaderError(e.to_string())
}

fn open_error<P: AsRef<Path>, E: std::fmt::Display>(path: P, e: E) -> BbiSourceError {
    BbiSourceError::OpenError {
        path: path.as_ref().display().to_string(),
        reason: e.to_string(),
    }
}

impl BigToolsReader {
    pub fn open_bigwig<P: AsRef<Path>>(path: P) -> Result<Self> {
        let name = path.as_ref().to_string_lossy();
        let reader = BigWigRead::open_file(&name).map_err(|e| open_error(&path, e))?;
        Ok(BigToolsReader::BigWig(reader))
    }

    pub fn open_bigbed<P: AsRef<Path>>(path: P) -> Result<Self> {
        let name = path.as_ref().to_string_lossy();
        let reader = BigBedRead::open_file(&name).map_err(|e| open_error(&path, e))?;
        Ok(BigToolsReader::BigBed(reader))
    }

    ///
    /// Open a file by extension: `.bb`/`.bigbed` as bigBed, anything else as bigWig.
    ///
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("bb") | Some("bigbed") => Self::open_bigbed(path),
            _ => Self::open_bigwig(path),
        }
    }

    fn raw_zoom_headers(&self) -> &[ZoomHeader] {
        match self {
            BigToolsReader::BigWig(r) => &r.info().zoom_headers,
            BigToolsReader::BigBed(r) => &r.info().zoom_headers,
        }
    }
}

fn zoom_record(chrom: &str, record: bigtools::ZoomRecord) -> ZoomDataRecord {
    let summary = record.summary;
    ZoomDataRecord {
        chrom: chrom.to_string(),
        start: record.start,
        end: record.end,
        min: summary.min_val as f32,
        mean: (summary.sum / summary.bases_covered as f64) as f32,
        max: summary.max_val as f32,
    }
}

impl BbiRead for BigToolsReader {
    fn kind(&self) -> BbiKind {
        match self {
            BigToolsReader::BigWig(_) => BbiKind::BigWig,
            BigToolsReader::BigBed(_) => BbiKind::BigBed,
        }
    }

    fn zoom_headers(&self) -> Vec<ZoomLevelHeader> {
        let mut headers: Vec<u32> = self
            .raw_zoom_headers()
            .iter()
            .map(|h| h.reduction_level)
            .collect();
        headers.sort_unstable();
        headers
            .into_iter()
            .enumerate()
            .map(|(i, reduction_level)| ZoomLevelHeader {
                zoom_level: i as u32 + 1,
                reduction_level,
            })
            .collect()
    }

    fn chrom_names(&self) -> Vec<String> {
        let chroms = match self {
            BigToolsReader::BigWig(r) => r.chroms(),
            BigToolsReader::BigBed(r) => r.chroms(),
        };
        chroms.iter().map(|c| c.name.clone()).collect()
    }

    fn zoom_records(
        &mut self,
        header: &ZoomLevelHeader,
        chrom: &str,
        start: u32,
        end: u32,
    ) -> Result<BbiIter<'_, ZoomDataRecord>> {
        let reduction_level = header.reduction_level;
        let chrom_name = chrom.to_string();
        match self {
            BigToolsReader::BigWig(r) => {
                let iter = r
                    .get_zoom_interval(chrom, start, end, reduction_level)
                    .map_err(reader_error)?;
                Ok(Box::new(iter.map(move |record| {
                    record
                        .map(|record| zoom_record(&chrom_name, record))
                        .map_err(reader_error)
                })))
            }
            BigToolsReader::BigBed(r) => {
                let iter = r
                    .get_zoom_interval(chrom, start, end, reduction_level)
                    .map_err(reader_error)?;
                Ok(Box::new(iter.map(move |record| {
                    record
                        .map(|record| zoom_record(&chrom_name, record))
                        .map_err(reader_error)
                })))
            }
        }
    }

    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<BbiIter<'_, WigValue>> {
        match self {
            BigToolsReader::BigWig(r) => {
                let iter = r.get_interval(chrom, start, end).map_err(reader_error)?;
                Ok(Box::new(iter.map(|value| {
                    value
                        .map(|v| WigValue {
                            start: v.start,
                            end: v.end,
                            value: v.value,
                        })
                        .map_err(reader_error)
                })))
            }
            BigToolsReader::BigBed(_) => Err(BbiSourceError::ReaderError(
                "bigBed files have no raw values".to_string(),
            )),
        }
    }

    fn bed_entries(&mut self, chrom: &str, start: u32, end: u32) -> Result<BbiIter<'_, BedRecord>> {
        let chrom_name = chrom.to_string();
        match self {
            BigToolsReader::BigBed(r) => {
                let iter = r.get_interval(chrom, start, end).map_err(reader_error)?;
                Ok(Box::new(iter.map(move |entry| {
                    entry
                        .map(|e| BedRecord {
                            chrom: chrom_name.clone(),
                            start: e.start,
                            end: e.end,
                            rest: e.rest,
                        })
                        .map_err(reader_error)
                })))
            }
            BigToolsReader::BigWig(_) => Err(BbiSourceError::ReaderError(
                "bigWig files have no bed entries".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn test_open_missing_file() {
        let result = BigToolsReader::open("does/not/exist.bw");
        assert!(matches!(result, Err(BbiSourceError::OpenError { .. })));

        let result = BigToolsReader::open("does/not/exist.bb");
        assert!(matches!(result, Err(BbiSourceError::OpenError { .. })));
    }
}
