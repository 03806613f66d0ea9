use crate::errors::Result;
use crate::models::{BbiKind, BedRecord, WigValue, ZoomDataRecord, ZoomLevelHeader};

/// Boxed iterator over records read from a BBI file.
pub type BbiIter<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Read access to a multi-resolution BBI (bigWig/bigBed) file.
///
/// This is the seam between query logic and the file format: implementations decode
/// headers, chromosome trees and data blocks, the data source only asks for records.
/// All iterators yield records in ascending start order for the requested range.
/// Coordinates are chromosome-local, 0-based, half-open, and chromosome names are the
/// file's own spelling.
pub trait BbiRead: Send {
    fn kind(&self) -> BbiKind;

    /// Zoom levels, finest first. Empty if the file has none.
    fn zoom_headers(&self) -> Vec<ZoomLevelHeader>;

    /// Chromosome names in chromosome id order.
    fn chrom_names(&self) -> Vec<String>;

    /// Bins of zoom level `header` overlapping `[start, end)` on `chrom`.
    fn zoom_records(
        &mut self,
        header: &ZoomLevelHeader,
        chrom: &str,
        start: u32,
        end: u32,
    ) -> Result<BbiIter<'_, ZoomDataRecord>>;

    /// Raw bigWig values overlapping `[start, end)` on `chrom`.
    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<BbiIter<'_, WigValue>>;

    /// bigBed entries overlapping `[start, end)` on `chrom`.
    fn bed_entries(&mut self, chrom: &str, start: u32, end: u32) -> Result<BbiIter<'_, BedRecord>>;
}
