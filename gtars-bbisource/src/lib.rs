//! # Resolution-matched summaries over bigWig and bigBed files
//!
//! This crate sits between a genome browser's track code and a BBI (bigWig/bigBed)
//! reader. Given a region and a display zoom it decides whether a precomputed zoom
//! level is fine enough to answer, or whether the caller must aggregate raw values
//! itself. It is part of the [gtars](https://github.com/databio/gtars) project.
//!
//! Two caches keep repeated queries cheap:
//! - a single-slot raw cache holding the most recently fetched interval. Any request
//!   contained in it is served without touching the file.
//! - a whole-genome memo holding, per window function, the scores of every long
//!   chromosome laid end to end.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use gtars_bbisource::{BbiDataSource, BigToolsReader, SummaryScores};
//! use gtars_core::models::ChromSizesGenome;
//!
//! let genome = Arc::new(ChromSizesGenome::try_from("hg38.chrom.sizes")?);
//! let reader = BigToolsReader::open("signal.bw")?;
//! let source = BbiDataSource::new(reader, genome)?;
//!
//! match source.summary_scores("chr1", 0, 1_000_000, 5)? {
//!     SummaryScores::Precomputed(scores) => println!("{} bins", scores.len()),
//!     SummaryScores::RawFallback => {
//!         let tile = source.raw_data("chr1", 0, 1_000_000)?;
//!     }
//!     SummaryScores::NoData => {}
//! }
//! ```
//!
//! Reading the file format is behind the [`BbiRead`] trait. Enable the `bigwig`
//! feature for [`BigToolsReader`], an implementation backed by `bigtools`.

pub mod cache;
pub mod config;
pub mod errors;
pub mod models;
pub mod reader;
pub mod source;

#[cfg(feature = "bigwig")]
pub mod bigwig;

#[cfg(test)]
mod mock;

// re-exports
pub use self::config::BbiSourceConfig;
pub use self::errors::{BbiSourceError, Result};
pub use self::models::{
    BbiKind, BedRecord, DataTile, RawDataInterval, SummaryScores, ValueRange, WindowFunction,
    ZoomDataRecord, ZoomLevelHeader,
};
pub use self::reader::{BbiIter, BbiRead};
pub use self::source::BbiDataSource;

#[cfg(feature = "bigwig")]
pub use self::bigwig::BigToolsReader;
