//! Core models shared across the gtars query crates.
//!
//! This crate holds the types every other crate speaks: the [`Feature`](models::Feature)
//! trait that sorted-interval searches are written against, concrete feature types
//! ([`Region`](models::Region), [`Exon`](models::Exon)), per-bin scores
//! ([`LocusScore`](models::LocusScore)) and the genome coordinate model
//! ([`Genome`](models::Genome)) used to map chromosome-local positions into a single
//! whole-genome coordinate space.
//!
//! ```rust
//! use gtars_core::models::{ChromSizesGenome, Genome};
//!
//! let genome = ChromSizesGenome::from_sizes(vec![
//!     ("chr1".to_string(), 1000),
//!     ("chr2".to_string(), 500),
//! ])
//! .unwrap();
//!
//! assert_eq!(genome.genome_coordinate("chr2", 10), Some(1010));
//! assert_eq!(genome.canonical_chr_name("2"), "chr2");
//! ```
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

pub use consts::*;
