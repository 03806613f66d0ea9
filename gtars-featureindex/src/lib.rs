//! Deterministic searches over sorted lists of genomic features.
//!
//! This crate answers the queries a genome browser asks of an in-memory feature list:
//! which feature is under the cursor, which is the nearest one to the left or right,
//! and which features overlap a point once short features are padded to a minimum
//! on-screen width. It is part of the [gtars](https://github.com/databio/gtars) project.
//!
//! Nothing here owns or copies data. Every query borrows a slice of any type
//! implementing [`Feature`] and returns indices or references into it.
//!
//! ## Sort order
//!
//! All queries assume the slice is sorted, and each one states which [`SortOrder`] it
//! needs: by start for most queries, by center for the `*_centered_*` family. The
//! order is a precondition. It is **not** checked, and an unsorted slice gives
//! meaningless answers. Use [`sort_features`] to establish it.
//!
//! ## Quick Start
//!
//! ```rust
//! use gtars_core::models::Region;
//! use gtars_featureindex::FeatureSearch;
//!
//! let genes = vec![
//!     Region::new("chr1", 0, 10),
//!     Region::new("chr1", 20, 30),
//!     Region::new("chr1", 40, 60),
//! ];
//!
//! // position 33 is between genes; the one ending at 30 is closest
//! let closest = genes.closest_feature(33.0).unwrap();
//! assert_eq!(closest.start, 20);
//!
//! let next = genes.nearest_feature_after(33.0).unwrap();
//! assert_eq!(next.start, 40);
//! ```

/// The two-phase "bisect then walk" primitive shared by every query.
pub mod bisect;

/// Reading frame and exon number assignment.
pub mod frames;

/// Sort orders and sorting.
pub mod order;

/// Queries over sorted feature slices.
///
/// See [`FeatureSearch`] for the main trait.
pub mod search;

// re-exports
pub use self::frames::compute_reading_frames;
pub use self::order::{SortOrder, sort_by_start, sort_features};
pub use self::search::{FeatureSearch, overlaps};
pub use gtars_core::models::Feature;
