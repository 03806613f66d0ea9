pub mod exon;
pub mod feature;
pub mod genome;
pub mod region;
pub mod score;

// re-export for cleaner imports
pub use self::exon::Exon;
pub use self::feature::{Feature, Strand};
pub use self::genome::{ChromSizesGenome, Genome};
pub use self::region::Region;
pub use self::score::LocusScore;
