use std::fmt::{self, Display};

/// A positional record on one chromosome: `[start, end)`, 0-based.
///
/// The search routines in `gtars-featureindex` are written against this trait, so any
/// caller type (a BED region, an exon, a decoded bigBed entry) can be queried without
/// being copied into an index-owned representation.
pub trait Feature {
    /// Chromosome (contig) name.
    fn chr(&self) -> &str;

    /// Inclusive start.
    fn start(&self) -> u64;

    /// Exclusive end.
    fn end(&self) -> u64;

    /// Midpoint of the feature, `(start + end) / 2`.
    #[inline]
    fn center(&self) -> f64 {
        (self.start() + self.end()) as f64 / 2.0
    }

    #[inline]
    fn width(&self) -> u64 {
        self.end().saturating_sub(self.start())
    }
}

impl<F: Feature + ?Sized> Feature for &F {
    fn chr(&self) -> &str {
        (**self).chr()
    }

    fn start(&self) -> u64 {
        (**self).start()
    }

    fn end(&self) -> u64 {
        (**self).end()
    }
}

/// Strand of a stranded feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    Plus,
    Minus,
    #[default]
    Unstranded,
}

impl Strand {
    /// Parse a BED/GTF strand character. Anything other than `+` or `-` is unstranded.
    pub fn from_char(c: char) -> Self {
        match c {
            '+' => Strand::Plus,
            '-' => Strand::Minus,
            _ => Strand::Unstranded,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '.',
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
