use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenomeError {
    #[error("Can't read chrom sizes file: {0}")]
    FileReadError(String),

    #[error("Error parsing chrom sizes line {line}: {reason}")]
    ChromSizesParseError { line: usize, reason: String },

    #[error("Genome has no chromosomes")]
    EmptyGenome,

    #[error("Duplicate chromosome name: {0}")]
    DuplicateChromosome(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum RegionParseError {
    #[error("Missing field `{0}` in region: {1}")]
    MissingField(&'static str, String),

    #[error("Invalid coordinate `{0}` in region: {1}")]
    InvalidCoordinate(String, String),

    #[error("Region end is before start: {0}")]
    InvertedRegion(String),
}
