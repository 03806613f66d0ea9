/// Pseudo-chromosome name for the whole-genome view.
pub const CHR_ALL: &str = "All";

/// Minimum length, relative to the longest chromosome, for a chromosome to be part
/// of the whole-genome view.
pub const LONG_CHROMOSOME_FRACTION: f64 = 0.1;
