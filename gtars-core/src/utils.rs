use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::errors::GenomeError;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// Read a chrom.sizes file (`name<whitespace>length` per line) preserving file order.
///
/// Blank lines and lines starting with `#` are skipped.
///
pub fn read_chrom_sizes<T: AsRef<Path>>(path: T) -> Result<Vec<(String, u64)>, GenomeError> {
    let reader = get_dynamic_reader(path.as_ref())
        .map_err(|e| GenomeError::FileReadError(format!("{:#}", e)))?;

    let mut chrom_sizes = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(name), Some(length)) = (parts.next(), parts.next()) else {
            return Err(GenomeError::ChromSizesParseError {
                line: i + 1,
                reason: "expected two columns".to_string(),
            });
        };

        let length = length
            .parse::<u64>()
            .map_err(|e| GenomeError::ChromSizesParseError {
                line: i + 1,
                reason: e.to_string(),
            })?;

        chrom_sizes.push((name.to_string(), length));
    }

    Ok(chrom_sizes)
}
