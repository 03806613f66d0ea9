use std::path::Path;

use fxhash::FxHashMap;

use crate::consts::{CHR_ALL, LONG_CHROMOSOME_FRACTION};
use crate::errors::GenomeError;
use crate::utils::read_chrom_sizes;

/// The genome coordinate model consulted by data sources.
///
/// Implementations answer chromosome lengths, canonicalize aliased chromosome names
/// (`1` vs `chr1`), and map chromosome-local positions into the single coordinate
/// space of the whole-genome view.
pub trait Genome: Send + Sync {
    /// Length of a chromosome, or `None` if the genome doesn't know it.
    fn chromosome_length(&self, chr: &str) -> Option<u64>;

    /// Canonical name for `name`. Unknown names are returned unchanged.
    fn canonical_chr_name(&self, name: &str) -> String;

    /// Offset of `(chr, position)` in the whole-genome coordinate space. `None` for
    /// chromosomes that are not part of the whole-genome view.
    fn genome_coordinate(&self, chr: &str, position: u64) -> Option<u64>;

    /// Chromosomes that make up the whole-genome view, in genome order.
    fn long_chromosome_names(&self) -> &[String];

    /// Total length of the whole-genome view.
    fn nominal_length(&self) -> u64;

    /// The chromosome shown by default: [`CHR_ALL`] for multi-chromosome genomes.
    fn home_chromosome(&self) -> &str;
}

/// A [`Genome`] described by an ordered list of chromosome sizes.
///
/// Chromosomes at least [`LONG_CHROMOSOME_FRACTION`] of the longest one form the
/// whole-genome view, concatenated end to end in the order given.
#[derive(Debug, Clone)]
pub struct ChromSizesGenome {
    chromosomes: Vec<(String, u64)>,
    index: FxHashMap<String, usize>,
    aliases: FxHashMap<String, String>,
    long_names: Vec<String>,
    offsets: FxHashMap<String, u64>,
    nominal_length: u64,
    home: String,
}

impl ChromSizesGenome {
    pub fn from_sizes(sizes: Vec<(String, u64)>) -> Result<Self, GenomeError> {
        if sizes.is_empty() {
            return Err(GenomeError::EmptyGenome);
        }

        let mut index = FxHashMap::default();
        for (i, (name, _)) in sizes.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(GenomeError::DuplicateChromosome(name.clone()));
            }
        }

        let mut aliases = FxHashMap::default();
        for (name, _) in sizes.iter() {
            for alias in default_aliases(name) {
                if !index.contains_key(&alias) {
                    aliases.entry(alias).or_insert_with(|| name.clone());
                }
            }
        }

        let longest = sizes.iter().map(|(_, len)| *len).max().unwrap_or(0);
        let min_length = (longest as f64 * LONG_CHROMOSOME_FRACTION) as u64;

        let mut long_names = Vec::new();
        let mut offsets = FxHashMap::default();
        let mut nominal_length = 0u64;
        for (name, len) in sizes.iter() {
            if *len >= min_length {
                offsets.insert(name.clone(), nominal_length);
                long_names.push(name.clone());
                nominal_length += len;
            }
        }

        let home = if sizes.len() > 1 {
            CHR_ALL.to_string()
        } else {
            sizes[0].0.clone()
        };

        Ok(ChromSizesGenome {
            chromosomes: sizes,
            index,
            aliases,
            long_names,
            offsets,
            nominal_length,
            home,
        })
    }

    /// Register an extra alias, e.g. an assembly-specific accession.
    pub fn add_alias(&mut self, alias: &str, chr: &str) {
        if !self.index.contains_key(alias) {
            self.aliases.insert(alias.to_string(), chr.to_string());
        }
    }

    /// All chromosomes in genome order.
    pub fn chromosomes(&self) -> &[(String, u64)] {
        &self.chromosomes
    }
}

impl TryFrom<&Path> for ChromSizesGenome {
    type Error = GenomeError;

    ///
    /// Create a new [ChromSizesGenome] from a (optionally gzipped) chrom.sizes file.
    ///
    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        ChromSizesGenome::from_sizes(read_chrom_sizes(value)?)
    }
}

impl TryFrom<&str> for ChromSizesGenome {
    type Error = GenomeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ChromSizesGenome::try_from(Path::new(value))
    }
}

impl Genome for ChromSizesGenome {
    fn chromosome_length(&self, chr: &str) -> Option<u64> {
        let canonical = self.canonical_chr_name(chr);
        self.index
            .get(&canonical)
            .map(|&i| self.chromosomes[i].1)
    }

    fn canonical_chr_name(&self, name: &str) -> String {
        if self.index.contains_key(name) {
            return name.to_string();
        }
        self.aliases
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    fn genome_coordinate(&self, chr: &str, position: u64) -> Option<u64> {
        let canonical = self.canonical_chr_name(chr);
        self.offsets.get(&canonical).map(|offset| offset + position)
    }

    fn long_chromosome_names(&self) -> &[String] {
        &self.long_names
    }

    fn nominal_length(&self) -> u64 {
        self.nominal_length
    }

    fn home_chromosome(&self) -> &str {
        &self.home
    }
}

/// `chr` prefixed/unprefixed spellings, plus the usual mitochondrial names.
fn default_aliases(name: &str) -> Vec<String> {
    let mut aliases = Vec::new();
    match name.strip_prefix("chr") {
        Some(bare) if !bare.is_empty() => aliases.push(bare.to_string()),
        _ => aliases.push(format!("chr{}", name)),
    }
    if matches!(name, "chrM" | "chrMT" | "MT" | "M") {
        aliases.extend(["chrM", "chrMT", "MT", "M"].iter().map(|s| s.to_string()));
    }
    aliases.retain(|a| a != name);
    aliases
}
