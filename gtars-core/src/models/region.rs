use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::RegionParseError;
use crate::models::Feature;

///
/// Region struct, representation of one line of a BED-like file
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub rest: Option<String>,
}

impl Region {
    pub fn new(chr: &str, start: u32, end: u32) -> Self {
        Region {
            chr: chr.to_string(),
            start,
            end,
            rest: None,
        }
    }

    ///
    /// Get width of the region
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    ///
    /// Get file string of Region
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}{}",
            self.chr,
            self.start,
            self.end,
            self.rest
                .as_deref()
                .map_or(String::new(), |s| format!("\t{}", s)),
        )
    }

    /// Integer midpoint of this region: `start + width / 2`.
    pub fn mid_point(&self) -> u32 {
        self.start + self.width() / 2
    }
}

impl Feature for Region {
    fn chr(&self) -> &str {
        &self.chr
    }

    fn start(&self) -> u64 {
        self.start as u64
    }

    fn end(&self) -> u64 {
        self.end as u64
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    /// Parse a tab separated BED line. Columns after the third are kept in `rest`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.splitn(4, '\t');

        let chr = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RegionParseError::MissingField("chr", line.to_string()))?;
        let start = fields
            .next()
            .ok_or_else(|| RegionParseError::MissingField("start", line.to_string()))?;
        let end = fields
            .next()
            .ok_or_else(|| RegionParseError::MissingField("end", line.to_string()))?;

        let start = start
            .trim()
            .parse::<u32>()
            .map_err(|_| RegionParseError::InvalidCoordinate(start.to_string(), line.to_string()))?;
        let end = end
            .trim()
            .parse::<u32>()
            .map_err(|_| RegionParseError::InvalidCoordinate(end.to_string(), line.to_string()))?;

        if end < start {
            return Err(RegionParseError::InvertedRegion(line.to_string()));
        }

        let rest = fields.next().map(str::to_string).filter(|s| !s.is_empty());

        Ok(Region {
            chr: chr.to_string(),
            start,
            end,
            rest,
        })
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
