//! Genomic intervals, paired-interval tables and assembly naming rules

use std::fmt;

use crate::errors::AnnotateError;

/// A genomic interval; containment checks treat both bounds as inclusive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl GenomicInterval {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Midpoint in base pairs
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.start as f64 + self.end as f64)
    }

    pub fn width(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// True when `other` lies entirely inside this interval, bounds inclusive
    pub fn contains(&self, other: &GenomicInterval) -> bool {
        self.chrom == other.chrom && other.start >= self.start && other.end <= self.end
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// One BEDPE-like record: a pairwise feature such as a chromatin loop
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntervalPair {
    pub first: GenomicInterval,
    pub second: GenomicInterval,
}

impl IntervalPair {
    pub fn new(first: GenomicInterval, second: GenomicInterval) -> Self {
        Self { first, second }
    }

    /// Build a record from the six required columns
    pub fn from_columns(
        chrom1: impl Into<String>,
        start1: u64,
        end1: u64,
        chrom2: impl Into<String>,
        start2: u64,
        end2: u64,
    ) -> Self {
        Self::new(
            GenomicInterval::new(chrom1, start1, end1),
            GenomicInterval::new(chrom2, start2, end2),
        )
    }
}

/// Row-ordered table of interval pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalTable {
    rows: Vec<IntervalPair>,
}

impl IntervalTable {
    pub fn new(rows: Vec<IntervalPair>) -> Self {
        Self { rows }
    }

    /// Read whitespace-separated BEDPE text (see [`crate::parse::parse_bedpe`])
    pub fn parse_bedpe(name: &str, source: &str) -> Result<Self, AnnotateError> {
        crate::parse::parse_bedpe(name, source).map(Self::new)
    }

    pub fn rows(&self) -> &[IntervalPair] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IntervalPair> {
        self.rows.iter()
    }

    /// Keep the rows matching `keep`, preserving table order
    pub fn filtered(&self, mut keep: impl FnMut(&IntervalPair) -> bool) -> Self {
        Self {
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

impl FromIterator<IntervalPair> for IntervalTable {
    fn from_iter<I: IntoIterator<Item = IntervalPair>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IntervalTable {
    type Item = &'a IntervalPair;
    type IntoIter = std::slice::Iter<'a, IntervalPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Chromosome naming convention of a genome assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub name: String,
    /// Prefix every chromosome name must carry, if any
    pub chrom_prefix: Option<String>,
}

impl Assembly {
    pub fn custom(name: impl Into<String>, chrom_prefix: Option<&str>) -> Self {
        Self {
            name: name.into(),
            chrom_prefix: chrom_prefix.map(str::to_string),
        }
    }

    /// Known UCSC-style assemblies use the `chr` prefix
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "hg19" | "hg38" | "mm9" | "mm10" | "mm39" | "dm6" | "danRer11" => {
                Some(Self::custom(name, Some("chr")))
            }
            _ => None,
        }
    }

    pub fn hg38() -> Self {
        Self::custom("hg38", Some("chr"))
    }

    /// Fail with `ChromosomeFormat` when `chrom` breaks the naming rule
    pub fn check_chrom(&self, chrom: &str) -> Result<(), AnnotateError> {
        match &self.chrom_prefix {
            Some(prefix) if !chrom.starts_with(prefix.as_str()) => {
                Err(AnnotateError::ChromosomeFormat {
                    chrom: chrom.to_string(),
                    assembly: self.name.clone(),
                    prefix: prefix.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for Assembly {
    fn default() -> Self {
        Self::preset(crate::defaults::ASSEMBLY).unwrap_or_else(Self::hg38)
    }
}
