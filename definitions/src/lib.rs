//! Definitions -- A tiny interface for the camelina table wranglers.
//! The library fills these structures from delimited text files, the CLI writes them back out,
//! and the pipeline dumps a [RunSummary](RunSummary) as JSON after a run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of a SNP, `<chromosome>.<position>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnpKey(String);

impl SnpKey {
    pub fn new(chromosome: &str, position: &str) -> Self {
        Self(format!("{chromosome}.{position}"))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SnpKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sampling timepoint, taken from the 3rd and 4th dot-separated segments of a result file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey(String);

impl DayKey {
    pub fn new(first: &str, second: &str) -> Self {
        Self(format!("{first}.{second}"))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-day GWAS values, laid out as a day x SNP table.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    /// Columns of the table, in the order of the reference file. Duplicates are kept.
    pub snps: Vec<SnpKey>,
    /// Rows of the table, in the order the result files were found.
    /// A day seen twice appears twice.
    pub days: Vec<DayKey>,
    /// Day -> SNP -> value. A later file for the same day replaces the earlier one.
    pub values: HashMap<DayKey, HashMap<SnpKey, String>>,
}

impl TimeSeries {
    pub fn new(snps: Vec<SnpKey>) -> Self {
        Self {
            snps,
            days: vec![],
            values: HashMap::new(),
        }
    }
    pub fn push_day(&mut self, day: DayKey, values: HashMap<SnpKey, String>) {
        self.days.push(day.clone());
        self.values.insert(day, values);
    }
    pub fn sort_days(&mut self) {
        self.days.sort();
    }
    pub fn value(&self, day: &DayKey, snp: &SnpKey) -> Option<&str> {
        self.values
            .get(day)
            .and_then(|values| values.get(snp))
            .map(|x| x.as_str())
    }
}

/// Barcode -> genotype label. Aliases are stored as ordinary barcodes.
#[derive(Debug, Clone, Default)]
pub struct GenotypeIndex {
    genotypes: HashMap<String, String>,
}

impl GenotypeIndex {
    pub fn new() -> Self {
        Self::default()
    }
    /// Last write wins.
    pub fn insert(&mut self, barcode: &str, genotype: &str) {
        self.genotypes
            .insert(barcode.to_string(), genotype.to_string());
    }
    pub fn get(&self, barcode: &str) -> Option<&str> {
        self.genotypes.get(barcode).map(|x| x.as_str())
    }
    pub fn len(&self) -> usize {
        self.genotypes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.genotypes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub days: usize,
    pub snps: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotateStats {
    pub rows: usize,
    pub matched: usize,
    pub unmatched: usize,
}

/// What a pipeline run did. Steps not run are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub gwas_series: Option<SeriesStats>,
    pub barcode: Option<AnnotateStats>,
}
