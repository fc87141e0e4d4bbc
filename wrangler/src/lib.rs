//! Wrangler -- the two table transforms behind the camelina CLI.
//!
//! - [gwas_series](gwas_series) joins per-day GWAS result files into one day x SNP table.
//! - [barcode](barcode) appends a genotype column to a phenotype table, keyed by plant barcode.
pub mod barcode;
pub mod error;
pub mod gwas_series;
#[macro_use]
extern crate log;
pub use error::{Result, WrangleError};

/// Strips a trailing carriage return left by `lines()` on CRLF files.
pub(crate) fn chomp(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
