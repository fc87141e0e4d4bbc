//! Barcode to genotype -- append a `genotype` column to a tab-separated phenotype table.
//!
//! The seed stock table is comma-separated and must have `barcode`, `genotype`, and `aliases`
//! columns. An unknown barcode is not an error: the row gets [SENTINEL](SENTINEL) and one line
//! goes to the diagnostic stream.
use crate::chomp;
use crate::error::{malformed, require_file, Result, WrangleError};
use definitions::{AnnotateStats, GenotypeIndex};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SENTINEL: &str = "NA";
pub const GENOTYPE_COLUMN: &str = "genotype";
const BARCODE_COLUMN: &str = "barcode";
const ALIAS_COLUMN: &str = "aliases";

#[derive(Debug, Clone)]
pub struct BarcodeConfig {
    genotypes: PathBuf,
    table: PathBuf,
    outfile: PathBuf,
}

impl BarcodeConfig {
    pub fn new(genotypes: &Path, table: &Path, outfile: &Path) -> Self {
        Self {
            genotypes: genotypes.to_path_buf(),
            table: table.to_path_buf(),
            outfile: outfile.to_path_buf(),
        }
    }
    pub fn validate(&self) -> Result<()> {
        require_file(&self.genotypes, "Genotypes table")?;
        require_file(&self.table, "Phenotype/genotype table")
    }
}

/// Annotates `config.table` into `config.outfile`. Unknown barcodes are reported on stderr.
pub fn annotate_table(config: &BarcodeConfig) -> Result<AnnotateStats> {
    config.validate()?;
    let index = GenotypeIndex::from_file(&config.genotypes)?;
    debug!("BARCODES\t{}", index.len());
    let mut wtr = File::create(&config.outfile).map(BufWriter::new)?;
    let table = File::open(&config.table).map(BufReader::new)?;
    let stderr = std::io::stderr();
    let mut diagnostics = stderr.lock();
    let stats = annotate(&index, table, &mut wtr, &mut diagnostics)?;
    wtr.flush()?;
    info!(
        "Annotated {} rows. {} barcodes were not found.",
        stats.rows, stats.unmatched
    );
    Ok(stats)
}

pub trait ReadGenotypes: Sized {
    fn from_file(path: &Path) -> Result<Self>;
    /// `source` is only used in error messages.
    fn from_reader<R: BufRead>(reader: R, source: &Path) -> Result<Self>;
}

impl ReadGenotypes for GenotypeIndex {
    fn from_file(path: &Path) -> Result<Self> {
        debug!("Opening {:?}", path);
        let reader = File::open(path).map(BufReader::new)?;
        Self::from_reader(reader, path)
    }
    fn from_reader<R: BufRead>(reader: R, source: &Path) -> Result<Self> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(header) => header?,
            None => String::new(),
        };
        // A repeated column name refers to its last occurrence.
        let columns: HashMap<_, _> = chomp(&header)
            .split(',')
            .enumerate()
            .map(|(i, field)| (field.to_string(), i))
            .collect();
        let column = |name: &'static str| match columns.get(name) {
            Some(&i) => Ok(i),
            None => Err(WrangleError::MissingColumn {
                path: source.to_path_buf(),
                column: name,
            }),
        };
        let barcode = column(BARCODE_COLUMN)?;
        let genotype = column(GENOTYPE_COLUMN)?;
        let alias = column(ALIAS_COLUMN)?;
        let width = barcode.max(genotype).max(alias) + 1;
        let mut index = GenotypeIndex::new();
        for (idx, line) in lines.enumerate() {
            let line = line?;
            let line = chomp(&line);
            if line.is_empty() {
                continue;
            }
            let values: Vec<_> = line.split(',').collect();
            if values.len() < width {
                let message = format!("{} comma-separated fields, need {}", values.len(), width);
                // +1 for the header.
                return Err(malformed(source, idx + 1, message));
            }
            index.insert(values[barcode], values[genotype]);
            if !values[alias].is_empty() {
                index.insert(values[alias], values[genotype]);
            }
        }
        Ok(index)
    }
}

/// Copies `table` to `wtr` with the genotype of each row's first field appended.
pub fn annotate<R: BufRead, W: Write, E: Write>(
    index: &GenotypeIndex,
    table: R,
    wtr: &mut W,
    diagnostics: &mut E,
) -> Result<AnnotateStats> {
    let mut lines = table.lines();
    let header = match lines.next() {
        Some(header) => header?,
        None => String::new(),
    };
    writeln!(wtr, "{}\t{}", chomp(&header), GENOTYPE_COLUMN)?;
    let mut stats = AnnotateStats::default();
    for line in lines {
        let line = line?;
        // A blank row has the empty string as its barcode.
        let line = chomp(&line);
        stats.rows += 1;
        let barcode = line.split('\t').next().unwrap_or_default();
        let genotype = match index.get(barcode) {
            Some(genotype) => {
                stats.matched += 1;
                genotype
            }
            None => {
                stats.unmatched += 1;
                writeln!(
                    diagnostics,
                    "The barcode {} is not in the genotype table.",
                    barcode
                )?;
                SENTINEL
            }
        };
        writeln!(wtr, "{}\t{}", line, genotype)?;
    }
    Ok(stats)
}
