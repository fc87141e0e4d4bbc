//! Pipelines -- run both wranglers from one TOML profile.
//!
//! ```toml
//! verbose = 1
//! summary = "run.summary.json"
//!
//! [gwas_series]
//! dir = "gwas/"
//! genotypes = "snps.hmp.txt"
//! outfile = "heatmap.csv"
//!
//! [barcode]
//! genotypes = "seed_stock.csv"
//! table = "phenotypes.tsv"
//! outfile = "phenotypes.genotyped.tsv"
//! ```
//! Every section is optional. All inputs are checked before any step starts.
use definitions::RunSummary;
use log::*;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wrangler::barcode::{annotate_table, BarcodeConfig};
use wrangler::gwas_series::{assemble_time_series, GwasSeriesConfig};
use wrangler::WrangleError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile: {0}")]
    Profile(#[from] toml::de::Error),
    #[error("can not write the summary: {0}")]
    Summary(#[from] serde_json::Error),
    #[error(transparent)]
    Wrangle(#[from] WrangleError),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PipelineConfig {
    #[serde(default)]
    pub verbose: u8,
    /// JSON dump of the [RunSummary](definitions::RunSummary).
    pub summary: Option<PathBuf>,
    pub gwas_series: Option<GwasSeriesProfile>,
    pub barcode: Option<BarcodeProfile>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GwasSeriesProfile {
    dir: PathBuf,
    genotypes: PathBuf,
    outfile: PathBuf,
    #[serde(default)]
    sort_days: bool,
}

impl GwasSeriesProfile {
    fn config(&self) -> GwasSeriesConfig {
        GwasSeriesConfig::new(&self.dir, &self.genotypes, &self.outfile, self.sort_days)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BarcodeProfile {
    genotypes: PathBuf,
    table: PathBuf,
    outfile: PathBuf,
}

impl BarcodeProfile {
    fn config(&self) -> BarcodeConfig {
        BarcodeConfig::new(&self.genotypes, &self.table, &self.outfile)
    }
}

pub fn load_profile(path: &Path) -> Result<PipelineConfig, PipelineError> {
    debug!("Opening {:?}", path);
    let mut rdr = std::fs::File::open(path).map(std::io::BufReader::new)?;
    let mut file = String::new();
    rdr.read_to_string(&mut file)?;
    Ok(toml::from_str(&file)?)
}

pub fn run_pipeline(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let gwas_series = config.gwas_series.as_ref().map(|x| x.config());
    let barcode = config.barcode.as_ref().map(|x| x.config());
    if gwas_series.is_none() && barcode.is_none() {
        warn!("The profile has neither [gwas_series] nor [barcode]. Nothing to do.");
    }
    if let Some(config) = gwas_series.as_ref() {
        config.validate()?;
    }
    if let Some(config) = barcode.as_ref() {
        config.validate()?;
    }
    let mut summary = RunSummary::default();
    if let Some(config) = gwas_series.as_ref() {
        debug!("START\tGWAS time series");
        summary.gwas_series = Some(assemble_time_series(config)?);
    }
    if let Some(config) = barcode.as_ref() {
        debug!("START\tBarcode to genotype");
        summary.barcode = Some(annotate_table(config)?);
    }
    if let Some(path) = config.summary.as_ref() {
        let mut wtr = std::fs::File::create(path).map(BufWriter::new)?;
        serde_json::ser::to_writer_pretty(&mut wtr, &summary)?;
        wtr.flush()?;
    }
    Ok(summary)
}
