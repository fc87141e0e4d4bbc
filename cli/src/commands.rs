//! Command-line arguments of `gwas_heatmap`, `barcode_to_genotype`, and `wrangle`.
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use wrangler::barcode::BarcodeConfig;
use wrangler::gwas_series::GwasSeriesConfig;

#[derive(Parser, Debug)]
#[command(name = "gwas_heatmap")]
#[command(author = "Bansho Masutani<ban-m@g.ecc.u-tokyo.ac.jp>")]
#[command(version, long_about = None)]
/// Assemble per-day GWAS results into a day x SNP table.
pub struct GwasHeatmapArgs {
    /// Input GWAS directory. Searched recursively for *GWAS.Results.csv files.
    #[arg(short, long)]
    pub dir: PathBuf,
    /// Output table file.
    #[arg(short, long)]
    pub outfile: PathBuf,
    /// Input genotype hapmap file.
    #[arg(short, long)]
    pub genotypes: PathBuf,
    /// Sort the days instead of keeping the order the files were found in.
    #[arg(long = "sort_days")]
    pub sort_days: bool,
    /// Debug mode
    #[arg(short, action = ArgAction::Count)]
    pub verbose: u8,
}

impl GwasHeatmapArgs {
    pub fn config(&self) -> GwasSeriesConfig {
        GwasSeriesConfig::new(&self.dir, &self.genotypes, &self.outfile, self.sort_days)
    }
}

#[derive(Parser, Debug)]
#[command(name = "barcode_to_genotype")]
#[command(author = "Bansho Masutani<ban-m@g.ecc.u-tokyo.ac.jp>")]
#[command(version, long_about = None)]
/// Convert camelina plant barcodes to genotypes.
pub struct BarcodeArgs {
    /// Input file containing the seed stock (genotypes) table.
    /// The file should be comma-separated. Columns barcode, genotype, and aliases should exist.
    #[arg(short, long)]
    pub genotypes: PathBuf,
    /// Input file containing the phenotype/genotype table to be converted.
    /// First column should contain the ID to be converted. Assumes tab-delimited.
    #[arg(short, long)]
    pub table: PathBuf,
    /// Output file with converted IDs.
    #[arg(short, long)]
    pub outfile: PathBuf,
    /// Debug mode
    #[arg(short, action = ArgAction::Count)]
    pub verbose: u8,
}

impl BarcodeArgs {
    pub fn config(&self) -> BarcodeConfig {
        BarcodeConfig::new(&self.genotypes, &self.table, &self.outfile)
    }
}

#[derive(Parser, Debug)]
#[command(name = "wrangle")]
#[command(author = "Bansho Masutani<ban-m@g.ecc.u-tokyo.ac.jp>")]
#[command(version, long_about = None)]
/// Camelina table wrangling.
pub struct WrangleArgs {
    #[command(subcommand)]
    pub command: WrangleCommand,
}

#[derive(Subcommand, Debug)]
pub enum WrangleCommand {
    /// Run the steps listed in a TOML profile.
    #[command(name = "pipeline")]
    Pipeline {
        /// TOML profile.
        #[arg(short, long)]
        profile: PathBuf,
    },
    #[command(name = "gwas_heatmap")]
    GwasHeatmap(GwasHeatmapArgs),
    #[command(name = "barcode_to_genotype")]
    BarcodeToGenotype(BarcodeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn gwas_heatmap_flags() {
        let args = ["gwas_heatmap", "-d", "gwas", "--outfile", "out.csv", "-g", "snps.hmp"];
        let args = GwasHeatmapArgs::try_parse_from(args).unwrap();
        assert_eq!(args.dir, PathBuf::from("gwas"));
        assert_eq!(args.outfile, PathBuf::from("out.csv"));
        assert_eq!(args.genotypes, PathBuf::from("snps.hmp"));
        assert!(!args.sort_days);
        assert_eq!(args.verbose, 0);
        let args = ["gwas_heatmap", "-d", "g", "-o", "o", "-g", "h", "--sort_days", "-vv"];
        let args = GwasHeatmapArgs::try_parse_from(args).unwrap();
        assert!(args.sort_days);
        assert_eq!(args.verbose, 2);
    }
    #[test]
    fn required_flags() {
        assert!(GwasHeatmapArgs::try_parse_from(["gwas_heatmap", "-d", "gwas"]).is_err());
        assert!(BarcodeArgs::try_parse_from(["barcode_to_genotype", "-g", "a", "-t", "b"]).is_err());
    }
    #[test]
    fn barcode_flags() {
        let args = ["barcode_to_genotype", "-g", "seed.csv", "-t", "pheno.tsv", "-o", "out.tsv"];
        let args = BarcodeArgs::try_parse_from(args).unwrap();
        assert_eq!(args.table, PathBuf::from("pheno.tsv"));
    }
    #[test]
    fn subcommands() {
        let args = ["wrangle", "pipeline", "--profile", "run.toml"];
        match WrangleArgs::try_parse_from(args).unwrap().command {
            WrangleCommand::Pipeline { profile } => assert_eq!(profile, PathBuf::from("run.toml")),
            x => panic!("{:?}", x),
        }
        let args = ["wrangle", "barcode_to_genotype", "-g", "a", "-t", "b", "-o", "c", "-v"];
        match WrangleArgs::try_parse_from(args).unwrap().command {
            WrangleCommand::BarcodeToGenotype(args) => assert_eq!(args.verbose, 1),
            x => panic!("{:?}", x),
        }
    }
    #[test]
    fn clap_definition() {
        use clap::CommandFactory;
        WrangleArgs::command().debug_assert();
    }
}
