use clap::Parser;
use wrangler_cli::commands::GwasHeatmapArgs;
#[macro_use]
extern crate log;

// cargo run --release --bin gwas_heatmap -- -d <GWAS_DIR> -g <HAPMAP> -o <TABLE>
fn main() {
    let args = GwasHeatmapArgs::parse();
    wrangler_cli::init_logger(args.verbose);
    // The files are closed when `assemble_time_series` returns, before the exit.
    if let Err(why) = wrangler::gwas_series::assemble_time_series(&args.config()) {
        error!("{}", why);
        std::process::exit(1);
    }
}
