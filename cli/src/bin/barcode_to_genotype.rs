use clap::Parser;
use wrangler_cli::commands::BarcodeArgs;
#[macro_use]
extern crate log;

// cargo run --release --bin barcode_to_genotype -- -g <SEED_STOCK> -t <TABLE> -o <OUTPUT>
fn main() {
    let args = BarcodeArgs::parse();
    wrangler_cli::init_logger(args.verbose);
    if let Err(why) = wrangler::barcode::annotate_table(&args.config()) {
        error!("{}", why);
        std::process::exit(1);
    }
}
