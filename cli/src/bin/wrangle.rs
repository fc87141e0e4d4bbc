use clap::Parser;
use wrangler_cli::commands::{WrangleArgs, WrangleCommand};
use wrangler_cli::pipeline::PipelineError;
#[macro_use]
extern crate log;

fn main() {
    let args = WrangleArgs::parse();
    if let Err(why) = run(args.command) {
        error!("{}", why);
        std::process::exit(1);
    }
}

fn run(command: WrangleCommand) -> Result<(), PipelineError> {
    match command {
        WrangleCommand::Pipeline { profile } => {
            let config = match wrangler_cli::pipeline::load_profile(&profile) {
                Ok(config) => config,
                Err(why) => {
                    // The profile carries the verbosity, so there is no logger yet.
                    wrangler_cli::init_logger(0);
                    return Err(why);
                }
            };
            wrangler_cli::init_logger(config.verbose);
            let summary = wrangler_cli::pipeline::run_pipeline(&config)?;
            debug!("{:?}", summary);
        }
        WrangleCommand::GwasHeatmap(args) => {
            wrangler_cli::init_logger(args.verbose);
            wrangler::gwas_series::assemble_time_series(&args.config())?;
        }
        WrangleCommand::BarcodeToGenotype(args) => {
            wrangler_cli::init_logger(args.verbose);
            wrangler::barcode::annotate_table(&args.config())?;
        }
    }
    Ok(())
}
