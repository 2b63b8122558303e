use clap::Parser;
use pager::cli::Args;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let args = Args::parse();
    let debug = args.debug;

    match pager::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // no-op unless the failure came before run set up logging
            pager::init_tracing(debug);
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
