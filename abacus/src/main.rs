use std::process::ExitCode;

use crate::cli::Cli;
use crate::driver::Driver;

mod calculator;
mod cli;
mod driver;
mod editor;
mod keys;
mod logging;
mod report;

fn main() -> ExitCode {
    let cli = <Cli as clap::Parser>::parse();
    logging::init(cli.quiet);
    Driver::from_config(cli).run()
}
