use clap::Parser;
use std::process::ExitCode;

use seedvec::cli::Cli;
use seedvec::SeedvecConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = SeedvecConfig::from_cli(&cli);

    match seedvec::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
