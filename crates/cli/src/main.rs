use std::process::ExitCode;

use clap::Parser;

use catalog_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    match catalog_cli::run(Cli::parse()).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
