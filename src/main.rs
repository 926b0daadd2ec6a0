use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use bankdesk::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    cli.run()
}
