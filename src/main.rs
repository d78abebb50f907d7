use anyhow::Result;
use clap::Parser;
use frame_lens::{Cli, Commands, commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match &cli.command {
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Identify(args) => commands::identify::run(args),
        Commands::Completions { shell } => {
            Commands::generate_completions(*shell);
            Ok(())
        }
    }
}
