use anvil_loader::cli::commands;
use anvil_loader::cli::{parse_cli, Commands};
use std::process::ExitCode;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = parse_cli();

    match cli.command {
        Commands::Load { path, format } => commands::load(cli.config, path, format),
        Commands::Check { path } => commands::check(cli.config, path),
    }
}
