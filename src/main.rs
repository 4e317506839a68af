//! Scaffold CLI entry point.

use clap::Parser;

use scaffold::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let dotenv = cli.dotenv_source();

    let result = match cli.command {
        Commands::Show(args) => scaffold::cli::commands::show::execute(args, cli.json, dotenv),
        Commands::Check(args) => scaffold::cli::commands::check::execute(args, cli.json, dotenv),
    };

    if let Err(err) = result {
        scaffold::cli::handle_error(&err, cli.json);
    }
}
