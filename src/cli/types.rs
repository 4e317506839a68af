//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

use super::commands::{check::CheckArgs, show::ShowArgs};
use crate::infrastructure::config::DotenvSource;

#[derive(Parser, Debug)]
#[command(name = "scaffold")]
#[command(about = "Scaffold - project configuration and logging bootstrap", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Do not load variables from a .env file
    #[arg(long, global = true)]
    pub no_dotenv: bool,
}

impl Cli {
    pub const fn dotenv_source(&self) -> DotenvSource {
        if self.no_dotenv {
            DotenvSource::Disabled
        } else {
            DotenvSource::Search
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved configuration
    Show(ShowArgs),

    /// Load the configuration and initialize logging
    Check(CheckArgs),
}
