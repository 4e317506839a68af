//! Implementation of the `scaffold show` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::ConfigValue;
use crate::infrastructure::config::{ConfigLoader, DotenvSource, DEFAULT_CONFIG_PATH};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration file to load
    #[arg(short, long, env = "SCAFFOLD_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Dot-separated path of a sub-tree to print (e.g. `data.raw_path`)
    #[arg(short, long)]
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub value: ConfigValue,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.value).unwrap_or_default()
    }
}

pub fn execute(args: ShowArgs, json_mode: bool, dotenv: DotenvSource) -> Result<()> {
    let tree = ConfigLoader::new()
        .with_path(&args.config)
        .with_dotenv(dotenv)
        .load_tree()
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let value = match args.key.as_deref() {
        Some(key) => tree
            .get_path(key)
            .cloned()
            .with_context(|| format!("Key '{key}' not found in {}", args.config.display()))?,
        None => tree,
    };

    output(&ShowOutput { value }, json_mode);
    Ok(())
}
