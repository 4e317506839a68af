//! Implementation of the `scaffold check` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::{ConfigLoader, DotenvSource, DEFAULT_CONFIG_PATH};
use crate::infrastructure::logging::configure;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file to load
    #[arg(short, long, env = "SCAFFOLD_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub success: bool,
    pub config_path: PathBuf,
    pub log_file: PathBuf,
    pub level: String,
    pub sections: Vec<String>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Configuration OK: {}",
            self.config_path.display()
        )];
        lines.push(format!("Logging at {} to {}", self.level, self.log_file.display()));
        if !self.sections.is_empty() {
            lines.push(format!("Sections: {}", self.sections.join(", ")));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: CheckArgs, json_mode: bool, dotenv: DotenvSource) -> Result<()> {
    let tree = ConfigLoader::new()
        .with_path(&args.config)
        .with_dotenv(dotenv)
        .load_tree()
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let logging = configure(&tree).context("Failed to configure logging")?;

    let logger = logging.logger("scaffold.check");
    logger.info(format_args!(
        "configuration check passed for {}",
        args.config.display()
    ));

    let result = CheckOutput {
        success: true,
        config_path: args.config,
        log_file: logging.log_file().to_path_buf(),
        level: logging.level().to_string(),
        sections: tree
            .as_mapping()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default(),
    };

    output(&result, json_mode);
    Ok(())
}
