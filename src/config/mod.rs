pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "stack-init")]
#[command(about = "Personalize a freshly cloned stack template")]
pub struct CliConfig {
    /// Template directory to initialize; its name becomes the project name
    #[arg(default_value = ".")]
    pub target_dir: PathBuf,

    /// Path to a TOML configuration file (defaults to <TARGET_DIR>/stack-init.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the placeholder token from the configuration
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Show what would be written without touching any file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Applies command-line overrides on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(placeholder) = &self.placeholder {
            tracing::info!("Placeholder overridden to: {}", placeholder);
            config.template.placeholder = placeholder.clone();
        }
    }
}
