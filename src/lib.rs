pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, OsSecretSource};
pub use config::TomlConfig;
pub use crate::core::{engine::InitEngine, pipeline::TemplatePipeline};
pub use utils::error::{InitError, Result};

use crate::core::ordering::{PackageJsonOrder, PreserveOrder};
use crate::core::ProjectName;
use crate::utils::validation::Validate;
use std::path::{Path, PathBuf};

pub type TemplateEngine = InitEngine<TemplatePipeline<LocalStorage, TomlConfig>>;

pub const NEXT_STEPS: &str = "\
Setup is almost complete. Follow these steps to finish initialization:

- Start the database:
  npm run docker

- Run setup (this runs the tests and things to verify things got setup properly):
  npm run setup

- You're now ready to rock and roll 🤘
  npm run dev";

/// Canonical absolute path of the target directory; fails if it does not exist.
pub async fn resolve_target_dir(target_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let target_dir = target_dir.as_ref();
    tokio::fs::canonicalize(target_dir)
        .await
        .map_err(|source| InitError::ReadError {
            path: target_dir.to_path_buf(),
            source,
        })
}

/// Wires the default collaborators around an already resolved directory.
pub fn template_engine(target_dir: &Path, config: TomlConfig) -> Result<TemplateEngine> {
    config.validate()?;

    let project_name = ProjectName::from_target_dir(target_dir)?;
    tracing::info!("Project name: {}", project_name);

    let sort_keys = config.manifest.sort_keys;
    let pipeline = TemplatePipeline::new(LocalStorage::new(target_dir), config, project_name);
    let pipeline = if sort_keys {
        pipeline.with_key_ordering(PackageJsonOrder)
    } else {
        pipeline.with_key_ordering(PreserveOrder)
    };

    Ok(InitEngine::new(pipeline))
}

/// Initializes `target_dir` without printing anything. Returns the written paths.
pub async fn initialize(target_dir: impl AsRef<Path>, config: TomlConfig) -> Result<Vec<String>> {
    let target_dir = resolve_target_dir(target_dir).await?;
    template_engine(&target_dir, config)?.run().await
}

/// Initializes `target_dir` with the default layout and prints the next steps.
pub async fn run(target_dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let written = initialize(target_dir, TomlConfig::default()).await?;
    print_next_steps();
    Ok(written)
}

pub fn print_next_steps() {
    println!("{}", NEXT_STEPS);
}
