use crate::domain::ports::SecretSource;
use crate::utils::error::{InitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name substituted for the placeholder everywhere in the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectName(String);

impl ProjectName {
    /// Takes the final path segment. Callers should canonicalize first so
    /// that `.` resolves to the real directory name.
    pub fn from_target_dir(target_dir: &Path) -> Result<Self> {
        let name = target_dir
            .file_name()
            .and_then(|segment| segment.to_str())
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| InitError::ProjectNameError {
                path: target_dir.to_path_buf(),
            })?;

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex-encoded session secret, generated once per run.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn generate(source: &dyn SecretSource, byte_len: usize) -> Result<Self> {
        let mut bytes = vec![0u8; byte_len];
        source.fill_bytes(&mut bytes)?;
        Ok(Self(hex::encode(bytes)))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    /// Relative to the target directory.
    pub path: String,
    pub content: String,
}

impl TextFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Everything read from the template before any transform runs.
#[derive(Debug, Clone)]
pub struct TemplateSources {
    pub readme: TextFile,
    pub env_template: TextFile,
    pub manifest: TextFile,
    pub deployments: Vec<TextFile>,
}

#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub file: TextFile,
    /// Placeholder occurrences found in the source text.
    pub replacements: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RenderedFiles {
    pub files: Vec<RenderedFile>,
}

impl RenderedFiles {
    pub fn get(&self, path: &str) -> Option<&TextFile> {
        self.files
            .iter()
            .map(|rendered| &rendered.file)
            .find(|file| file.path == path)
    }

    pub fn paths(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|rendered| rendered.file.path.clone())
            .collect()
    }
}
