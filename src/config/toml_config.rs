use crate::core::ConfigProvider;
use crate::utils::error::{InitError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_unique, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PLACEHOLDER: &str = "techno-stack-template";
pub const DEFAULT_SECRET_BYTES: usize = 16;
pub const MAX_SECRET_BYTES: usize = 64;
/// Looked up in the target directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "stack-init.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub template: TemplateConfig,
    pub files: FilesConfig,
    pub manifest: ManifestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub placeholder: String,
    pub secret_bytes: usize,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            secret_bytes: DEFAULT_SECRET_BYTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub readme: String,
    pub env_template: String,
    pub env_output: String,
    pub manifest: String,
    pub deployments: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            readme: "README.md".to_string(),
            env_template: ".env.example".to_string(),
            env_output: ".env".to_string(),
            manifest: "package.json".to_string(),
            deployments: vec![
                "k3s/0_namespace.yml".to_string(),
                "k3s/1_deployment.yml".to_string(),
                "k3s/2_service.yml".to_string(),
                "k3s/3_ingress.yml".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// false keeps the manifest's own key order
    pub sort_keys: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self { sort_keys: true }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|source| InitError::ReadError {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InitError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Uses `config_path` when given, otherwise `stack-init.toml` in the
    /// target directory, otherwise the built-in defaults.
    pub fn discover(target_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            tracing::info!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        let local = target_dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            tracing::info!("Loading configuration from {}", local.display());
            return Self::from_file(local);
        }

        tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// 替換環境變數 (例如 ${APP_PLACEHOLDER})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("template.placeholder", &self.template.placeholder)?;
        validate_range(
            "template.secret_bytes",
            self.template.secret_bytes,
            DEFAULT_SECRET_BYTES,
            MAX_SECRET_BYTES,
        )?;

        validate_path("files.readme", &self.files.readme)?;
        validate_path("files.env_template", &self.files.env_template)?;
        validate_path("files.env_output", &self.files.env_output)?;
        validate_path("files.manifest", &self.files.manifest)?;
        for deployment in &self.files.deployments {
            validate_path("files.deployments", deployment)?;
        }

        if self.files.env_output.trim_start_matches("./")
            == self.files.env_template.trim_start_matches("./")
        {
            return Err(InitError::InvalidConfigValueError {
                field: "files.env_output".to_string(),
                value: self.files.env_output.clone(),
                reason: "Output must not overwrite the environment template".to_string(),
            });
        }

        let outputs = [
            self.files.readme.as_str(),
            self.files.env_output.as_str(),
            self.files.manifest.as_str(),
        ]
        .into_iter()
        .chain(self.files.deployments.iter().map(String::as_str));
        validate_unique("files", outputs)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn placeholder(&self) -> &str {
        &self.template.placeholder
    }

    fn readme_path(&self) -> &str {
        &self.files.readme
    }

    fn env_template_path(&self) -> &str {
        &self.files.env_template
    }

    fn env_output_path(&self) -> &str {
        &self.files.env_output
    }

    fn manifest_path(&self) -> &str {
        &self.files.manifest
    }

    fn deployment_files(&self) -> &[String] {
        &self.files.deployments
    }

    fn secret_bytes(&self) -> usize {
        self.template.secret_bytes
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
