use crate::adapters::OsSecretSource;
use crate::core::manifest::rewrite_manifest;
use crate::core::ordering::PackageJsonOrder;
use crate::core::substitute::{PlaceholderPattern, SessionSecretLine};
use crate::core::{
    ConfigProvider, KeyOrdering, Pipeline, ProjectName, RenderedFile, RenderedFiles,
    SecretSource, SecretValue, Storage, TemplateSources, TextFile,
};
use crate::utils::error::{InitError, Result};
use futures::future::try_join_all;

/// Personalizes a cloned template: placeholder substitution, a fresh session
/// secret, and a rewritten package manifest.
pub struct TemplatePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    project_name: ProjectName,
    secrets: Box<dyn SecretSource>,
    ordering: Box<dyn KeyOrdering>,
}

impl<S: Storage, C: ConfigProvider> TemplatePipeline<S, C> {
    pub fn new(storage: S, config: C, project_name: ProjectName) -> Self {
        Self {
            storage,
            config,
            project_name,
            secrets: Box::new(OsSecretSource),
            ordering: Box::new(PackageJsonOrder),
        }
    }

    pub fn with_secret_source(mut self, secrets: impl SecretSource + 'static) -> Self {
        self.secrets = Box::new(secrets);
        self
    }

    pub fn with_key_ordering(mut self, ordering: impl KeyOrdering + 'static) -> Self {
        self.ordering = Box::new(ordering);
        self
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    async fn read_text(&self, path: &str) -> Result<TextFile> {
        let bytes = self.storage.read_file(path).await?;
        let content = String::from_utf8(bytes).map_err(|_| InitError::EncodingError {
            path: path.to_string(),
        })?;
        Ok(TextFile::new(path, content))
    }

    fn substitute(&self, pattern: &PlaceholderPattern, source: TextFile) -> RenderedFile {
        let replacements = pattern.count(&source.content);
        if replacements == 0 {
            tracing::debug!("No placeholder found in {}", source.path);
        }

        let content = pattern
            .replace_all(&source.content, self.project_name.as_str())
            .into_owned();

        RenderedFile {
            file: TextFile::new(source.path, content),
            replacements,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TemplatePipeline<S, C> {
    async fn extract(&self) -> Result<TemplateSources> {
        let deployment_reads = self
            .config
            .deployment_files()
            .iter()
            .map(|path| self.read_text(path));

        // 所有讀取完成後才開始轉換
        let (readme, env_template, manifest, deployments) = tokio::try_join!(
            self.read_text(self.config.readme_path()),
            self.read_text(self.config.env_template_path()),
            self.read_text(self.config.manifest_path()),
            try_join_all(deployment_reads),
        )?;

        tracing::debug!("Read {} deployment manifests", deployments.len());

        Ok(TemplateSources {
            readme,
            env_template,
            manifest,
            deployments,
        })
    }

    async fn transform(&self, sources: TemplateSources) -> Result<RenderedFiles> {
        let pattern = PlaceholderPattern::new(self.config.placeholder())?;
        let secret = SecretValue::generate(self.secrets.as_ref(), self.config.secret_bytes())?;

        let mut files = Vec::with_capacity(sources.deployments.len() + 3);

        files.push(self.substitute(&pattern, sources.readme));

        let secret_line = SessionSecretLine::new()?;
        let env_template = sources.env_template;
        let env_content = match secret_line.inject(&env_template.content, &secret) {
            Some(content) => content,
            None => {
                tracing::warn!(
                    "No SESSION_SECRET line in {}; copying it unchanged",
                    env_template.path
                );
                env_template.content
            }
        };
        files.push(RenderedFile {
            file: TextFile::new(self.config.env_output_path(), env_content),
            replacements: 0,
        });

        let manifest_content = rewrite_manifest(
            &sources.manifest.path,
            &sources.manifest.content,
            &self.project_name,
            self.ordering.as_ref(),
        )?;
        files.push(RenderedFile {
            file: TextFile::new(sources.manifest.path, manifest_content),
            replacements: 0,
        });

        for deployment in sources.deployments {
            files.push(self.substitute(&pattern, deployment));
        }

        let total: usize = files.iter().map(|rendered| rendered.replacements).sum();
        tracing::debug!(
            "Replaced {} placeholder occurrences with '{}'",
            total,
            self.project_name
        );

        Ok(RenderedFiles { files })
    }

    async fn load(&self, rendered: RenderedFiles) -> Result<Vec<String>> {
        let writes = rendered.files.iter().map(|rendered| {
            self.storage
                .write_file(&rendered.file.path, rendered.file.content.as_bytes())
        });

        // 寫入失敗不回滾
        try_join_all(writes).await?;

        Ok(rendered.paths())
    }
}
