use crate::domain::model::{RenderedFiles, TemplateSources};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Template layout: which files are read and written, relative to the target directory.
pub trait ConfigProvider: Send + Sync {
    fn placeholder(&self) -> &str;
    fn readme_path(&self) -> &str;
    fn env_template_path(&self) -> &str;
    fn env_output_path(&self) -> &str;
    fn manifest_path(&self) -> &str;
    fn deployment_files(&self) -> &[String];
    fn secret_bytes(&self) -> usize;
}

/// Source of random bytes for the session secret.
pub trait SecretSource: Send + Sync {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<()>;
}

/// Canonical key order for the package manifest. Implementations must not
/// drop or duplicate keys.
pub trait KeyOrdering: Send + Sync {
    fn reorder(&self, manifest: Map<String, Value>) -> Map<String, Value>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<TemplateSources>;
    async fn transform(&self, sources: TemplateSources) -> Result<RenderedFiles>;
    async fn load(&self, rendered: RenderedFiles) -> Result<Vec<String>>;
}
