use crate::core::{Pipeline, RenderedFiles};
use crate::utils::error::Result;

pub struct InitEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> InitEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Reads, transforms and writes the template. Returns the written paths.
    pub async fn run(&self) -> Result<Vec<String>> {
        let rendered = self.plan().await?;

        tracing::info!("Writing {} files...", rendered.files.len());
        let written = self.pipeline.load(rendered).await?;
        tracing::info!("Wrote {} files", written.len());

        Ok(written)
    }

    /// Dry run: everything except the write stage.
    pub async fn plan(&self) -> Result<RenderedFiles> {
        tracing::info!("Reading template files...");
        let sources = self.pipeline.extract().await?;
        tracing::info!(
            "Read {} template files",
            sources.deployments.len() + 3
        );

        tracing::info!("Personalizing template...");
        let rendered = self.pipeline.transform(sources).await?;
        tracing::debug!("Rendered {} files", rendered.files.len());

        Ok(rendered)
    }
}
