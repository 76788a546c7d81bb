pub mod engine;
pub mod manifest;
pub mod ordering;
pub mod pipeline;
pub mod substitute;

pub use crate::domain::model::{
    ProjectName, RenderedFile, RenderedFiles, SecretValue, TemplateSources, TextFile,
};
pub use crate::domain::ports::{ConfigProvider, KeyOrdering, Pipeline, SecretSource, Storage};
pub use crate::utils::error::Result;
