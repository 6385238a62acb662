use crate::core::models::*;
use crate::utils::Result;
use async_trait::async_trait;
use std::path::Path;

/// The bundler collaborator. Opaque: given the build configuration it
/// produces output chunks under `config.outdir` and yields their names.
/// Every yielded name must correspond to an existing file there.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, config: &BuildConfig) -> Result<Vec<ChunkInfo>>;
}

/// The minifier collaborator: source text in, minified text out.
#[async_trait]
pub trait ChunkMinifier: Send + Sync {
    async fn minify(&self, source: &str, file_name: &str) -> Result<String>;
}

/// File system operations interface
#[async_trait]
pub trait FileSystemService: Send + Sync {
    async fn read_file(&self, path: &Path) -> Result<String>;
    async fn write_file(&self, path: &Path, content: &str) -> Result<()>;
    /// All files under `path`, recursively.
    async fn list_files(&self, path: &Path) -> Result<Vec<std::path::PathBuf>>;
    fn file_exists(&self, path: &Path) -> bool;
}
