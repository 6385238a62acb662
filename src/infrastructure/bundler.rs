use crate::core::{interfaces::*, models::*};
use crate::utils::{Logger, Result, ShiboriError, Timer};
use std::path::Path;
use std::sync::Arc;
use tokio::process::Command;

/// Runs the configured external bundler command from the project root, then
/// enumerates what it wrote under the output directory.
pub struct ProcessBundler {
    fs_service: Arc<dyn FileSystemService>,
}

impl ProcessBundler {
    pub fn new(fs_service: Arc<dyn FileSystemService>) -> Self {
        Self { fs_service }
    }
}

#[async_trait::async_trait]
impl Bundler for ProcessBundler {
    async fn bundle(&self, config: &BuildConfig) -> Result<Vec<ChunkInfo>> {
        let _timer = Timer::start("bundler invocation");

        let (program, args) = config
            .bundler_command
            .split_first()
            .ok_or_else(|| ShiboriError::config("bundler command is empty".to_string()))?;

        Logger::bundler_start(&config.bundler_command.join(" "));

        let output = Command::new(program)
            .args(args)
            .current_dir(&config.root)
            .output()
            .await
            .map_err(|e| ShiboriError::build(format!("failed to spawn bundler `{}`: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ShiboriError::build(format!(
                "bundler exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        if !self.fs_service.file_exists(&config.outdir) {
            return Err(ShiboriError::build(format!(
                "bundler produced no output directory at {}",
                config.outdir.display()
            )));
        }

        collect_chunks(self.fs_service.as_ref(), &config.outdir).await
    }
}

/// Enumerates an existing output directory without invoking anything. Backs
/// the `minify` subcommand, which re-runs the minification pass over a
/// previous build.
pub struct DirectoryBundler {
    fs_service: Arc<dyn FileSystemService>,
}

impl DirectoryBundler {
    pub fn new(fs_service: Arc<dyn FileSystemService>) -> Self {
        Self { fs_service }
    }
}

#[async_trait::async_trait]
impl Bundler for DirectoryBundler {
    async fn bundle(&self, config: &BuildConfig) -> Result<Vec<ChunkInfo>> {
        Logger::scanning_outdir(&config.outdir.display().to_string());

        if !self.fs_service.file_exists(&config.outdir) {
            return Err(ShiboriError::build(format!(
                "output directory {} does not exist",
                config.outdir.display()
            )));
        }

        collect_chunks(self.fs_service.as_ref(), &config.outdir).await
    }
}

/// Chunk names are paths relative to the output directory, sorted so
/// processing order is deterministic.
async fn collect_chunks(fs_service: &dyn FileSystemService, outdir: &Path) -> Result<Vec<ChunkInfo>> {
    let files = fs_service.list_files(outdir).await?;

    let mut chunks: Vec<ChunkInfo> = files
        .iter()
        .filter_map(|path| path.strip_prefix(outdir).ok())
        .map(|relative| ChunkInfo::new(relative.to_string_lossy().into_owned()))
        .collect();
    chunks.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    if chunks.is_empty() {
        Logger::warn(&format!("no chunks found under {}", outdir.display()));
    }

    Ok(chunks)
}
