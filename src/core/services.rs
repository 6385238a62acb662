use crate::core::{interfaces::*, models::*};
use crate::utils::{Logger, Result, ShiboriUI, Timer};
use std::sync::Arc;

/// Drives the build-then-minify sequence: one bundler invocation, then a
/// strict sequential fold over the script chunks. Each minification is
/// awaited before the next starts, so progress output stays in order and at
/// most one CPU-heavy minify runs at a time. The first failure aborts the
/// remaining chunks; already-minified chunks stay minified on disk.
pub struct MinifyPipeline {
    bundler: Arc<dyn Bundler>,
    minifier: Arc<dyn ChunkMinifier>,
    fs_service: Arc<dyn FileSystemService>,
    ui: ShiboriUI,
}

impl MinifyPipeline {
    pub fn new(
        bundler: Arc<dyn Bundler>,
        minifier: Arc<dyn ChunkMinifier>,
        fs_service: Arc<dyn FileSystemService>,
    ) -> Self {
        Self {
            bundler,
            minifier,
            fs_service,
            ui: ShiboriUI::new(),
        }
    }

    pub async fn run(&self, config: &BuildConfig) -> Result<PipelineResult> {
        let timer = Timer::start("build + minify");
        self.ui.show_banner();

        let chunks = self.bundler.bundle(config).await?;

        let script_chunks: Vec<&ChunkInfo> = chunks.iter().filter(|c| c.is_script()).collect();
        Logger::chunks_found(chunks.len(), script_chunks.len());

        let total = script_chunks.len();
        let mut reports = Vec::with_capacity(total);
        for (i, chunk) in script_chunks.iter().enumerate() {
            let report = self
                .process_chunk(config, &chunk.file_name, i + 1, total)
                .await?;
            reports.push(report);
        }

        let result = PipelineResult {
            reports,
            skipped: chunks.len() - total,
            duration: timer.elapsed(),
        };
        self.ui.show_completion(&result);
        Ok(result)
    }

    /// Read, minify, overwrite in place, report. The file is only rewritten
    /// after a successful minify, so a failing chunk keeps its original
    /// bytes.
    async fn process_chunk(
        &self,
        config: &BuildConfig,
        file_name: &str,
        index: usize,
        total: usize,
    ) -> Result<ChunkReport> {
        let path = config.outdir.join(file_name);

        let original = self.fs_service.read_file(&path).await?;
        let minified = self.minifier.minify(&original, file_name).await?;
        self.fs_service.write_file(&path, &minified).await?;

        let report = ChunkReport {
            file_name: file_name.to_string(),
            index,
            total,
            sizes: SizeReport {
                original_bytes: original.len(),
                minified_bytes: minified.len(),
            },
        };
        self.ui.progress_line(&report);
        Ok(report)
    }
}
