use crate::core::{interfaces::*, services::MinifyPipeline};
use crate::infrastructure::{
    DirectoryBundler, MinificationService, ProcessBundler, TokioFileSystemService,
};
use crate::utils::{ConfigLoader, Logger, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "shibori")]
#[command(version)]
#[command(about = "Squeeze bundler output: run a build, then minify every script chunk in place")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bundler, then minify the produced script chunks
    Build {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Output directory the bundler writes to
        #[arg(short, long)]
        outdir: Option<String>,
        /// Bundler command to run, overriding the config file
        #[arg(long, num_args = 1.., value_name = "CMD")]
        bundler: Option<Vec<String>>,
        /// Disable identifier and property mangling
        #[arg(long)]
        no_mangle: bool,
        /// Keep comments and standard formatting in the output
        #[arg(long)]
        keep_comments: bool,
    },
    /// Minify the script chunks of an existing output directory
    Minify {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Output directory holding the chunks
        #[arg(short, long)]
        outdir: Option<String>,
        /// Disable identifier and property mangling
        #[arg(long)]
        no_mangle: bool,
        /// Keep comments and standard formatting in the output
        #[arg(long)]
        keep_comments: bool,
    },
    /// Show tool information
    Info,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        Logger::init();

        let cli = Cli::parse();

        match cli.command {
            Commands::Build {
                root,
                outdir,
                bundler,
                no_mangle,
                keep_comments,
            } => {
                self.handle_build_command(&root, outdir.as_deref(), bundler, no_mangle, keep_comments)
                    .await
            }
            Commands::Minify {
                root,
                outdir,
                no_mangle,
                keep_comments,
            } => {
                self.handle_minify_command(&root, outdir.as_deref(), no_mangle, keep_comments)
                    .await
            }
            Commands::Info => self.handle_info_command().await,
        }
    }

    async fn handle_build_command(
        &self,
        root: &str,
        outdir: Option<&str>,
        bundler: Option<Vec<String>>,
        no_mangle: bool,
        keep_comments: bool,
    ) -> Result<()> {
        let root = PathBuf::from(root);
        let file_config = ConfigLoader::load_from_file(&root)?;
        let config =
            ConfigLoader::merge_with_cli(file_config, root, outdir, bundler, no_mangle, keep_comments);

        let fs_service: Arc<dyn FileSystemService> = Arc::new(TokioFileSystemService);
        let bundler: Arc<dyn Bundler> = Arc::new(ProcessBundler::new(fs_service.clone()));
        let minifier: Arc<dyn ChunkMinifier> =
            Arc::new(MinificationService::new(config.minify.clone())?);

        let pipeline = MinifyPipeline::new(bundler, minifier, fs_service);
        pipeline.run(&config).await?;

        Ok(())
    }

    async fn handle_minify_command(
        &self,
        root: &str,
        outdir: Option<&str>,
        no_mangle: bool,
        keep_comments: bool,
    ) -> Result<()> {
        let root = PathBuf::from(root);
        let file_config = ConfigLoader::load_from_file(&root)?;
        let config =
            ConfigLoader::merge_with_cli(file_config, root, outdir, None, no_mangle, keep_comments);

        let fs_service: Arc<dyn FileSystemService> = Arc::new(TokioFileSystemService);
        let bundler: Arc<dyn Bundler> = Arc::new(DirectoryBundler::new(fs_service.clone()));
        let minifier: Arc<dyn ChunkMinifier> =
            Arc::new(MinificationService::new(config.minify.clone())?);

        let pipeline = MinifyPipeline::new(bundler, minifier, fs_service);
        pipeline.run(&config).await?;

        Ok(())
    }

    async fn handle_info_command(&self) -> Result<()> {
        tracing::info!("🗜️  shibori v{}", env!("CARGO_PKG_VERSION"));
        tracing::info!("══════════════════════════════════════");
        tracing::info!("Post-build minification pipeline for bundler output");
        tracing::info!("");
        tracing::info!("🏗️  Pipeline:");
        tracing::info!("  • Invokes your bundler once (vite, esbuild, ..)");
        tracing::info!("  • Minifies each .js chunk strictly in sequence");
        tracing::info!("  • oxc parser + minifier, property mangling pass");
        tracing::info!("  • Per-chunk size report with compression ratio");
        tracing::info!("");
        tracing::info!("🎯 Commands:");
        tracing::info!("  • build: bundle, then minify in place");
        tracing::info!("  • minify: re-run the pass over an existing build");

        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
