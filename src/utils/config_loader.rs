use crate::core::models::{default_bundler_command, BuildConfig, MinifyOptions};
use crate::utils::{Logger, Result, ShiboriError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file format (shibori.config.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiboriConfig {
    /// Bundler invocation as an argv vector (e.g. ["npx", "vite", "build"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundler: Option<Vec<String>>,

    /// Output directory the bundler writes to (default: "dist")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdir: Option<String>,

    /// Minifier options applied to every script chunk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<MinifyOptions>,
}

/// Config loader that supports config files with CLI override
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file if it exists
    /// Searches for shibori.config.json in the project root
    pub fn load_from_file(root: &Path) -> Result<Option<ShiboriConfig>> {
        let config_path = root.join("shibori.config.json");

        if !config_path.exists() {
            Logger::debug("No shibori.config.json found, using defaults");
            return Ok(None);
        }

        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(&config_path).map_err(ShiboriError::Io)?;

        let config: ShiboriConfig = serde_json::from_str(&content).map_err(|e| {
            ShiboriError::config(format!("Failed to parse shibori.config.json: {}", e))
        })?;

        Ok(Some(config))
    }

    /// Merge file config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(
        file_config: Option<ShiboriConfig>,
        root: PathBuf,
        outdir: Option<&str>,
        bundler: Option<Vec<String>>,
        no_mangle: bool,
        keep_comments: bool,
    ) -> BuildConfig {
        let base = file_config.unwrap_or(ShiboriConfig {
            bundler: None,
            outdir: None,
            minify: None,
        });

        let outdir_str = outdir
            .map(str::to_string)
            .or(base.outdir)
            .unwrap_or_else(|| "dist".to_string());

        // Resolve outdir relative to root if it's a relative path
        let resolved_outdir = if Path::new(&outdir_str).is_absolute() {
            PathBuf::from(outdir_str)
        } else {
            root.join(outdir_str)
        };

        let mut minify = base.minify.unwrap_or_default();
        if no_mangle {
            minify.mangle = false;
            minify.property_pattern = None;
        }
        if keep_comments {
            minify.strip_comments = false;
        }

        BuildConfig {
            root,
            outdir: resolved_outdir,
            bundler_command: bundler
                .or(base.bundler)
                .unwrap_or_else(default_bundler_command),
            minify,
        }
    }
}
