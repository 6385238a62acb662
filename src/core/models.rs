use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Merged build configuration (config file + CLI, CLI wins).
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub root: PathBuf,
    pub outdir: PathBuf,
    /// Bundler invocation as an argv vector, run from `root`.
    pub bundler_command: Vec<String>,
    pub minify: MinifyOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            outdir: PathBuf::from("dist"),
            bundler_command: default_bundler_command(),
            minify: MinifyOptions::default(),
        }
    }
}

pub fn default_bundler_command() -> Vec<String> {
    vec!["npx".to_string(), "vite".to_string(), "build".to_string()]
}

/// Minifier options, constructed once and shared immutably across every
/// chunk of a run. The rename cache deliberately lives elsewhere (inside the
/// property mangler) so nothing observable leaks between calls through this
/// value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinifyOptions {
    /// Rename local identifiers to shorter names.
    pub mangle: bool,
    /// Emit compact output with all comments dropped.
    pub strip_comments: bool,
    /// Names the property mangler must never rename.
    pub reserved: Vec<String>,
    /// Regex selecting generated property names eligible for renaming.
    /// `None` disables the property pass entirely.
    pub property_pattern: Option<String>,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            mangle: true,
            strip_comments: true,
            reserved: [
                "$classData",
                "main",
                "toString",
                "constructor",
                "length",
                "call",
                "apply",
                "NaN",
                "Infinity",
                "undefined",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            property_pattern: Some(r"^(\$m_|loadHelp|.*__f\d?_|.*__O|.*L\S+_)".to_string()),
        }
    }
}

/// One named output file produced by the bundler, addressed relative to the
/// output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkInfo {
    pub file_name: String,
}

impl ChunkInfo {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn is_script(&self) -> bool {
        self.file_name.ends_with(".js")
    }
}

/// Before/after byte sizes of one minified chunk.
#[derive(Debug, Clone, Copy)]
pub struct SizeReport {
    pub original_bytes: usize,
    pub minified_bytes: usize,
}

impl SizeReport {
    /// Minified size as a percentage of the original. Not capped at 100:
    /// pathological inputs can grow.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.minified_bytes as f64 / self.original_bytes as f64 * 100.0
    }

    pub fn saved_bytes(&self) -> usize {
        self.original_bytes.saturating_sub(self.minified_bytes)
    }
}

/// The record behind one progress line. `index` is 1-based.
#[derive(Debug, Clone)]
pub struct ChunkReport {
    pub file_name: String,
    pub index: usize,
    pub total: usize,
    pub sizes: SizeReport,
}

#[derive(Debug, Default)]
pub struct PipelineResult {
    /// One report per minified script chunk, in processing order.
    pub reports: Vec<ChunkReport>,
    /// Non-script chunks the bundler produced, left byte-identical.
    pub skipped: usize,
    pub duration: Duration,
}

impl PipelineResult {
    pub fn saved_bytes(&self) -> usize {
        self.reports.iter().map(|r| r.sizes.saved_bytes()).sum()
    }
}
