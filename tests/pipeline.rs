use async_trait::async_trait;
use shibori::core::interfaces::{Bundler, ChunkMinifier};
use shibori::core::models::{BuildConfig, ChunkInfo, MinifyOptions};
use shibori::core::services::MinifyPipeline;
use shibori::infrastructure::{MinificationService, TokioFileSystemService};
use shibori::utils::{Result, ShiboriError};
use std::sync::Arc;
use tempfile::TempDir;

const SCRIPT: &str = r#"
function greet(name) {
    const message = "hello, " + name;
    console.log(message);
    return message;
}
greet("world");
"#;

const STYLESHEET: &str = "body {\n    color: red;\n}\n";

/// Bundler double that reports a fixed chunk list without running anything.
struct StaticBundler {
    chunks: Vec<&'static str>,
}

#[async_trait]
impl Bundler for StaticBundler {
    async fn bundle(&self, _config: &BuildConfig) -> Result<Vec<ChunkInfo>> {
        Ok(self.chunks.iter().map(|n| ChunkInfo::new(*n)).collect())
    }
}

struct FailingBundler;

#[async_trait]
impl Bundler for FailingBundler {
    async fn bundle(&self, _config: &BuildConfig) -> Result<Vec<ChunkInfo>> {
        Err(ShiboriError::build("bundler exited with exit status: 1"))
    }
}

/// Real minifier that fails on one specific file.
struct FailOnFile {
    fail_file: &'static str,
    inner: MinificationService,
}

#[async_trait]
impl ChunkMinifier for FailOnFile {
    async fn minify(&self, source: &str, file_name: &str) -> Result<String> {
        if file_name == self.fail_file {
            return Err(ShiboriError::minify(file_name, "malformed input"));
        }
        self.inner.minify(source, file_name).await
    }
}

fn setup(chunks: &[(&str, &str)]) -> (TempDir, BuildConfig) {
    let temp = TempDir::new().unwrap();
    let outdir = temp.path().join("dist");

    for (name, content) in chunks {
        let path = outdir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    let config = BuildConfig {
        root: temp.path().to_path_buf(),
        outdir,
        ..BuildConfig::default()
    };
    (temp, config)
}

fn real_minifier() -> MinificationService {
    MinificationService::new(MinifyOptions::default()).unwrap()
}

fn pipeline(bundler: Arc<dyn Bundler>, minifier: Arc<dyn ChunkMinifier>) -> MinifyPipeline {
    MinifyPipeline::new(bundler, minifier, Arc::new(TokioFileSystemService))
}

#[tokio::test]
async fn test_mixed_chunk_list_minifies_scripts_in_order() {
    let (_temp, config) = setup(&[
        ("a.js", SCRIPT),
        ("b.css", STYLESHEET),
        ("c.js", SCRIPT),
    ]);

    let bundler = Arc::new(StaticBundler {
        chunks: vec!["a.js", "b.css", "c.js"],
    });
    let result = pipeline(bundler, Arc::new(real_minifier()))
        .run(&config)
        .await
        .unwrap();

    assert_eq!(result.reports.len(), 2);
    assert_eq!(result.skipped, 1);

    assert_eq!(result.reports[0].file_name, "a.js");
    assert_eq!(result.reports[0].index, 1);
    assert_eq!(result.reports[0].total, 2);
    assert_eq!(result.reports[1].file_name, "c.js");
    assert_eq!(result.reports[1].index, 2);
    assert_eq!(result.reports[1].total, 2);

    // Script chunks rewritten in place, smaller than the originals
    for name in ["a.js", "c.js"] {
        let minified = std::fs::read_to_string(config.outdir.join(name)).unwrap();
        assert_ne!(minified, SCRIPT);
        assert!(minified.len() < SCRIPT.len());
    }

    // Non-script chunk byte-identical
    let css = std::fs::read_to_string(config.outdir.join("b.css")).unwrap();
    assert_eq!(css, STYLESHEET);
}

#[tokio::test]
async fn test_zero_script_chunks_completes_normally() {
    let (_temp, config) = setup(&[("style.css", STYLESHEET), ("index.html", "<html></html>")]);

    let bundler = Arc::new(StaticBundler {
        chunks: vec!["style.css", "index.html"],
    });
    let result = pipeline(bundler, Arc::new(real_minifier()))
        .run(&config)
        .await
        .unwrap();

    assert!(result.reports.is_empty());
    assert_eq!(result.skipped, 2);
}

#[tokio::test]
async fn test_bundler_failure_aborts_before_minification() {
    let (_temp, config) = setup(&[("a.js", SCRIPT)]);

    let result = pipeline(Arc::new(FailingBundler), Arc::new(real_minifier()))
        .run(&config)
        .await;

    assert!(matches!(result, Err(ShiboriError::Build { .. })));

    let untouched = std::fs::read_to_string(config.outdir.join("a.js")).unwrap();
    assert_eq!(untouched, SCRIPT);
}

#[tokio::test]
async fn test_minifier_failure_stops_remaining_chunks() {
    let (_temp, config) = setup(&[("a.js", SCRIPT), ("b.js", SCRIPT), ("c.js", SCRIPT)]);

    let bundler = Arc::new(StaticBundler {
        chunks: vec!["a.js", "b.js", "c.js"],
    });
    let minifier = Arc::new(FailOnFile {
        fail_file: "b.js",
        inner: real_minifier(),
    });

    let result = pipeline(bundler, minifier).run(&config).await;
    match result {
        Err(ShiboriError::Minify { file, .. }) => assert_eq!(file, "b.js"),
        other => panic!("expected minify error, got {:?}", other.map(|_| ())),
    }

    // First chunk persisted minified; the failing chunk and everything after
    // it keep their original bytes.
    let first = std::fs::read_to_string(config.outdir.join("a.js")).unwrap();
    assert_ne!(first, SCRIPT);
    for name in ["b.js", "c.js"] {
        let untouched = std::fs::read_to_string(config.outdir.join(name)).unwrap();
        assert_eq!(untouched, SCRIPT);
    }
}

#[tokio::test]
async fn test_report_ratio_matches_sizes() {
    let (_temp, config) = setup(&[("a.js", SCRIPT)]);

    let bundler = Arc::new(StaticBundler {
        chunks: vec!["a.js"],
    });
    let result = pipeline(bundler, Arc::new(real_minifier()))
        .run(&config)
        .await
        .unwrap();

    let sizes = &result.reports[0].sizes;
    assert_eq!(sizes.original_bytes, SCRIPT.len());
    let expected = sizes.minified_bytes as f64 / sizes.original_bytes as f64 * 100.0;
    assert!((sizes.ratio() - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_second_run_over_minified_output_succeeds() {
    let (_temp, config) = setup(&[("a.js", SCRIPT)]);

    let bundler = Arc::new(StaticBundler {
        chunks: vec!["a.js"],
    });

    pipeline(bundler.clone(), Arc::new(real_minifier()))
        .run(&config)
        .await
        .unwrap();
    let first_pass = std::fs::read_to_string(config.outdir.join("a.js")).unwrap();

    // A fresh service, as a separate invocation of the tool would have
    let result = pipeline(bundler, Arc::new(real_minifier()))
        .run(&config)
        .await
        .unwrap();

    assert_eq!(result.reports.len(), 1);
    let second_pass = std::fs::read_to_string(config.outdir.join("a.js")).unwrap();
    assert!(!second_pass.is_empty());
    assert!(second_pass.len() <= first_pass.len() + 16);
}
