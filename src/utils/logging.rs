use std::time::Instant;
use tracing::{debug, info, warn};

pub struct Logger;

impl Logger {
    pub fn init() {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shibori=info")),
            )
            .with_target(false)
            .init();
    }

    pub fn bundler_start(command: &str) {
        info!("📦 Running bundler: {}", command);
    }

    pub fn chunks_found(total: usize, scripts: usize) {
        info!("📄 {} chunks produced, {} script chunks to minify", total, scripts);
    }

    pub fn scanning_outdir(outdir: &str) {
        info!("📁 Collecting chunks from {}", outdir);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
