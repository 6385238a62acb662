use crate::core::models::{ChunkReport, PipelineResult};
use colored::*;
use std::time::Instant;

pub struct ShiboriUI {
    start_time: Instant,
}

impl ShiboriUI {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn show_banner(&self) {
        println!(
            "\n  {} {}",
            "SHIBORI".bright_cyan().bold(),
            concat!("v", env!("CARGO_PKG_VERSION")).bright_white()
        );
        println!();
    }

    /// One line per chunk, written as the chunk finishes. Kept free of color
    /// codes so CI logs stay grep-able.
    pub fn progress_line(&self, report: &ChunkReport) {
        println!("{}", format_progress_line(report));
    }

    pub fn show_completion(&self, result: &PipelineResult) {
        let elapsed = self.start_time.elapsed();

        println!();
        if result.reports.is_empty() {
            println!("  {} no script chunks to minify", "-".bright_black());
        } else {
            println!(
                "  {} {} script chunks, {} saved",
                "▼".bright_cyan(),
                result.reports.len().to_string().bright_white().bold(),
                format_bytes(result.saved_bytes()).bright_cyan()
            );
        }
        if result.skipped > 0 {
            println!(
                "  {} {} non-script chunks left untouched",
                "·".bright_black(),
                result.skipped
            );
        }
        println!(
            "  {} finished in {}",
            "✓".bright_green(),
            format!("{:.0}ms", elapsed.as_secs_f64() * 1000.0)
                .bright_white()
                .bold()
        );
    }
}

impl Default for ShiboriUI {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_progress_line(report: &ChunkReport) -> String {
    format!(
        "Minifying {}/{}: {}... {} --> {} ({:.2}%)",
        report.index,
        report.total,
        report.file_name,
        format_bytes(report.sizes.original_bytes),
        format_bytes(report.sizes.minified_bytes),
        report.sizes.ratio()
    )
}

pub fn format_bytes(n: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    let size = n as f64;
    if size >= MIB {
        format!("{:.2} MiB", size / MIB)
    } else if size >= KIB {
        format!("{:.2} KiB", size / KIB)
    } else {
        format!("{} B", n)
    }
}
