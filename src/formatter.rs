//! Classification output formatting.

use std::io::Write;

use serde::Serialize;

/// One classified input value, ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    /// The value exactly as the user supplied it.
    pub value: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// Shape statistics of a compiled tree.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TreeStats {
    pub rules: usize,
    pub width: u8,
    pub nodes: usize,
    pub buckets: usize,
    pub depth: usize,
}

pub trait Formatter {
    fn format_to(&self, results: &[Classification], stats: Option<&TreeStats>, out: &mut dyn Write);

    fn print(&self, results: &[Classification], stats: Option<&TreeStats>) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.format_to(results, stats, &mut lock);
    }
}

pub fn create_formatter(format: &str) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(JsonFormatter),
        // "text" and any unknown value
        _ => Box::new(TextFormatter),
    }
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_to(
        &self,
        results: &[Classification],
        stats: Option<&TreeStats>,
        out: &mut dyn Write,
    ) {
        if let Some(stats) = stats {
            let _ = writeln!(
                out,
                "tree: {} rules, width {}, {} nodes, {} buckets, depth {}",
                stats.rules, stats.width, stats.nodes, stats.buckets, stats.depth
            );
        }
        for r in results {
            match (&r.rule, &r.pattern) {
                (Some(rule), Some(pattern)) => {
                    let _ = writeln!(out, "{}: {rule} ({pattern})", r.value);
                }
                _ => {
                    let _ = writeln!(out, "{}: no match", r.value);
                }
            }
        }
    }
}

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<&'a TreeStats>,
    results: &'a [Classification],
}

impl Formatter for JsonFormatter {
    fn format_to(
        &self,
        results: &[Classification],
        stats: Option<&TreeStats>,
        out: &mut dyn Write,
    ) {
        let output = JsonOutput {
            tree: stats,
            results,
        };
        if let Ok(json) = serde_json::to_string_pretty(&output) {
            let _ = writeln!(out, "{json}");
        }
    }
}
