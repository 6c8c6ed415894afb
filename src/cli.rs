use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bitsieve",
    version,
    about = "Compile masked bit patterns into a decision tree and classify values against it"
)]
pub struct Args {
    /// Rules file: one `name pattern` per line, with 1/0/x pattern characters
    pub rules: PathBuf,

    /// Values to classify (binary 0b..., hex 0x..., or decimal)
    #[arg(short = 'c', long = "classify", value_name = "VALUE")]
    pub classify: Vec<String>,

    /// Read values to classify from a file, one per line
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Write a Graphviz rendering of the compiled tree
    #[arg(long, value_name = "FILE")]
    pub export_dot: Option<PathBuf>,

    /// Print tree shape statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

/// Parse an input value: `0x`/`0X` hex, `0b`/`0B` binary, otherwise
/// decimal. Underscore separators are allowed everywhere.
pub fn parse_value(text: &str) -> Result<u128> {
    let cleaned: String = text.trim().chars().filter(|&c| c != '_').collect();
    let parsed = if let Some(hex) = cleaned.strip_prefix("0x").or(cleaned.strip_prefix("0X")) {
        u128::from_str_radix(hex, 16)
    } else if let Some(bin) = cleaned.strip_prefix("0b").or(cleaned.strip_prefix("0B")) {
        u128::from_str_radix(bin, 2)
    } else {
        cleaned.parse::<u128>()
    };
    parsed.with_context(|| format!("invalid value {text:?}"))
}
