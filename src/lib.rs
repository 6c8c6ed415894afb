//! bitsieve compiles a set of fixed-width masked bit patterns into a
//! binary decision tree and classifies input words against it. Each
//! pattern bit is fixed to 1, fixed to 0, or a wildcard; lookup walks
//! the tree instead of scanning every pattern, and resolves overlaps
//! in favor of the earliest pattern.

pub mod buffer;
pub mod cli;
pub mod error;
pub mod export;
pub mod file_format;
pub mod formatter;
pub mod pattern;
pub mod ruleset;
pub mod tree;

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;

use cli::Args;
use formatter::{create_formatter, Classification, TreeStats};
use ruleset::RuleSet;
use tree::Tree;

/// Run the classifier. Returns the exit code: 0 = every value matched
/// a rule (or there was nothing to classify), 1 = some value matched
/// nothing, 2 = error (mapped in main).
pub fn run(args: Args) -> Result<i32> {
    let build_start = Instant::now();
    let rules = RuleSet::load(&args.rules)?;
    let tree = Tree::build(rules.patterns())
        .with_context(|| format!("failed to compile {}", args.rules.display()))?;

    if args.debug {
        eprintln!(
            "debug: compiled {} rules in {:.0?}",
            rules.len(),
            build_start.elapsed()
        );
        eprintln!(
            "debug: {} nodes, {} buckets, width {}, depth {}",
            tree.node_count(),
            tree.bucket_count(),
            tree.max_width(),
            tree.depth()
        );
    }

    if let Some(path) = &args.export_dot {
        // Best effort: an unwritable destination doesn't fail the run.
        match export::export_dot_path(&tree, path) {
            Ok(()) => {
                if args.debug {
                    eprintln!("debug: tree exported to {}", path.display());
                }
            }
            Err(e) => eprintln!("warning: could not write {}: {e}", path.display()),
        }
    }

    let mut values = args.classify.clone();
    if let Some(input) = &args.input {
        let text = fs::read_to_string(input)
            .with_context(|| format!("failed to read input file {}", input.display()))?;
        values.extend(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(String::from),
        );
    }

    // Dispatch is read-only on shared tables; values classify in parallel.
    let results = values
        .par_iter()
        .map(|raw| {
            let value = cli::parse_value(raw)?;
            Ok(classify(&tree, &rules, raw, value))
        })
        .collect::<Result<Vec<Classification>>>()?;

    let stats = args.stats.then(|| TreeStats {
        rules: rules.len(),
        width: tree.max_width(),
        nodes: tree.node_count(),
        buckets: tree.bucket_count(),
        depth: tree.depth(),
    });

    let formatter = create_formatter(&args.format);
    formatter.print(&results, stats.as_ref());

    if results.iter().all(|r| r.matched) {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn classify(tree: &Tree, rules: &RuleSet, raw: &str, value: u128) -> Classification {
    match tree.dispatch(value) {
        Some(index) => {
            let rule = &rules.rules[index];
            Classification {
                value: raw.to_string(),
                matched: true,
                rule: Some(rule.name.clone()),
                pattern: Some(rule.text.clone()),
                index: Some(index),
            }
        }
        None => Classification {
            value: raw.to_string(),
            matched: false,
            rule: None,
            pattern: None,
            index: None,
        },
    }
}
