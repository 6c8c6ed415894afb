//! Named rule files for the command line.
//!
//! A rules file pairs a name with a pattern, one rule per line:
//!
//! ```text
//! # load/store group
//! load   10xx01
//! store  10xx10
//! nop    0000xx
//! ```
//!
//! Blank lines and `#` comments are skipped. Rule order matters: the
//! compiled tree resolves overlaps in favor of the earliest rule.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::pattern::BitPattern;

/// One named pattern, keeping the original text for display.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub text: String,
    pub pattern: BitPattern,
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Parse rule lines from `source`. Fails on a line with no pattern,
    /// a pattern with no recognized characters, or a duplicate name.
    pub fn parse(source: &str) -> Result<RuleSet> {
        let mut rules: Vec<Rule> = Vec::new();
        for (lineno, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(name) = parts.next() else {
                continue;
            };
            let Some(text) = parts.next() else {
                bail!("line {}: rule {name:?} has no pattern", lineno + 1);
            };
            if let Some(extra) = parts.next() {
                bail!(
                    "line {}: unexpected trailing token {extra:?} after pattern",
                    lineno + 1
                );
            }
            let pattern = BitPattern::parse(text);
            if pattern.width() == 0 {
                bail!(
                    "line {}: pattern {text:?} has no 0/1/x characters",
                    lineno + 1
                );
            }
            if rules.iter().any(|r| r.name == name) {
                bail!("line {}: duplicate rule name {name:?}", lineno + 1);
            }
            rules.push(Rule {
                name: name.to_string(),
                text: text.to_string(),
                pattern,
            });
        }
        Ok(RuleSet { rules })
    }

    pub fn load(path: &Path) -> Result<RuleSet> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read rules file {}", path.display()))?;
        Self::parse(&source)
            .with_context(|| format!("failed to parse rules file {}", path.display()))
    }

    /// The patterns in rule order, ready to hand to the tree builder.
    pub fn patterns(&self) -> Vec<BitPattern> {
        self.rules.iter().map(|r| r.pattern).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
