//! Integration tests for the bitsieve pipeline.
//!
//! These tests exercise the full path: rules file loading, tree
//! compilation, dispatch, diagram export, and the `run` entry point
//! with its exit-code contract. They write real files to a temp
//! directory and invoke the library directly.

use std::fs;
use std::path::{Path, PathBuf};

use bitsieve::cli::Args;
use bitsieve::pattern::BitPattern;
use bitsieve::ruleset::RuleSet;
use bitsieve::tree::Tree;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn default_args(rules: PathBuf) -> Args {
    Args {
        rules,
        classify: vec![],
        input: None,
        format: "text".to_string(),
        export_dot: None,
        stats: false,
        debug: false,
    }
}

const OPCODES: &str = "\
# toy RISC opcode map, 8-bit words
nop    00000000
halt   00000001
load   01xxxx00
store  01xxxx01
branch 10xxxxxx
imm    11xxxxxx
";

#[test]
fn rules_file_compiles_and_dispatches() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = write_file(dir.path(), "opcodes.rules", OPCODES);

    let rules = RuleSet::load(&rules_path).unwrap();
    assert_eq!(rules.len(), 6);

    let tree = Tree::build(rules.patterns()).unwrap();
    assert_eq!(tree.max_width(), 8);

    let name_of = |value: u128| tree.dispatch(value).map(|i| rules.rules[i].name.as_str());
    assert_eq!(name_of(0b0000_0000), Some("nop"));
    assert_eq!(name_of(0b0000_0001), Some("halt"));
    assert_eq!(name_of(0b0110_1100), Some("load"));
    assert_eq!(name_of(0b0110_1101), Some("store"));
    assert_eq!(name_of(0b1011_0010), Some("branch"));
    assert_eq!(name_of(0b1100_0000), Some("imm"));
    // 0b00000010 fits no row: the nop/halt group fixes bits 1..8.
    assert_eq!(name_of(0b0000_0010), None);
}

#[test]
fn earlier_rules_shadow_later_overlaps() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = write_file(
        dir.path(),
        "overlap.rules",
        "specific 1010\ngeneral  10xx\ncatch    xxxx\n",
    );
    let rules = RuleSet::load(&rules_path).unwrap();
    let tree = Tree::build(rules.patterns()).unwrap();

    assert_eq!(tree.dispatch(0b1010), Some(0));
    assert_eq!(tree.dispatch(0b1001), Some(1));
    assert_eq!(tree.dispatch(0b0111), Some(2));
}

#[test]
fn run_returns_zero_when_everything_matches() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = write_file(dir.path(), "opcodes.rules", OPCODES);
    let mut args = default_args(rules_path);
    args.classify = vec!["0b01101100".to_string(), "0x80".to_string()];

    assert_eq!(bitsieve::run(args).unwrap(), 0);
}

#[test]
fn run_returns_one_on_an_unmatched_value() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = write_file(dir.path(), "opcodes.rules", OPCODES);
    let mut args = default_args(rules_path);
    args.classify = vec!["0b00000000".to_string(), "0b00000010".to_string()];

    assert_eq!(bitsieve::run(args).unwrap(), 1);
}

#[test]
fn run_reads_values_from_an_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = write_file(dir.path(), "opcodes.rules", OPCODES);
    let input_path = write_file(
        dir.path(),
        "values.txt",
        "# batch of words\n0b00000000\n0x41\n\n0b11000000\n",
    );
    let mut args = default_args(rules_path);
    args.input = Some(input_path);
    args.format = "json".to_string();
    args.stats = true;

    assert_eq!(bitsieve::run(args).unwrap(), 0);
}

#[test]
fn run_rejects_a_bad_value() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = write_file(dir.path(), "opcodes.rules", OPCODES);
    let mut args = default_args(rules_path);
    args.classify = vec!["0xnope".to_string()];

    let err = bitsieve::run(args).unwrap_err();
    assert!(err.to_string().contains("invalid value"));
}

#[test]
fn run_fails_on_a_missing_rules_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = default_args(dir.path().join("absent.rules"));
    let err = bitsieve::run(args).unwrap_err();
    assert!(err.to_string().contains("failed to read rules file"));
}

#[test]
fn run_fails_on_an_underspecified_rule_set() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = write_file(dir.path(), "bad.rules", "a xxx\nb xxx\n");
    let err = bitsieve::run(default_args(rules_path)).unwrap_err();
    assert!(err.to_string().contains("failed to compile"));
    assert!(format!("{err:#}").contains("no separating bit"));
}

#[test]
fn run_exports_a_diagram() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = write_file(dir.path(), "opcodes.rules", OPCODES);
    let dot_path = dir.path().join("tree.dot");
    let mut args = default_args(rules_path);
    args.export_dot = Some(dot_path.clone());

    assert_eq!(bitsieve::run(args).unwrap(), 0);
    let dot = fs::read_to_string(&dot_path).unwrap();
    assert!(dot.starts_with("digraph bitsieve {"));
}

#[test]
fn run_survives_an_unwritable_diagram_destination() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = write_file(dir.path(), "opcodes.rules", OPCODES);
    let mut args = default_args(rules_path);
    args.export_dot = Some(dir.path().join("no-such-dir").join("tree.dot"));
    args.classify = vec!["0".to_string()];

    // The export is best effort; classification still runs.
    assert_eq!(bitsieve::run(args).unwrap(), 0);
}

#[test]
fn wide_patterns_classify_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let high = format!("high 1{}\n", "x".repeat(79));
    let low = format!("low  0{}\n", "x".repeat(79));
    let rules_path = write_file(dir.path(), "wide.rules", &format!("{high}{low}"));

    let rules = RuleSet::load(&rules_path).unwrap();
    let tree = Tree::build(rules.patterns()).unwrap();
    assert_eq!(tree.max_width(), 80);
    assert_eq!(tree.dispatch(1u128 << 79), Some(0));
    assert_eq!(tree.dispatch(0), Some(1));
}

#[test]
fn tree_patterns_stay_accessible_after_build() {
    // The tree takes ownership of the pattern array but hands read
    // access back for display and export.
    let set = vec![BitPattern::parse("101"), BitPattern::parse("11")];
    let tree = Tree::build(set).unwrap();
    assert_eq!(tree.pattern_count(), 2);
    assert_eq!(tree.patterns()[0].to_string(), "101");
    assert_eq!(tree.patterns()[1].to_string(), "11x");
}
