//! Graphviz rendering of a compiled tree.
//!
//! Best-effort diagnostics only: a destination that cannot be opened
//! or written is reported to the caller and never disturbs the tree.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::tree::{Node, Tree};

/// Render `tree` as a Graphviz digraph, depth-first from the root.
/// Leaves come out as grey record boxes, splits as ellipses labelled
/// with the tested bit; the 0-edge is dashed, the 1-edge bold.
pub fn export_dot(tree: &Tree, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "digraph bitsieve {{")?;
    writeln!(out, "    rankdir=TB;")?;
    writeln!(out, "    node [fontname=\"Helvetica\"];")?;
    writeln!(out, "    edge [fontname=\"Helvetica\", fontsize=10];")?;
    write_node(tree, tree.root(), out)?;
    writeln!(out, "}}")
}

fn write_node(tree: &Tree, index: usize, out: &mut dyn Write) -> io::Result<()> {
    match tree.nodes()[index] {
        Node::Leaf { bucket, .. } => {
            let count = tree.bucket(bucket).len();
            writeln!(
                out,
                "    node_{index} [shape=record, style=filled, fillcolor=lightgrey, \
                 label=\"{{LEAF | Pat Count: {count} | Bucket ID: {bucket}}}\"];"
            )
        }
        Node::Branch {
            bit, left, right, ..
        } => {
            writeln!(
                out,
                "    node_{index} [shape=ellipse, style=filled, fillcolor=white, \
                 label=\"Bit {bit}\"];"
            )?;
            writeln!(
                out,
                "    node_{index} -> node_{left} [label=\"0\", style=dashed];"
            )?;
            writeln!(
                out,
                "    node_{index} -> node_{right} [label=\"1\", style=bold];"
            )?;
            write_node(tree, left as usize, out)?;
            write_node(tree, right as usize, out)
        }
    }
}

/// Write the diagram to `path`, creating or truncating the file.
pub fn export_dot_path(tree: &Tree, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    export_dot(tree, &mut out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::BitPattern;

    fn build(texts: &[&str]) -> Tree {
        Tree::build(texts.iter().map(|t| BitPattern::parse(t)).collect()).unwrap()
    }

    fn render(tree: &Tree) -> String {
        let mut out = Vec::new();
        export_dot(tree, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn single_leaf_renders_one_box() {
        let dot = render(&build(&["1x0", "011"]));
        assert!(dot.starts_with("digraph bitsieve {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains("Pat Count: 2"));
        assert!(dot.contains("Bucket ID: 0"));
        assert!(!dot.contains("->"));
    }

    #[test]
    fn split_renders_both_edges() {
        let texts: Vec<String> = (0..32u32).map(|v| format!("{v:05b}")).collect();
        let tree = Tree::build(texts.iter().map(|t| BitPattern::parse(t)).collect()).unwrap();
        let dot = render(&tree);
        assert!(dot.contains("label=\"Bit 0\""));
        assert!(dot.contains("[label=\"0\", style=dashed]"));
        assert!(dot.contains("[label=\"1\", style=bold]"));
        // Every node in the table appears exactly once.
        for idx in 0..tree.node_count() {
            assert_eq!(dot.matches(&format!("node_{idx} [")).count(), 1);
        }
    }

    #[test]
    fn unwritable_path_reports_an_error() {
        let tree = build(&["1x0"]);
        let err = export_dot_path(&tree, Path::new("/nonexistent-dir/tree.dot"));
        assert!(err.is_err());
        // The tree stays usable afterwards.
        assert_eq!(tree.dispatch(0b100), Some(0));
    }
}
