#![no_main]

use bitsieve::pattern::BitPattern;
use bitsieve::tree::{Node, Tree, BUCKET_MAX};
use libfuzzer_sys::fuzz_target;

// Derive a pattern set from raw bytes (two bits per pattern bit: 00/01
// fixed, 10/11 wildcard), build a tree, and check its invariants plus
// dispatch agreement with a linear scan.
fuzz_target!(|data: &[u8]| {
    let mut patterns = Vec::new();
    for chunk in data.chunks(3).take(64) {
        let mut text = String::new();
        for byte in chunk {
            for shift in [0u8, 2, 4, 6] {
                match (byte >> shift) & 0b11 {
                    0 => text.push('0'),
                    1 => text.push('1'),
                    _ => text.push('x'),
                }
            }
        }
        patterns.push(BitPattern::parse(&text));
    }

    let Ok(tree) = Tree::build(patterns) else {
        return;
    };

    assert_eq!(tree.root(), tree.node_count() - 1);
    for (idx, node) in tree.nodes().iter().enumerate() {
        if let Node::Branch { left, right, .. } = *node {
            assert!((left as usize) < idx);
            assert!((right as usize) < idx);
        }
    }
    for bucket in tree.buckets() {
        assert!(bucket.len() <= BUCKET_MAX);
    }

    let probe = data.iter().fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
    let linear = tree
        .patterns()
        .iter()
        .position(|p| probe & p.mask() == p.active());
    assert_eq!(tree.dispatch(probe), linear);
});
