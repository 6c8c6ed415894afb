//! Benchmark tree dispatch against a linear pattern scan.
//!
//! Usage:
//!   cargo run --release --bin bench_bitsieve
//!   cargo run --release --bin bench_bitsieve -- --patterns 4096 --width 24
//!
//! Generates a deterministic pseudo-random pattern set, compiles it,
//! and reports build time plus lookup throughput for the tree walk and
//! for a naive scan over every pattern.

use std::time::Instant;

use clap::Parser;

use bitsieve::pattern::BitPattern;
use bitsieve::tree::Tree;

#[derive(Parser)]
#[command(about = "Benchmark bitsieve tree dispatch vs linear scan")]
struct Args {
    /// Number of patterns to generate
    #[arg(long, default_value_t = 1024)]
    patterns: usize,

    /// Pattern width in bits (max 128)
    #[arg(long, default_value_t = 16)]
    width: u8,

    /// Fraction of wildcard bits per pattern, percent
    #[arg(long, default_value_t = 25)]
    wildcards: u8,

    /// Number of lookups per measurement
    #[arg(long, default_value_t = 1_000_000)]
    lookups: usize,
}

/// xorshift64*: deterministic across runs, no dependency needed.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

fn generate(args: &Args, rng: &mut Rng) -> Vec<BitPattern> {
    (0..args.patterns)
        .map(|_| {
            let text: String = (0..args.width)
                .map(|_| {
                    if rng.next() % 100 < u64::from(args.wildcards) {
                        'x'
                    } else if rng.next() % 2 == 0 {
                        '0'
                    } else {
                        '1'
                    }
                })
                .collect();
            BitPattern::parse(&text)
        })
        .collect()
}

fn main() {
    let args = Args::parse();
    let mut rng = Rng(0x5EED_CAFE_F00D_0001);

    let patterns = generate(&args, &mut rng);
    println!(
        "{} patterns, width {}, ~{}% wildcards",
        patterns.len(),
        args.width,
        args.wildcards
    );

    let build_start = Instant::now();
    let tree = match Tree::build(patterns) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("build failed: {e}");
            std::process::exit(2);
        }
    };
    println!(
        "build: {:.1?} ({} nodes, {} buckets, depth {})",
        build_start.elapsed(),
        tree.node_count(),
        tree.bucket_count(),
        tree.depth()
    );

    let probe_mask = if args.width >= 128 {
        u128::MAX
    } else {
        (1u128 << args.width) - 1
    };
    let probes: Vec<u128> = (0..args.lookups)
        .map(|_| u128::from(rng.next()) & probe_mask)
        .collect();

    let tree_start = Instant::now();
    let mut tree_hits = 0usize;
    for &probe in &probes {
        if tree.dispatch(probe).is_some() {
            tree_hits += 1;
        }
    }
    let tree_elapsed = tree_start.elapsed();

    let scan_start = Instant::now();
    let mut scan_hits = 0usize;
    for &probe in &probes {
        if tree
            .patterns()
            .iter()
            .any(|p| probe & p.mask() == p.active())
        {
            scan_hits += 1;
        }
    }
    let scan_elapsed = scan_start.elapsed();

    assert_eq!(tree_hits, scan_hits, "tree and scan disagree");

    let rate = |elapsed: std::time::Duration| probes.len() as f64 / elapsed.as_secs_f64() / 1e6;
    println!(
        "tree dispatch: {:.1?} ({:.1} M lookups/s, {} hits)",
        tree_elapsed,
        rate(tree_elapsed),
        tree_hits
    );
    println!(
        "linear scan:   {:.1?} ({:.1} M lookups/s)",
        scan_elapsed,
        rate(scan_elapsed)
    );
    println!(
        "speedup: {:.1}x",
        scan_elapsed.as_secs_f64() / tree_elapsed.as_secs_f64()
    );
}
