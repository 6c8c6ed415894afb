use std::process;

use clap::Parser;

use bitsieve::cli::Args;

fn main() {
    let args = Args::parse();
    match bitsieve::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}
