use clap::Parser;

use pathmerge::{run_pathmerge, Args};

fn main() {
    let args = Args::parse();
    if let Err(error) = run_pathmerge(args) {
        eprintln!("pathmerge: {}", error);
        std::process::exit(1);
    }
}
