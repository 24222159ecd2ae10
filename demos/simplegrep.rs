// dualre example program: simplegrep
//
// Searches a given input file for a pattern supplied as a command-line
// argument and prints the offset and text of every match.
//
// Build instructions:
//
//     cargo run --example simplegrep
//
// Usage:
//
//     ./simplegrep [--pcre2] <pattern> <input file>
//
// Example:
//
//     ./simplegrep --pcre2 'fn \w+' demos/simplegrep.rs
//

use std::env;
use std::fs;
use std::path::Path;
use std::process::exit;

use anyhow::{Context, Result};

use dualre::prelude::*;

fn grep<E: Engine>(expr: &str, input: &str) -> Result<()> {
    let pattern = CompiledPattern::<E>::new(expr, &[] as &[&str]).context("compile pattern")?;

    println!("Scanning {} bytes with {}", input.len(), E::NAME);

    for m in pattern.find_iter(input, 0)? {
        let m = m.context("scan input buffer")?;

        println!("Match for pattern \"{}\" at offset {}: {}", pattern.as_str(), m.begin, m.value);
    }

    Ok(())
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let mut args = env::args().collect::<Vec<_>>();
    let program = args.remove(0);
    let pcre2 = args.first().map_or(false, |arg| arg == "--pcre2");

    if pcre2 {
        args.remove(0);
    }

    if args.len() != 2 {
        eprintln!(
            "Usage: {} [--pcre2] <pattern> <input file>\n",
            Path::new(&program).file_name().and_then(|s| s.to_str()).unwrap_or("simplegrep")
        );
        exit(-1);
    }

    let input = fs::read_to_string(&args[1]).context("read input file")?;

    if pcre2 {
        grep::<Pcre2Regex>(&args[0], &input)
    } else {
        grep::<StdRegex>(&args[0], &input)
    }
}
