//! Check files (or standard input) for well-formed UTF-8.
//!
//! For every input, this program prints the number of code points and
//! malformed sequences, followed by the first few errors. It exits with
//! status 1 if any input is malformed.

use std::io::{stdin, stdout, Read, Result, Write};

use utf8dfa::err::report;
use utf8dfa::opt::Options;
use utf8dfa::recover::decode_with;
use utf8dfa::Discard;

/// The maximum number of errors to print per input.
const LIMIT: usize = 5;

fn check<W: Write>(name: &str, bytes: &[u8], options: &Options, out: &mut W) -> Result<bool> {
    let outcome = decode_with(options, bytes, &mut Discard)?;
    writeln!(
        out,
        "{}: {} bytes, {} code points, {} malformed",
        name,
        bytes.len(),
        outcome.code_points(),
        outcome.errors()
    )?;

    for error in outcome.reported().iter().take(LIMIT) {
        report(error, out)?;
    }
    if LIMIT < outcome.reported().len() {
        writeln!(out, "    ...")?;
    }

    Ok(outcome.is_clean())
}

fn main() -> Result<()> {
    let options = Options::with_detailed_log();
    let mut out = stdout().lock();
    let mut clean = true;

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        let mut bytes = Vec::new();
        stdin().read_to_end(&mut bytes)?;
        clean &= check("<stdin>", &bytes, &options, &mut out)?;
    } else {
        for path in paths.iter() {
            let bytes = std::fs::read(path)?;
            clean &= check(path, &bytes, &options, &mut out)?;
        }
    }

    if !clean {
        std::process::exit(1);
    }
    Ok(())
}
