use std::io::{BufWriter, Write};

use anyhow::Result;
use clap::Parser;

/// Writes `station;temperature` lines to stdout
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of lines to generate
    count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let stdlock = std::io::stdout().lock();
    let mut bufout = BufWriter::new(stdlock);

    let rows: Box<dyn Iterator<Item = (&str, f32)>> = match args.seed {
        Some(seed) => Box::new(measurements_gen::generate_seeded(args.count, seed)),
        None => Box::new(measurements_gen::generate(args.count)),
    };
    for (city, temp) in rows {
        writeln!(bufout, "{city};{temp:.1}")?;
    }
    bufout.flush()?;
    Ok(())
}
