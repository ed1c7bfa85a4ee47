use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use tempagg::{aggregate_path, write_report, Config, Format};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to measurements file
    input: PathBuf,

    /// Number of line-aligned chunks to split the input into
    #[arg(short, long, env = "TEMPAGG_CHUNKS")]
    chunks: Option<usize>,

    /// Worker threads, defaults to the number of cores
    #[arg(short = 'j', long, env = "TEMPAGG_THREADS")]
    threads: Option<usize>,

    /// Read buffer per worker, in bytes
    #[arg(long)]
    read_buffer: Option<usize>,

    #[arg(long, value_enum, default_value = "standard")]
    format: Format,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::default();
    if let Some(chunks) = args.chunks {
        config = config.with_chunk_count(chunks);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(read_buffer) = args.read_buffer {
        config = config.with_read_buffer(read_buffer);
    }

    let table = aggregate_path(&args.input, &config)
        .with_context(|| format!("failed to aggregate {}", args.input.display()))?;

    let mut stdout = BufWriter::new(std::io::stdout().lock());
    write_report(&mut stdout, &table, args.format)?;
    stdout.flush()?;
    Ok(())
}
