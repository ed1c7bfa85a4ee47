use std::fs::File;
use std::path::Path;

use crossbeam::channel;
use tracing::{debug, info};

use crate::chunk::compute_chunks;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::reduce::reduce;
use crate::source::ByteSource;
use crate::worker::{process_chunk_with_capacity, PerChunkResult};
use crate::Table;

/// Opens `path` and aggregates it with [`aggregate`].
pub fn aggregate_path<P: AsRef<Path>>(path: P, config: &Config) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    aggregate(&file, config)
}

/// Splits `source` into line-aligned chunks, parses them in parallel and merges the per-chunk
/// tables into one.
///
/// Each chunk is parsed by its own task on a pool sized by `config`. Tasks push their table onto a
/// completion channel and the calling thread merges results as they arrive. Any error fails the
/// whole run.
pub fn aggregate<S: ByteSource + Sync + ?Sized>(source: &S, config: &Config) -> Result<Table> {
    config.validate()?;

    let file_size = source.size().map_err(Error::Size)?;
    let chunks = compute_chunks(source, file_size, config.chunk_count)?;
    info!(file_size, chunks = chunks.len(), "partitioned input");
    if chunks.is_empty() {
        return Ok(Table::default());
    }

    let pool = config.build_pool()?;
    let read_buffer = config.read_buffer;
    let (tx, rx) = channel::bounded::<Result<PerChunkResult>>(chunks.len());

    let table = pool.in_place_scope(|s| {
        for (chunk_index, chunk) in chunks.iter().copied().enumerate() {
            let tx = tx.clone();
            s.spawn(move |_| {
                let result = process_chunk_with_capacity(source, chunk, read_buffer).map(
                    |summaries| PerChunkResult {
                        chunk_index,
                        summaries,
                    },
                );
                if let Err(e) = &result {
                    debug!(chunk = chunk_index, error = %e, "chunk failed");
                }
                tx.send(result).expect("reducer outlives the scope");
            });
        }
        drop(tx);

        reduce(rx.iter(), chunks.len())
    })?;

    info!(stations = table.len(), "aggregation complete");
    Ok(table)
}
