use std::io::{BufRead, BufReader};

use memchr::{memchr, memchr_iter};
use rustc_hash::FxBuildHasher;
use tracing::debug;

use crate::chunk::Chunk;
use crate::config::DEFAULT_READ_BUFFER;
use crate::error::{Error, RecordError, Result};
use crate::source::ByteSource;
use crate::summary::Summary;
use crate::Table;

const DELIMITER: u8 = b';';

/// The table one worker built for one chunk.
#[derive(Debug)]
pub struct PerChunkResult {
    pub chunk_index: usize,
    pub summaries: Table,
}

fn insert_or_update(table: &mut Table, k: &str, v: f32) {
    if let Some(r) = table.get_mut(k) {
        r.add(v);
    } else {
        table.insert(k.to_owned(), Summary::from(v));
    }
}

/// Streams one chunk and folds every record in it into a fresh table.
pub fn process_chunk<S: ByteSource + ?Sized>(source: &S, chunk: Chunk) -> Result<Table> {
    process_chunk_with_capacity(source, chunk, DEFAULT_READ_BUFFER)
}

pub fn process_chunk_with_capacity<S: ByteSource + ?Sized>(
    source: &S,
    chunk: Chunk,
    capacity: usize,
) -> Result<Table> {
    let mut reader = BufReader::with_capacity(capacity, source.section(chunk.start, chunk.len));
    let mut table = Table::with_capacity_and_hasher(1000, FxBuildHasher);
    let mut line = Vec::with_capacity(128);
    let mut offset = chunk.start;

    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| Error::ChunkRead { offset, source })?;
        if n == 0 {
            break;
        }

        let (station, temp) =
            parse_record(&line).map_err(|kind| Error::MalformedRecord { offset, kind })?;
        insert_or_update(&mut table, station, temp);
        offset += n as u64;
    }

    debug!(
        start = chunk.start,
        len = chunk.len,
        stations = table.len(),
        "chunk parsed"
    );
    Ok(table)
}

/// Decodes one `station;temperature` line, with or without its terminator.
pub fn parse_record(line: &[u8]) -> std::result::Result<(&str, f32), RecordError> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);

    let Some(sep) = memchr(DELIMITER, line) else {
        return Err(RecordError::FieldCount { found: 1 });
    };
    let (name, rest) = line.split_at(sep);
    let val = &rest[1..];
    let extra = memchr_iter(DELIMITER, val).count();
    if extra > 0 {
        return Err(RecordError::FieldCount { found: 2 + extra });
    }

    let name = std::str::from_utf8(name)
        .map_err(|_| RecordError::NotUtf8)?
        .trim();

    let val = std::str::from_utf8(val)
        .map_err(|_| RecordError::NotUtf8)?
        .trim();
    match val.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok((name, v)),
        _ => Err(RecordError::InvalidNumber {
            text: val.to_owned(),
        }),
    }
}
