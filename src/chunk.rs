//! Line-aligned partitioning of the input.
//!
//! The input is cut into roughly equal spans. Every cut except the last is pushed forward to just
//! past the next `\n`, so no record is split between two chunks and each chunk can be parsed on
//! its own.

use std::io;

use memchr::memchr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::source::ByteSource;

const SCAN_BLOCK: usize = 4096;

/// A contiguous byte range of the input, handed to exactly one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: u64,
    pub len: u64,
}

impl Chunk {
    pub fn end(&self) -> u64 {
        self.start + self.len
    }
}

/// Splits `[0, file_size)` into at most `desired` line-aligned chunks.
///
/// Produces fewer chunks than asked for when the input runs out of lines, and none at all for an
/// empty input. The result is checked with [`verify_partition`] before it is returned.
pub fn compute_chunks<S: ByteSource + ?Sized>(
    source: &S,
    file_size: u64,
    desired: usize,
) -> Result<Vec<Chunk>> {
    if desired == 0 {
        return Err(Error::InvalidConfig("chunk count must be positive".into()));
    }

    let mut chunks = Vec::new();
    let span = file_size / desired as u64;
    let mut start = 0;

    while start < file_size {
        let target = start + span;
        if chunks.len() + 1 == desired || target >= file_size {
            chunks.push(Chunk {
                start,
                len: file_size - start,
            });
            break;
        }

        let end = line_end_from(source, target, file_size)?;
        let chunk = Chunk {
            start,
            len: end - start,
        };
        debug!(start = chunk.start, len = chunk.len, end, "chunk boundary");
        chunks.push(chunk);
        start = end;
    }

    verify_partition(&chunks, file_size)?;
    Ok(chunks)
}

/// Offset just past the first `\n` at or after `from`, or `file_size` if there is none.
fn line_end_from<S: ByteSource + ?Sized>(source: &S, from: u64, file_size: u64) -> Result<u64> {
    let mut buf = [0u8; SCAN_BLOCK];
    let mut pos = from;

    while pos < file_size {
        let want = (file_size - pos).min(SCAN_BLOCK as u64) as usize;
        let n = match source.read_at(&mut buf[..want], pos) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(Error::BoundaryScan {
                    offset: pos,
                    source: e,
                })
            }
        };
        if let Some(i) = memchr(b'\n', &buf[..n]) {
            return Ok(pos + i as u64 + 1);
        }
        pos += n as u64;
    }

    Ok(file_size)
}

/// Checks that `chunks` are non-empty, contiguous and cover exactly `[0, file_size)`.
pub fn verify_partition(chunks: &[Chunk], file_size: u64) -> Result<()> {
    let Some(first) = chunks.first() else {
        if file_size == 0 {
            return Ok(());
        }
        return Err(Error::Partition(format!(
            "no chunks for a {file_size} byte input"
        )));
    };

    if first.start != 0 {
        return Err(Error::Partition(format!(
            "first chunk starts at {}",
            first.start
        )));
    }

    for (i, chunk) in chunks.iter().enumerate() {
        if chunk.len == 0 {
            return Err(Error::Partition(format!(
                "chunk {i} at {} is empty",
                chunk.start
            )));
        }
        if let Some(next) = chunks.get(i + 1) {
            if chunk.end() != next.start {
                return Err(Error::Partition(format!(
                    "chunk {i} ends at {} but chunk {} starts at {}",
                    chunk.end(),
                    i + 1,
                    next.start
                )));
            }
        }
    }

    let last = chunks[chunks.len() - 1];
    if last.end() != file_size {
        return Err(Error::Partition(format!(
            "last chunk ends at {} of {file_size} bytes",
            last.end()
        )));
    }

    Ok(())
}
