//! Positioned byte sources.
//!
//! Workers share one source read-only and each reads its own byte range with positioned reads, so
//! there is no shared cursor to contend for.

use std::fs::File;
use std::io::{self, Read};

/// A readable, randomly addressable input of known size.
pub trait ByteSource {
    /// Total size of the input in bytes.
    fn size(&self) -> io::Result<u64>;

    /// Reads up to `buf.len()` bytes starting at `offset`. Returns 0 at end of input.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

    /// A `Read` view over `[start, start + len)`.
    fn section(&self, start: u64, len: u64) -> Section<'_, Self> {
        Section {
            source: self,
            pos: start,
            end: start.saturating_add(len),
        }
    }
}

impl ByteSource for File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    #[cfg(unix)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }
}

impl ByteSource for [u8] {
    fn size(&self) -> io::Result<u64> {
        Ok(self.len() as u64)
    }

    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let Ok(offset) = usize::try_from(offset) else {
            return Ok(0);
        };
        if offset >= self.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.len() - offset);
        buf[..n].copy_from_slice(&self[offset..offset + n]);
        Ok(n)
    }
}

impl ByteSource for Vec<u8> {
    fn size(&self) -> io::Result<u64> {
        self.as_slice().size()
    }

    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        self.as_slice().read_at(buf, offset)
    }
}

/// Sequential reader restricted to one byte range of a [`ByteSource`].
pub struct Section<'a, S: ?Sized> {
    source: &'a S,
    pos: u64,
    end: u64,
}

impl<S: ByteSource + ?Sized> Section<'_, S> {
    /// Bytes left before the end of the range.
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.pos)
    }
}

impl<S: ByteSource + ?Sized> Read for Section<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let max = (buf.len() as u64).min(remaining) as usize;
        let n = self.source.read_at(&mut buf[..max], self.pos)?;
        self.pos += n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_stops_at_range_end() {
        let data = b"hello;1.0\nworld;2.0\n".to_vec();
        let mut out = String::new();
        data.section(6, 4).read_to_string(&mut out).unwrap();
        assert_eq!(out, "1.0\n");
    }

    #[test]
    fn section_past_end_of_source_is_empty() {
        let data = b"abc".to_vec();
        let mut section = data.section(10, 5);
        let mut buf = [0u8; 8];
        assert_eq!(section.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn file_reads_are_positioned() {
        use std::io::Write;

        let mut tmp = tempfile::tempfile().unwrap();
        tmp.write_all(b"0123456789").unwrap();
        assert_eq!(ByteSource::size(&tmp).unwrap(), 10);

        let mut buf = [0u8; 3];
        let n = ByteSource::read_at(&tmp, &mut buf, 4).unwrap();
        assert_eq!(&buf[..n], b"456");
        // a second positioned read is not affected by the first
        let n = ByteSource::read_at(&tmp, &mut buf, 0).unwrap();
        assert_eq!(&buf[..n], b"012");
    }
}
