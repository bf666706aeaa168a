//! Positioned, bounds-checked reads over a seekable byte stream.

use std::io::{Read, Seek, SeekFrom};

use crate::error::ElfError;

/// Bytes fetched per read while scanning for a NUL terminator.
pub const CHUNK_SIZE: usize = 64;

/// A seekable view over the raw bytes of one ELF file.
///
/// The total length is captured once at construction; every positioned read
/// is checked against it so a malformed offset yields
/// [`ElfError::TruncatedRead`] instead of a short read. The seek position is
/// shared mutable state, so a source belongs to exactly one decoding session.
#[derive(Debug)]
pub struct ByteSource<R> {
    inner: R,
    len: u64,
}

impl<R: Read + Seek> ByteSource<R> {
    /// Wrap a reader, measuring its length.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::Io`] if the reader cannot seek to its end.
    pub fn new(mut inner: R) -> Result<Self, ElfError> {
        let len = inner
            .seek(SeekFrom::End(0))
            .map_err(|e| ElfError::io(0, &e))?;
        Ok(Self { inner, len })
    }

    /// Total length of the source in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the source holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consume the source, returning the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Bytes remaining from `offset` to the end of the source.
    fn available(&self, offset: u64) -> u64 {
        self.len.saturating_sub(offset)
    }

    /// Fill `buf` with the bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::TruncatedRead`] if fewer than `buf.len()` bytes
    /// remain at `offset`, or [`ElfError::Io`] if the reader fails.
    pub fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), ElfError> {
        let expected = buf.len() as u64;
        let available = self.available(offset);
        if expected > available {
            return Err(ElfError::TruncatedRead {
                offset,
                expected,
                available,
            });
        }
        self.inner
            .seek(SeekFrom::Start(offset))
            .map_err(|e| ElfError::io(offset, &e))?;
        self.inner
            .read_exact(buf)
            .map_err(|e| ElfError::io(offset, &e))
    }

    /// Read exactly `len` bytes at `offset` into a new buffer.
    ///
    /// The length is checked before anything is allocated, so a corrupt size
    /// field cannot trigger a huge allocation.
    ///
    /// # Errors
    ///
    /// Same as [`read_exact_at`](Self::read_exact_at).
    pub fn read_vec_at(&mut self, offset: u64, len: u64) -> Result<Vec<u8>, ElfError> {
        let available = self.available(offset);
        if len > available {
            return Err(ElfError::TruncatedRead {
                offset,
                expected: len,
                available,
            });
        }
        let size = usize::try_from(len).map_err(|_| ElfError::TruncatedRead {
            offset,
            expected: len,
            available,
        })?;
        let mut buf = vec![0u8; size];
        self.read_exact_at(offset, &mut buf)?;
        Ok(buf)
    }

    /// Read up to `max` bytes at `offset`; shorter near the end, empty at or past it.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::Io`] if the reader fails.
    pub fn read_chunk_at(&mut self, offset: u64, max: usize) -> Result<Vec<u8>, ElfError> {
        let len = self.available(offset).min(max as u64);
        if len == 0 {
            return Ok(Vec::new());
        }
        self.read_vec_at(offset, len)
    }

    /// Read a NUL-terminated byte string starting at `offset`.
    ///
    /// Bytes are fetched in [`CHUNK_SIZE`] pieces and never at or beyond
    /// `limit` (pass `u64::MAX` to bound only by end of file). The terminator
    /// is not included in the result.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::TruncatedString`], carrying the text read so far,
    /// if the bound is reached before a NUL byte.
    pub fn read_cstr_at(&mut self, offset: u64, limit: u64) -> Result<Vec<u8>, ElfError> {
        let bound = limit.min(self.len);
        let mut out = Vec::new();
        let mut pos = offset;
        while pos < bound {
            let want = usize::try_from(bound - pos).map_or(CHUNK_SIZE, |n| n.min(CHUNK_SIZE));
            let chunk = self.read_chunk_at(pos, want)?;
            if chunk.is_empty() {
                break;
            }
            if let Some(nul) = chunk.iter().position(|&b| b == 0) {
                out.extend_from_slice(&chunk[..nul]);
                return Ok(out);
            }
            out.extend_from_slice(&chunk);
            pos += chunk.len() as u64;
        }
        Err(ElfError::TruncatedString {
            offset,
            partial: String::from_utf8_lossy(&out).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(bytes: &[u8]) -> ByteSource<Cursor<Vec<u8>>> {
        ByteSource::new(Cursor::new(bytes.to_vec())).expect("cursor seeks")
    }

    #[test]
    fn measures_length() {
        let src = source(&[0u8; 10]);
        assert_eq!(src.len(), 10);
        assert!(!src.is_empty());
        assert!(source(&[]).is_empty());
    }

    #[test]
    fn read_exact_in_bounds() {
        let mut src = source(b"0123456789");
        let mut buf = [0u8; 4];
        src.read_exact_at(3, &mut buf).unwrap();
        assert_eq!(&buf, b"3456");
    }

    #[test]
    fn read_exact_past_end_reports_context() {
        let mut src = source(b"0123456789");
        let mut buf = [0u8; 8];
        assert_eq!(
            src.read_exact_at(6, &mut buf),
            Err(ElfError::TruncatedRead {
                offset: 6,
                expected: 8,
                available: 4,
            })
        );
    }

    #[test]
    fn read_vec_rejects_oversized_length_before_allocating() {
        let mut src = source(b"abc");
        let err = src.read_vec_at(0, u64::MAX).unwrap_err();
        assert!(matches!(err, ElfError::TruncatedRead { available: 3, .. }));
    }

    #[test]
    fn read_chunk_is_clamped() {
        let mut src = source(b"abcdef");
        assert_eq!(src.read_chunk_at(4, 64).unwrap(), b"ef");
        assert!(src.read_chunk_at(6, 64).unwrap().is_empty());
        assert!(src.read_chunk_at(100, 64).unwrap().is_empty());
    }

    #[test]
    fn cstr_spans_chunk_boundaries() {
        let long = "x".repeat(CHUNK_SIZE * 2 + 5);
        let mut bytes = vec![0u8];
        bytes.extend_from_slice(long.as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(b"tail\0");
        let mut src = source(&bytes);
        assert_eq!(src.read_cstr_at(1, u64::MAX).unwrap(), long.as_bytes());
    }

    #[test]
    fn cstr_terminator_at_chunk_edge() {
        let mut bytes = vec![b'a'; CHUNK_SIZE];
        bytes.push(0);
        let mut src = source(&bytes);
        assert_eq!(src.read_cstr_at(0, u64::MAX).unwrap().len(), CHUNK_SIZE);
    }

    #[test]
    fn cstr_without_terminator_is_truncated() {
        let mut src = source(b"\0abc");
        assert_eq!(
            src.read_cstr_at(1, u64::MAX),
            Err(ElfError::TruncatedString {
                offset: 1,
                partial: "abc".into(),
            })
        );
    }

    #[test]
    fn cstr_respects_limit() {
        let mut src = source(b"abcdef\0");
        assert_eq!(
            src.read_cstr_at(0, 3),
            Err(ElfError::TruncatedString {
                offset: 0,
                partial: "abc".into(),
            })
        );
    }
}
