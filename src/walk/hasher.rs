//! Streaming FNV-1 checksum computation for file content.
//!
//! The checksum is the 32-bit FNV-1 variant: the accumulator is multiplied
//! by the prime first and then XORed with each byte, in stream order. The
//! common `fnv` crate implements FNV-1a (XOR first), which produces
//! different values, so the kernel is written out here.

use std::io::{ErrorKind, Read};

/// FNV-1 32-bit offset basis.
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1 32-bit prime.
const FNV_PRIME: u32 = 0x0100_0193;

/// Default read buffer size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Fold a chunk of bytes into the accumulator.
fn fold(mut hash: u32, bytes: &[u8]) -> u32 {
    for &byte in bytes {
        hash = hash.wrapping_mul(FNV_PRIME) ^ u32::from(byte);
    }
    hash
}

/// Compute the FNV-1 checksum of a byte slice.
pub fn fnv1(bytes: &[u8]) -> u32 {
    fold(FNV_OFFSET_BASIS, bytes)
}

/// Streaming FNV-1 hasher with a reusable read buffer.
///
/// The accumulator is fresh for every stream; the buffer is allocated once
/// and shared across files so a long run does not churn allocations.
#[derive(Debug)]
pub struct FnvHasher {
    buffer: Vec<u8>,
}

impl FnvHasher {
    /// Create a hasher with the default buffer size.
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Create a hasher with a custom buffer size.
    ///
    /// A zero size is bumped to one byte; reads into an empty buffer would
    /// report end-of-stream for every file.
    pub fn with_buffer_size(size: usize) -> Self {
        Self {
            buffer: vec![0u8; size.max(1)],
        }
    }

    /// Hash an entire stream.
    ///
    /// The result is independent of the buffer size: bytes are folded in
    /// stream order one at a time. `Interrupted` reads are retried; any
    /// other read error is returned and the partial accumulator discarded.
    pub fn hash_reader<R: Read>(&mut self, reader: &mut R) -> std::io::Result<u32> {
        let mut hash = FNV_OFFSET_BASIS;
        loop {
            let n = match reader.read(&mut self.buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hash = fold(hash, &self.buffer[..n]);
        }
        Ok(hash)
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}
