//! Forward-only byte cursor shared by the HGR and NTX decoders
//!
//! Wraps any [`Read`] source and tracks the absolute offset so every failure
//! can be reported at the byte where it happened. There is no seeking; both
//! formats are laid out strictly in read order.
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::half::half_to_f32;
use crate::error::{Error, Result};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Upper bound on speculative `Vec` pre-allocation from counts read out of a file.
///
/// Counts come straight from untrusted data; anything past this grows on demand
/// and a truncated file fails with `UnexpectedEof` long before memory runs out.
pub const MAX_PREALLOC: usize = 1 << 16;

/// Capacity to reserve for `count` elements read from a file.
#[must_use]
pub fn bounded_capacity(count: usize) -> usize {
    count.min(MAX_PREALLOC)
}

/// Sequential reader over a byte source.
pub struct ByteReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteReader<R> {
    /// Wrap a byte source, starting at offset 0.
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    fn read_with<T>(&mut self, len: u64, f: impl FnOnce(&mut R) -> io::Result<T>) -> Result<T> {
        match f(&mut self.inner) {
            Ok(value) => {
                self.position += len;
                Ok(value)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::UnexpectedEof {
                offset: self.position,
            }),
            Err(e) => Err(Error::Io(e)),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_with(1, |r| r.read_u8())
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.read_with(2, |r| r.read_u16::<LittleEndian>())
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.read_with(4, |r| r.read_u32::<LittleEndian>())
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.read_with(2, |r| r.read_u16::<BigEndian>())
    }

    pub fn read_i16_be(&mut self) -> Result<i16> {
        self.read_with(2, |r| r.read_i16::<BigEndian>())
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.read_with(4, |r| r.read_u32::<BigEndian>())
    }

    pub fn read_i32_be(&mut self) -> Result<i32> {
        self.read_with(4, |r| r.read_i32::<BigEndian>())
    }

    pub fn read_f32_be(&mut self) -> Result<f32> {
        self.read_with(4, |r| r.read_f32::<BigEndian>())
    }

    /// Read a big-endian 16-bit pattern and decode it with [`half_to_f32`].
    pub fn read_half_f32(&mut self) -> Result<f32> {
        self.read_u16_be().map(half_to_f32)
    }

    /// Read `N` big-endian floats into a fixed array.
    pub fn read_f32_array_be<const N: usize>(&mut self) -> Result<[f32; N]> {
        let mut values = [0.0f32; N];
        for value in &mut values {
            *value = self.read_f32_be()?;
        }
        Ok(values)
    }

    /// Read exactly `N` raw bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_with(N as u64, |r| r.read_exact(&mut buf))?;
        Ok(buf)
    }

    /// Read exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_with(len as u64, |r| r.read_exact(&mut buf))?;
        Ok(buf)
    }

    /// Read `len` bytes as characters. Not NUL-terminated; invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn read_fixed_chars(&mut self, len: usize) -> Result<String> {
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a big-endian u16 length followed by that many characters.
    pub fn read_prefixed_string(&mut self) -> Result<String> {
        let len = self.read_u16_be()? as usize;
        self.read_fixed_chars(len)
    }

    /// Read a little-endian packed integer of `bytes` bytes (1-4).
    pub fn read_packed_le(&mut self, bytes: usize) -> Result<u32> {
        debug_assert!((1..=4).contains(&bytes));
        let mut buf = [0u8; 4];
        self.read_with(bytes as u64, |r| r.read_exact(&mut buf[..bytes]))?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Consume the rest of the source and return how many bytes it held.
    pub fn remaining_len(&mut self) -> Result<u64> {
        let skipped = io::copy(&mut self.inner, &mut io::sink())?;
        self.position += skipped;
        Ok(skipped)
    }
}
