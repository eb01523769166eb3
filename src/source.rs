//
// Copyright (c) 2016 KAMADA Ken'ichi.
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions
// are met:
// 1. Redistributions of source code must retain the above copyright
//    notice, this list of conditions and the following disclaimer.
// 2. Redistributions in binary form must reproduce the above copyright
//    notice, this list of conditions and the following disclaimer in the
//    documentation and/or other materials provided with the distribution.
//
// THIS SOFTWARE IS PROVIDED BY THE AUTHOR AND CONTRIBUTORS ``AS IS'' AND
// ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED.  IN NO EVENT SHALL THE AUTHOR OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS
// OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION)
// HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT
// LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY
// OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF
// SUCH DAMAGE.
//

//! Random-access byte sources shared by all decoding stages.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, ReadBytesExt};

use crate::error::{Error, FormatError};

/// A seekable, readable byte range.
///
/// Any `Read + Seek` qualifies: `io::Cursor` over a slice, a `Vec<u8>`
/// or a memory map, a `File`, or a `BufReader` around one.
pub trait ByteSource: Read + Seek {}

impl<T: Read + Seek + ?Sized> ByteSource for T {}

/// A cursor over a `ByteSource` with bounds-checked reads.
///
/// All offsets are absolute within the source.  Reads that would run
/// past the end fail with `FormatError::TruncatedData`.
#[derive(Debug)]
pub struct ByteCursor<R> {
    inner: R,
    len: u64,
}

impl<R> ByteCursor<R>
where
    R: ByteSource,
{
    /// Wraps `inner` and rewinds it to offset 0.
    pub fn new(mut inner: R) -> Result<Self, Error> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, len })
    }

    /// Total length of the source in bytes.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn position(&mut self) -> Result<u64, Error> {
        Ok(self.inner.stream_position()?)
    }

    /// Moves the cursor to `pos`.  Seeking exactly to the end is allowed.
    pub fn seek(&mut self, pos: u64) -> Result<(), Error> {
        if pos > self.len {
            return Err(FormatError::TruncatedData.into());
        }
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Number of bytes between the cursor and the end of the source.
    pub fn remaining(&mut self) -> Result<u64, Error> {
        let pos = self.position()?;
        Ok(self.len.saturating_sub(pos))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        // Checked before allocating so that a bogus count cannot
        // request an arbitrarily large buffer.
        if self.remaining()? < n as u64 {
            return Err(FormatError::TruncatedData.into());
        }
        let mut buf = vec![0; n];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut buf = [0; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u16<E: ByteOrder>(&mut self) -> Result<u16, Error> {
        Ok(self.inner.read_u16::<E>()?)
    }

    pub fn read_u32<E: ByteOrder>(&mut self) -> Result<u32, Error> {
        Ok(self.inner.read_u32::<E>()?)
    }

    /// Fills as much of `buf` as the source allows and returns the
    /// number of bytes read.  Zero means end of source.
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        Ok(filled)
    }

    /// Reads `n` bytes at `pos` without moving the cursor.
    pub fn read_at(&mut self, pos: u64, n: usize) -> Result<Vec<u8>, Error> {
        self.preserving(|c| {
            c.seek(pos)?;
            c.read_bytes(n)
        })
    }

    /// Runs `f` and puts the cursor back where it was, whether `f`
    /// succeeded or not.
    pub fn preserving<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let pos = self.position()?;
        let result = f(self);
        self.inner.seek(SeekFrom::Start(pos))?;
        result
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
