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

//! Location of the Exif (APP1) segment in a JPEG stream.

use byteorder::BigEndian;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::error::{Error, FormatError};
use crate::source::{ByteCursor, ByteSource};

/// JPEG markers the locator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u16)]
pub enum Marker {
    /// Start of image.
    Soi = 0xffd8,
    /// JFIF application segment.
    App0 = 0xffe0,
    /// Exif application segment.
    App1 = 0xffe1,
}

// "Exif" followed by a NUL and a padding NUL [EXIF23 4.7.2].
const EXIF_ID_CODE: [u8; 6] = *b"Exif\0\0";
// Marker and length field.
const SEGMENT_HEADER_LEN: u64 = 4;
const APP1_BYTES: [u8; 2] = [0xff, 0xe1];

pub const DEFAULT_SEARCH_CHUNK: usize = 1024;

/// An APP1 segment found in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct App1Segment {
    /// Absolute offset of the APP1 marker.
    pub offset: u64,
    /// Declared segment length (excluding the marker itself).
    pub length: u16,
}

impl App1Segment {
    /// Offset of the Exif identifier code.
    #[inline]
    pub fn payload_start(&self) -> u64 {
        self.offset + SEGMENT_HEADER_LEN
    }

    /// Offset of the TIFF header, the base of all IFD offsets.
    #[inline]
    pub fn tiff_base(&self) -> u64 {
        self.payload_start() + EXIF_ID_CODE.len() as u64
    }
}

/// Finds the APP1 segment and validates its Exif identifier.
/// Returns the absolute offset of the TIFF header.
pub fn get_exif_attr<R>(cursor: &mut ByteCursor<R>, chunk_size: usize) -> Result<u64, Error>
where
    R: ByteSource,
{
    let segment = find_app1(cursor, chunk_size)?;
    log::debug!("APP1 segment at {} ({} bytes)", segment.offset, segment.length);
    check_exif_header(cursor, &segment)?;
    Ok(segment.tiff_base())
}

/// Locates the APP1 segment.
///
/// The marker right after SOI is tried first, then the marker right
/// after a leading APP0 (JFIF) segment.  Failing both, the rest of the
/// stream is scanned for the APP1 byte sequence `chunk_size` bytes at
/// a time.
pub fn find_app1<R>(cursor: &mut ByteCursor<R>, chunk_size: usize) -> Result<App1Segment, Error>
where
    R: ByteSource,
{
    cursor.seek(0)?;
    let soi = match cursor.read_array::<2>() {
        Ok(soi) => soi,
        Err(Error::Format(FormatError::TruncatedData)) => {
            return Err(FormatError::NotAJpeg.into())
        }
        Err(e) => return Err(e),
    };
    if Marker::from_u16(u16::from_be_bytes(soi)) != Some(Marker::Soi) {
        return Err(FormatError::NotAJpeg.into());
    }

    let mut offset = 2;
    match marker_at(cursor, offset)? {
        Some(Marker::App1) => {
            log::debug!("APP1 follows SOI at offset {}", offset);
            return segment_at(cursor, offset);
        }
        Some(Marker::App0) => {
            let app0_len = cursor.read_u16::<BigEndian>()?;
            offset += 2 + u64::from(app0_len);
            if marker_at(cursor, offset)? == Some(Marker::App1) {
                log::debug!("APP1 follows JFIF APP0 at offset {}", offset);
                return segment_at(cursor, offset);
            }
        }
        _ => {}
    }

    match search_app1(cursor, offset, chunk_size)? {
        Some(found) => {
            log::debug!("APP1 found by scanning at offset {}", found);
            segment_at(cursor, found)
        }
        None => Err(FormatError::NoExifSegment.into()),
    }
}

/// Requires the APP1 payload to start with the Exif identifier code.
pub fn check_exif_header<R>(cursor: &mut ByteCursor<R>, segment: &App1Segment) -> Result<(), Error>
where
    R: ByteSource,
{
    match cursor.read_at(segment.payload_start(), EXIF_ID_CODE.len()) {
        Ok(id) if id == EXIF_ID_CODE => Ok(()),
        Ok(_) | Err(Error::Format(FormatError::TruncatedData)) => {
            Err(FormatError::InvalidExifHeader.into())
        }
        Err(e) => Err(e),
    }
}

// Reads the two-byte marker at `offset`.  Leaves the cursor right after
// it.  None if the stream ends first or the marker is not one we know.
fn marker_at<R>(cursor: &mut ByteCursor<R>, offset: u64) -> Result<Option<Marker>, Error>
where
    R: ByteSource,
{
    if offset + 2 > cursor.len() {
        return Ok(None);
    }
    cursor.seek(offset)?;
    Ok(Marker::from_u16(cursor.read_u16::<BigEndian>()?))
}

fn segment_at<R>(cursor: &mut ByteCursor<R>, offset: u64) -> Result<App1Segment, Error>
where
    R: ByteSource,
{
    cursor.seek(offset + 2)?;
    let length = cursor.read_u16::<BigEndian>()?;
    Ok(App1Segment { offset, length })
}

fn search_app1<R>(
    cursor: &mut ByteCursor<R>,
    from: u64,
    chunk_size: usize,
) -> Result<Option<u64>, Error>
where
    R: ByteSource,
{
    if from >= cursor.len() {
        return Ok(None);
    }
    cursor.seek(from)?;
    let mut buf = vec![0; chunk_size.max(2)];
    let mut base = from;
    // The last byte of the previous chunk, for matches straddling
    // a chunk boundary.
    let mut last = None;
    loop {
        let n = cursor.read_chunk(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        if last == Some(APP1_BYTES[0]) && buf[0] == APP1_BYTES[1] {
            return Ok(Some(base - 1));
        }
        if let Some(i) = buf[..n].windows(2).position(|w| w == APP1_BYTES) {
            return Ok(Some(base + i as u64));
        }
        last = Some(buf[n - 1]);
        base += n as u64;
    }
}
