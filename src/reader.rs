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

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::{Error, FormatError};
use crate::exif::ExifFields;
use crate::jpeg;
use crate::parser::{Limits, Parse, Parser};
use crate::source::{ByteCursor, ByteSource};

/// A struct to parse the Exif attributes of a JPEG image and
/// create an `ExifFields` instance that holds the results.
///
/// # Examples
/// ```
/// use vogel::{Reader, Value};
/// let tiff = b"MM\0\x2a\0\0\0\x08\
///              \0\x01\x01\x28\0\x03\0\0\0\x01\0\x03\0\0\0\0\0\0";
/// let mut jpeg = vec![0xff, 0xd8, 0xff, 0xe1, 0, 8 + tiff.len() as u8];
/// jpeg.extend_from_slice(b"Exif\0\0");
/// jpeg.extend_from_slice(tiff);
///
/// let exif = Reader::new().max_ifd_depth(2).read_from_slice(&jpeg)?;
/// assert_eq!(exif.get("ResolutionUnit"), Some(&Value::Translated("centimeters")));
/// # Ok::<(), vogel::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reader {
    limits: Limits,
    search_chunk_size: usize,
}

impl Reader {
    /// Constructs a new `Reader` with the default limits.
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            search_chunk_size: jpeg::DEFAULT_SEARCH_CHUNK,
        }
    }

    /// Sets the deepest sub-IFD nesting to follow.  IFD0 is depth 0.
    pub fn max_ifd_depth(mut self, depth: u32) -> Self {
        self.limits.max_ifd_depth = depth;
        self
    }

    /// Sets the largest entry count accepted for one IFD.
    pub fn max_entries(mut self, entries: u16) -> Self {
        self.limits.max_entries = entries;
        self
    }

    /// Sets the window size of the fallback APP1 search.  Values
    /// below 2 are raised to 2.
    pub fn search_chunk_size(mut self, size: usize) -> Self {
        self.search_chunk_size = size.max(2);
        self
    }

    /// Parses the Exif attributes from a bare TIFF structure, such as
    /// the payload of an APP1 segment after the Exif identifier.
    pub fn read_raw(&self, data: &[u8]) -> Result<ExifFields, Error> {
        let mut cursor = ByteCursor::new(Cursor::new(data))?;
        self.decode(&mut cursor, 0)
    }

    /// Reads a JPEG image held in memory and parses the Exif
    /// attributes in it.
    pub fn read_from_slice(&self, data: &[u8]) -> Result<ExifFields, Error> {
        self.read_from_container(&mut Cursor::new(data))
    }

    /// Reads a JPEG image from a seekable stream and parses the Exif
    /// attributes in it.  The stream is read from its start.
    pub fn read_from_container<R>(&self, reader: &mut R) -> Result<ExifFields, Error>
    where
        R: Read + Seek,
    {
        let mut cursor = ByteCursor::new(reader)?;
        let tiff_base = jpeg::get_exif_attr(&mut cursor, self.search_chunk_size)?;
        self.decode(&mut cursor, tiff_base)
    }

    /// Maps the file at `path` into memory and parses the Exif
    /// attributes in it.
    pub fn read_from_path<P>(&self, path: P) -> Result<ExifFields, Error>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path.as_ref())?;
        // An empty file cannot be mapped on every platform.
        if file.metadata()?.len() == 0 {
            return Err(FormatError::NotAJpeg.into());
        }
        // SAFETY: the mapping is only read, and only for the duration
        // of this call.  Concurrent truncation of the file by another
        // process is not guarded against.
        let map = unsafe { memmap2::Mmap::map(&file)? };
        log::debug!("mapped {} ({} bytes)", path.as_ref().display(), map.len());
        self.read_from_slice(&map)
    }

    fn decode<R: ByteSource>(&self, cursor: &mut ByteCursor<R>, tiff_base: u64) -> Result<ExifFields, Error> {
        let mut parser = Parser::new(self.limits);
        parser.parse(cursor, tiff_base)?;
        log::debug!("decoded {} fields", parser.entries.len());
        Ok(ExifFields::new(parser.entries, parser.little_endian))
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    // IFD0 holding ResolutionUnit = 3 and an Exif IFD holding
    // ExifVersion = "0231".
    const TIFF: &[u8] = b"MM\x00\x2a\x00\x00\x00\x08\
                          \x00\x02\
                          \x01\x28\x00\x03\x00\x00\x00\x01\x00\x03\x00\x00\
                          \x87\x69\x00\x04\x00\x00\x00\x01\x00\x00\x00\x26\
                          \x00\x00\x00\x00\
                          \x00\x01\x90\x00\x00\x07\x00\x00\x00\x040231\
                          \x00\x00\x00\x00";

    fn jpeg(prefix: &[u8]) -> Vec<u8> {
        let mut v = b"\xff\xd8".to_vec();
        v.extend_from_slice(prefix);
        v.extend_from_slice(b"\xff\xe1");
        v.extend_from_slice(&(8 + TIFF.len() as u16).to_be_bytes());
        v.extend_from_slice(b"Exif\0\0");
        v.extend_from_slice(TIFF);
        v
    }

    #[test]
    fn read_jpeg() {
        let exif = Reader::new().read_from_slice(&jpeg(b"")).unwrap();
        assert!(!exif.little_endian());
        assert_eq!(exif.get("ResolutionUnit"), Some(&Value::Translated("centimeters")));
        assert_eq!(exif.get("ExifVersion"), Some(&Value::Undefined(b"0231".to_vec())));
        // Defaults of fields absent from the image.
        assert_eq!(exif.get("YResolution"), Some(&Value::Rational((72, 1).into())));
    }

    #[test]
    fn read_raw_matches_jpeg() {
        let raw = Reader::new().read_raw(TIFF).unwrap();
        let jpg = Reader::new().read_from_slice(&jpeg(b"")).unwrap();
        assert_eq!(raw, jpg);
    }

    #[test]
    fn read_after_other_segments() {
        let jfif = b"\xff\xe0\x00\x10JFIF\0\x01\x01\0\0\x01\0\x01\0\0";
        let dqt = b"\xff\xdb\x00\x04\x00\x00";
        let expected = Reader::new().read_from_slice(&jpeg(b"")).unwrap();
        for prefix in [&jfif[..], &dqt[..]] {
            for chunk in [1, 2, 3, 7, 1024] {
                let reader = Reader::new().search_chunk_size(chunk);
                assert_eq!(reader.read_from_slice(&jpeg(prefix)).unwrap(), expected);
            }
        }
    }

    #[test]
    fn idempotent() {
        let data = jpeg(b"");
        let reader = Reader::new();
        assert_eq!(reader.read_from_slice(&data).unwrap(), reader.read_from_slice(&data).unwrap());
    }

    #[test]
    fn stream_position_is_ignored() {
        let mut c = Cursor::new(jpeg(b""));
        c.set_position(5);
        let exif = Reader::new().read_from_container(&mut c).unwrap();
        assert!(exif.contains("ExifVersion"));
    }

    #[test]
    fn limits() {
        assert_eq!(Reader::new().search_chunk_size(0).search_chunk_size, 2);
        assert_format_err!(
            Reader::new().max_ifd_depth(0).read_from_slice(&jpeg(b"")),
            FormatError::OffsetOutOfBounds
        );
        assert_format_err!(
            Reader::new().max_entries(1).read_raw(TIFF),
            FormatError::OffsetOutOfBounds
        );
    }

    #[test]
    fn not_jpeg() {
        assert_format_err!(Reader::new().read_from_slice(b""), FormatError::NotAJpeg);
        assert_format_err!(Reader::new().read_from_slice(TIFF), FormatError::NotAJpeg);
        assert_format_err!(
            Reader::new().read_from_slice(b"\xff\xd8\xff\xd9"),
            FormatError::NoExifSegment
        );
    }

    #[test]
    fn missing_file() {
        assert_err_pat!(Reader::new().read_from_path("tests/no-such-file.jpg"), Error::Io(_));
    }
}
