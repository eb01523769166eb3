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

//! Error types.

use std::io;

use thiserror::Error;

/// An error returned when parsing of Exif data fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The container or the Exif structure is malformed.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// An I/O error other than a premature end of the input.
    #[error("I/O error: {0}")]
    Io(io::Error),
    /// A decoded value could not be interpreted by a helper
    /// such as `DateTime::from_ascii`.
    #[error("Invalid format: {0}")]
    InvalidFormat(&'static str),
}

/// Structural violations found while decoding a JPEG/Exif stream.
///
/// All of them abort the decode.  Unknown tags and untranslated values
/// are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The stream does not start with the SOI marker.
    #[error("not a JPEG stream")]
    NotAJpeg,
    /// No APP1 segment was found.
    #[error("no Exif (APP1) segment found")]
    NoExifSegment,
    /// The APP1 segment does not start with the Exif identifier.
    #[error("invalid Exif header")]
    InvalidExifHeader,
    /// Bad byte order mark or bad magic number.
    #[error("invalid TIFF header")]
    InvalidTiffHeader,
    /// A read ran past the end of the input.
    #[error("truncated data")]
    TruncatedData,
    /// An IFD entry uses a type code outside the known set.
    #[error("unknown value type {0}")]
    UnknownType(u16),
    /// A directory pointer is cyclic, nested too deeply, or declares
    /// too many entries.
    #[error("directory offset out of bounds")]
    OffsetOutOfBounds,
}

impl Error {
    /// Returns the structural error kind, if this is one.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            Error::Format(e) => Some(e),
            _ => None,
        }
    }
}

// A short read is always a property of the input, not of the
// underlying device.
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::Format(FormatError::TruncatedData),
            _ => Error::Io(err),
        }
    }
}
