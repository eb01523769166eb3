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

//! This is a pure-Rust library to extract the Exif metadata of JPEG
//! images.
//!
//! The APP1 segment of the image is located, the TIFF structure in it
//! is decoded, and the result is returned as a map from field names to
//! values.  Enumerated values are translated to their descriptions and
//! the catalog defaults are filled in for fields the image omits.
//!
//! # Examples
//!
//! To parse the Exif attributes of an image file:
//!
//! ```no_run
//! for path in &["tests/exif.jpg"] {
//!     let exif = vogel::Reader::new().read_from_path(path)?;
//!     for (name, value) in &exif {
//!         println!("{}: {}", name, value);
//!     }
//! }
//! # Ok::<(), vogel::Error>(())
//! ```
//!
//! Any seekable stream can be read with
//! [`Reader::read_from_container`], and a bare TIFF structure with
//! [`Reader::read_raw`].
//!
//! # Limitations
//!
//! The GPS IFD is skipped, and the thumbnail IFD chain (IFD1 and on)
//! is not followed.

#[cfg(test)]
#[macro_use]
mod tmacro;

pub use error::{Error, FormatError};
pub use exif::{ExifFields, Iter};
pub use ifd::DateTime;
pub use reader::Reader;
pub use source::{ByteCursor, ByteSource};
pub use tag::{Tag, TagDescriptor};
pub use value::{Rational, SRational, Type, Value};

mod error;
mod exif;
mod ifd;
mod jpeg;
mod parser;
mod reader;
mod source;
pub mod tag;
mod tiff;
mod util;
mod value;
