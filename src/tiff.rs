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

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, FormatError};
use crate::ifd::{DirectoryEntry, ENTRY_LEN};
use crate::parser::{Parse, Parser};
use crate::source::{ByteCursor, ByteSource};
use crate::tag::Tag;
use crate::value::{decode_value, Type, Value};

// TIFF header magic numbers [EXIF23 4.5.2].
const TIFF_BE: [u8; 2] = *b"MM";
const TIFF_LE: [u8; 2] = *b"II";
const TIFF_FORTY_TWO: u16 = 0x002a;

impl Parse for Parser {
    fn parse<R: ByteSource>(&mut self, cursor: &mut ByteCursor<R>, tiff_base: u64) -> Result<(), Error> {
        self.seed_defaults();
        // Check the byte order and call the real parser.
        cursor.seek(tiff_base)?;
        match cursor.read_array::<2>()? {
            TIFF_BE => {
                self.little_endian = false;
                self.parse_sub::<BigEndian, R>(cursor, tiff_base)
            }
            TIFF_LE => {
                self.little_endian = true;
                self.parse_sub::<LittleEndian, R>(cursor, tiff_base)
            }
            _ => Err(FormatError::InvalidTiffHeader.into()),
        }
    }
}

impl Parser {
    fn parse_sub<E, R>(&mut self, cursor: &mut ByteCursor<R>, tiff_base: u64) -> Result<(), Error>
    where
        E: ByteOrder,
        R: ByteSource,
    {
        // Parse the rest of the header (42 and the IFD offset).
        if cursor.read_u16::<E>()? != TIFF_FORTY_TWO {
            return Err(FormatError::InvalidTiffHeader.into());
        }
        let ifd0_offset = cursor.read_u32::<E>()?;
        log::debug!(
            "TIFF header at {}: {} endian, IFD0 at +{}",
            tiff_base,
            if self.little_endian { "little" } else { "big" },
            ifd0_offset
        );
        // The next IFD (IFD1, the thumbnail) is not followed.
        self.parse_ifd::<E, R>(cursor, tiff_base, ifd0_offset, 0)?;
        Ok(())
    }

    // Parse IFD [EXIF23 4.6.2].  Returns the next IFD offset.  The
    // cursor is left where it was on entry.
    fn parse_ifd<E, R>(
        &mut self,
        cursor: &mut ByteCursor<R>,
        tiff_base: u64,
        offset: u32,
        depth: u32,
    ) -> Result<u32, Error>
    where
        E: ByteOrder,
        R: ByteSource,
    {
        let start = tiff_base + u64::from(offset);
        if depth > self.limits.max_ifd_depth || !self.visited.insert(start) {
            return Err(FormatError::OffsetOutOfBounds.into());
        }
        cursor.preserving(|cursor| {
            cursor.seek(start)?;
            let count = cursor.read_u16::<E>()?;
            if count > self.limits.max_entries {
                return Err(FormatError::OffsetOutOfBounds.into());
            }
            // Array of entries.  (count * 12) never overflows.
            if cursor.remaining()? < u64::from(count) * ENTRY_LEN as u64 {
                return Err(FormatError::TruncatedData.into());
            }
            for _ in 0..count {
                let entry = DirectoryEntry::parse::<E>(&cursor.read_array::<ENTRY_LEN>()?);
                self.parse_ifd_entry::<E, R>(cursor, tiff_base, entry, depth)?;
            }
            // Offset to the next IFD.
            cursor.read_u32::<E>()
        })
    }

    fn parse_ifd_entry<E, R>(
        &mut self,
        cursor: &mut ByteCursor<R>,
        tiff_base: u64,
        entry: DirectoryEntry,
        depth: u32,
    ) -> Result<(), Error>
    where
        E: ByteOrder,
        R: ByteSource,
    {
        log::trace!(
            "entry {:#06x} type {} count {}",
            entry.tag.value(),
            Type::n(entry.typ).map_or("unknown", Type::name),
            entry.count
        );
        let value = decode_value::<E, R>(
            cursor,
            tiff_base,
            entry.typ,
            entry.count,
            entry.value_or_offset,
        )?;
        match entry.tag {
            Tag::GPSInfoIFDPointer => {
                log::debug!("skipping GPS IFD");
                Ok(())
            }
            Tag::ExifIFDPointer => self.parse_child_ifd::<E, R>(cursor, tiff_base, value, depth),
            tag => {
                if tag.descriptor().is_none() {
                    log::debug!("unknown tag {:#06x}", tag.value());
                }
                // A later entry overwrites an earlier one or a default.
                self.entries.insert(tag.name().into_owned(), tag.translate(value));
                Ok(())
            }
        }
    }

    fn parse_child_ifd<E, R>(
        &mut self,
        cursor: &mut ByteCursor<R>,
        tiff_base: u64,
        pointer: Value,
        depth: u32,
    ) -> Result<(), Error>
    where
        E: ByteOrder,
        R: ByteSource,
    {
        // A pointer field has type == LONG and count == 1.
        let offset = pointer.as_uint().ok_or(FormatError::OffsetOutOfBounds)?;
        log::debug!("entering Exif IFD at +{}", offset);
        self.parse_ifd::<E, R>(cursor, tiff_base, offset, depth + 1)?;
        Ok(())
    }
}
