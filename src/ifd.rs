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

use std::fmt;

use byteorder::ByteOrder;

use crate::error::Error;
use crate::tag::Tag;
use crate::util::{atou16, ctou32};

pub const ENTRY_LEN: usize = 12;

/// One 12-byte slot of an IFD [EXIF23 4.6.2].
///
/// Lives only while its IFD is being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub tag: Tag,
    pub typ: u16,
    pub count: u32,
    /// The value itself if it fits, otherwise an offset to it.
    pub value_or_offset: [u8; 4],
}

impl DirectoryEntry {
    pub fn parse<E>(data: &[u8; ENTRY_LEN]) -> DirectoryEntry
    where
        E: ByteOrder,
    {
        DirectoryEntry {
            tag: Tag(E::read_u16(&data[0..2])),
            typ: E::read_u16(&data[2..4]),
            count: E::read_u32(&data[4..8]),
            value_or_offset: [data[8], data[9], data[10], data[11]],
        }
    }
}

/// A struct used to parse a DateTime field.
///
/// # Examples
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use vogel::DateTime;
/// let dt = DateTime::from_ascii(b"2016:05:04 03:02:01")?;
/// assert_eq!(dt.year, 2016);
/// assert_eq!(dt.to_string(), "2016-05-04 03:02:01");
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// The subsecond data in nanoseconds.  If the Exif attribute has
    /// more sigfinicant digits, they are rounded down.
    pub nanosecond: Option<u32>,
}

impl DateTime {
    /// Parse an ASCII data of a DateTime field.  The range of a number
    /// is not validated, so, for example, 13 may be returned as the month.
    pub fn from_ascii(data: &[u8]) -> Result<DateTime, Error> {
        if data == b"    :  :     :  :  " || data == b"                   " {
            return Err(Error::InvalidFormat("DateTime is blank"));
        } else if data.len() < 19 {
            return Err(Error::InvalidFormat("DateTime too short"));
        } else if !(data[4] == b':'
            && data[7] == b':'
            && data[10] == b' '
            && data[13] == b':'
            && data[16] == b':')
        {
            return Err(Error::InvalidFormat("Invalid DateTime delimiter"));
        }
        Ok(DateTime {
            year: atou16(&data[0..4])?,
            month: atou16(&data[5..7])? as u8,
            day: atou16(&data[8..10])? as u8,
            hour: atou16(&data[11..13])? as u8,
            minute: atou16(&data[14..16])? as u8,
            second: atou16(&data[17..19])? as u8,
            nanosecond: None,
        })
    }

    /// Parses an SubsecTime-like field.
    pub fn parse_subsec(&mut self, data: &[u8]) -> Result<(), Error> {
        let mut subsec = 0;
        let mut ndigits = 0;
        for &c in data {
            if c == b' ' {
                break;
            }
            subsec = subsec * 10 + ctou32(c)?;
            ndigits += 1;
            if ndigits >= 9 {
                break;
            }
        }
        if ndigits == 0 {
            self.nanosecond = None;
        } else {
            for _ in ndigits..9 {
                subsec *= 10;
            }
            self.nanosecond = Some(subsec);
        }
        Ok(())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use byteorder::{BigEndian, LittleEndian};

    use super::*;

    #[test]
    fn parse_entry() {
        let raw = b"\x01\x1a\x00\x05\x00\x00\x00\x01\x00\x00\x00\x9e";
        let e = DirectoryEntry::parse::<BigEndian>(raw);
        assert_eq!(e.tag, Tag::XResolution);
        assert_eq!(e.typ, 5);
        assert_eq!(e.count, 1);
        assert_eq!(e.value_or_offset, *b"\0\0\0\x9e");

        let raw = b"\x1a\x01\x05\x00\x01\x00\x00\x00\x9e\x00\x00\x00";
        let e = DirectoryEntry::parse::<LittleEndian>(raw);
        assert_eq!(e.tag, Tag::XResolution);
        assert_eq!(e.typ, 5);
        assert_eq!(e.count, 1);
        assert_eq!(e.value_or_offset, *b"\x9e\0\0\0");
    }

    #[test]
    fn date_time() {
        let mut dt = DateTime::from_ascii(b"2016:05:04 03:02:01").unwrap();
        assert_eq!(dt.year, 2016);
        assert_eq!(dt.to_string(), "2016-05-04 03:02:01");

        dt.parse_subsec(b"987").unwrap();
        assert_eq!(dt.nanosecond.unwrap(), 987000000);
        dt.parse_subsec(b"000987").unwrap();
        assert_eq!(dt.nanosecond.unwrap(), 987000);
        dt.parse_subsec(b"9876543219").unwrap();
        assert_eq!(dt.nanosecond.unwrap(), 987654321);
        dt.parse_subsec(b"130   ").unwrap();
        assert_eq!(dt.nanosecond.unwrap(), 130000000);
        dt.parse_subsec(b"").unwrap();
        assert!(dt.nanosecond.is_none());
        assert_err_pat!(dt.parse_subsec(b"1x"), Error::InvalidFormat(_));
    }

    #[test]
    fn bad_date_time() {
        assert_err_pat!(
            DateTime::from_ascii(b"    :  :     :  :  "),
            Error::InvalidFormat("DateTime is blank")
        );
        assert_err_pat!(
            DateTime::from_ascii(b"2016:05:04"),
            Error::InvalidFormat("DateTime too short")
        );
        assert_err_pat!(
            DateTime::from_ascii(b"2016-05-04 03:02:01"),
            Error::InvalidFormat("Invalid DateTime delimiter")
        );
    }
}
