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

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::error::Error;
use crate::ifd::DateTime;
use crate::tag::Tag;
use crate::value::Value;

/// The decoded Exif fields of an image, keyed by field name.
///
/// Every field that has a catalog default is present even if the image
/// does not record it.  Fields with unknown tags are named
/// `NA-0x<hex>`.
///
/// # Examples
/// ```
/// use vogel::{Reader, Value};
/// let data = b"MM\0\x2a\0\0\0\x08\
///              \0\x01\x01\x0f\0\x02\0\0\0\x04Foo\0\0\0\0\0";
/// let exif = Reader::new().read_raw(data)?;
/// assert_eq!(exif.get("Make").and_then(Value::as_str), Some("Foo"));
/// assert_eq!(exif.get("ResolutionUnit").unwrap().to_string(), "inches");
/// # Ok::<(), vogel::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifFields {
    fields: BTreeMap<String, Value>,
    little_endian: bool,
}

impl ExifFields {
    pub(crate) fn new(fields: BTreeMap<String, Value>, little_endian: bool) -> Self {
        Self {
            fields,
            little_endian,
        }
    }

    /// Returns the value of the field named `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the value of the field for `tag`.
    pub fn get_tag(&self, tag: Tag) -> Option<&Value> {
        self.fields.get(tag.name().as_ref())
    }

    /// Returns the value of the field named `name`, or `default` if
    /// it is absent.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.get(name).unwrap_or(default)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over the fields in name order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.fields.iter())
    }

    /// Returns true if the TIFF data is in the little-endian byte order.
    #[inline]
    pub fn little_endian(&self) -> bool {
        self.little_endian
    }

    /// Parses a DateTime-like field.  The matching SubSecTime field,
    /// if any, supplies the subsecond part.
    ///
    /// Returns None if the field is absent or is not text.
    pub fn date_time(&self, name: &str) -> Option<Result<DateTime, Error>> {
        let ascii = self.get(name)?.as_str()?;
        let subsec = match name {
            "DateTime" => Some(Tag::SubSecTime),
            "DateTimeOriginal" => Some(Tag::SubSecTimeOriginal),
            "DateTimeDigitized" => Some(Tag::SubSecTimeDigitized),
            _ => None,
        };
        Some(DateTime::from_ascii(ascii.as_bytes()).and_then(|mut dt| {
            if let Some(s) = subsec.and_then(|t| self.get_tag(t)).and_then(Value::as_str) {
                dt.parse_subsec(s.as_bytes())?;
            }
            Ok(dt)
        }))
    }
}

/// An iterator over the fields of an [`ExifFields`], in name order.
#[derive(Debug, Clone)]
pub struct Iter<'a>(btree_map::Iter<'a, String, Value>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a ExifFields {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
