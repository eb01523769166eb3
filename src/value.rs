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

use std::borrow::Cow;
use std::fmt;

use byteorder::ByteOrder;

use crate::error::{Error, FormatError};
use crate::source::{ByteCursor, ByteSource};

// Capacity of the value/offset field of an IFD entry.
const INLINE_CAPACITY: usize = 4;

/// A decoded Exif value.
///
/// Entries with a count of 1 decode to a scalar variant, larger counts
/// to a `Tuple` of scalars.  ASCII values are always a single string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// BYTE, SHORT, or LONG.
    Unsigned(u32),
    /// SLONG.
    Signed(i32),
    /// RATIONAL.
    Rational(Rational),
    /// SRATIONAL.
    SRational(SRational),
    /// Several elements of one of the numeric types.
    Tuple(Vec<Value>),
    /// ASCII, without the NUL terminator.
    Ascii(String),
    /// The raw value/offset field of an UNDEFINED entry.
    Undefined(Vec<u8>),
    /// A display string substituted through the tag's value map.
    Translated(&'static str),
}

impl Value {
    /// Returns the unsigned integer if this is a scalar `Unsigned`.
    pub fn as_uint(&self) -> Option<u32> {
        match *self {
            Value::Unsigned(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the integer if this is a scalar `Unsigned` or `Signed`.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Unsigned(v) => Some(v.into()),
            Value::Signed(v) => Some(v.into()),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<Rational> {
        match *self {
            Value::Rational(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the text of an `Ascii` or `Translated` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Ascii(s) => Some(s),
            Value::Translated(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the raw bytes of an `Undefined` value or the bytes of
    /// an `Ascii` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Undefined(v) => Some(v),
            Value::Ascii(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Unsigned(v) => write!(f, "{}", v),
            Value::Signed(v) => write!(f, "{}", v),
            Value::Rational(v) => write!(f, "{}", v),
            Value::SRational(v) => write!(f, "{}", v),
            Value::Tuple(v) => {
                f.write_str("(")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", x)?;
                }
                f.write_str(")")
            }
            Value::Ascii(s) => f.write_str(s),
            Value::Undefined(v) => {
                if v.iter().all(|&c| (0x20..0x7f).contains(&c)) {
                    v.iter().try_for_each(|&c| write!(f, "{}", c as char))
                } else {
                    f.write_str("0x")?;
                    v.iter().try_for_each(|c| write!(f, "{:02x}", c))
                }
            }
            Value::Translated(s) => f.write_str(s),
        }
    }
}

/// An unsigned rational number, which is a pair of 32-bit unsigned
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    /// Converts the value to an f64.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.denom as f64
    }
}

impl From<(u32, u32)> for Rational {
    fn from(t: (u32, u32)) -> Rational {
        Rational {
            num: t.0,
            denom: t.1,
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

/// A signed rational number, which is a pair of 32-bit signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SRational {
    pub num: i32,
    pub denom: i32,
}

impl SRational {
    /// Converts the value to an f64.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.denom as f64
    }
}

impl From<(i32, i32)> for SRational {
    fn from(t: (i32, i32)) -> SRational {
        SRational {
            num: t.0,
            denom: t.1,
        }
    }
}

impl fmt::Display for SRational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

/// Exif data types [EXIF23 4.6.2].
#[derive(Debug, Clone, Copy, PartialEq, Eq, enumn::N)]
#[repr(u16)]
pub enum Type {
    Byte = 1,
    Ascii = 2,
    Short = 3,
    Long = 4,
    Rational = 5,
    Undefined = 7,
    SLong = 9,
    SRational = 10,
}

impl Type {
    /// Size in bytes of one element.
    pub fn element_size(self) -> usize {
        match self {
            Type::Byte | Type::Ascii | Type::Undefined => 1,
            Type::Short => 2,
            Type::Long | Type::SLong => 4,
            Type::Rational | Type::SRational => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Byte => "BYTE",
            Type::Ascii => "ASCII",
            Type::Short => "SHORT",
            Type::Long => "LONG",
            Type::Rational => "RATIONAL",
            Type::Undefined => "UNDEFINED",
            Type::SLong => "SLONG",
            Type::SRational => "SRATIONAL",
        }
    }
}

/// How to decode one element of a type in a given byte order.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    pub typ: Type,
    pub element_size: usize,
    pub parser: fn(&[u8]) -> Value,
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("typ", &self.typ)
            .field("element_size", &self.element_size)
            .finish()
    }
}

impl TypeDescriptor {
    /// Size in bytes of `count` elements, if it fits in a usize.
    pub fn byte_len(&self, count: u32) -> Option<usize> {
        self.element_size.checked_mul(count as usize)
    }

    /// Decodes `data`, which must be exactly `count` elements long.
    pub fn decode(&self, data: &[u8], count: u32) -> Value {
        match self.typ {
            Type::Ascii => {
                let end = data.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
                Value::Ascii(String::from_utf8_lossy(&data[..end]).into_owned())
            }
            Type::Undefined => Value::Undefined(data.to_vec()),
            _ => {
                let mut elems = data
                    .chunks_exact(self.element_size)
                    .map(self.parser)
                    .collect::<Vec<_>>();
                if count == 1 && elems.len() == 1 {
                    elems.swap_remove(0)
                } else {
                    Value::Tuple(elems)
                }
            }
        }
    }
}

/// Returns the descriptor for the type code `typ`.
pub fn get_type_info<E>(typ: u16) -> Result<TypeDescriptor, Error>
where
    E: ByteOrder,
{
    let typ = Type::n(typ).ok_or(FormatError::UnknownType(typ))?;
    let parser: fn(&[u8]) -> Value = match typ {
        Type::Byte | Type::Ascii | Type::Undefined => parse_byte,
        Type::Short => parse_short::<E>,
        Type::Long => parse_long::<E>,
        Type::Rational => parse_rational::<E>,
        Type::SLong => parse_slong::<E>,
        Type::SRational => parse_srational::<E>,
    };
    Ok(TypeDescriptor {
        typ,
        element_size: typ.element_size(),
        parser,
    })
}

/// Decodes the value of a directory entry.
///
/// `field` is the 4-byte value/offset field of the entry.  Values that
/// do not fit in it are read from `tiff_base` plus the offset stored
/// there.  UNDEFINED values are returned as `field` itself.
pub fn decode_value<E, R>(
    cursor: &mut ByteCursor<R>,
    tiff_base: u64,
    typ: u16,
    count: u32,
    field: [u8; 4],
) -> Result<Value, Error>
where
    E: ByteOrder,
    R: ByteSource,
{
    if typ == Type::Undefined as u16 {
        return Ok(Value::Undefined(field.to_vec()));
    }
    let info = get_type_info::<E>(typ)?;
    let byte_len = info.byte_len(count).ok_or(FormatError::TruncatedData)?;
    let data = if byte_len > INLINE_CAPACITY {
        let ofs = E::read_u32(&field);
        Cow::Owned(cursor.read_at(tiff_base + u64::from(ofs), byte_len)?)
    } else {
        Cow::Borrowed(&field[..byte_len])
    };
    Ok(info.decode(&data, count))
}

fn parse_byte(data: &[u8]) -> Value {
    Value::Unsigned(data[0].into())
}

fn parse_short<E: ByteOrder>(data: &[u8]) -> Value {
    Value::Unsigned(E::read_u16(data).into())
}

fn parse_long<E: ByteOrder>(data: &[u8]) -> Value {
    Value::Unsigned(E::read_u32(data))
}

fn parse_rational<E: ByteOrder>(data: &[u8]) -> Value {
    Value::Rational((E::read_u32(&data[..4]), E::read_u32(&data[4..8])).into())
}

fn parse_slong<E: ByteOrder>(data: &[u8]) -> Value {
    Value::Signed(E::read_i32(data))
}

fn parse_srational<E: ByteOrder>(data: &[u8]) -> Value {
    Value::SRational((E::read_i32(&data[..4]), E::read_i32(&data[4..8])).into())
}
