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

//! Builders for synthetic Exif JPEG images.

#![allow(dead_code)]

/// A field value before it is laid out in a byte order.
#[derive(Debug, Clone)]
pub enum Val {
    Byte(Vec<u8>),
    Ascii(&'static str),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SLong(Vec<i32>),
    Undefined(Vec<u8>),
}

/// A TIFF structure with IFD0, an optional Exif IFD and an optional
/// GPS IFD, in that order.
#[derive(Debug, Clone, Default)]
pub struct TiffBuilder {
    pub little_endian: bool,
    pub ifd0: Vec<(u16, Val)>,
    pub exif: Vec<(u16, Val)>,
    pub gps: Vec<(u16, Val)>,
    /// Filler inserted before each out-of-line value area, pushing
    /// the values to higher offsets.
    pub padding: usize,
}

impl TiffBuilder {
    pub fn new(little_endian: bool) -> Self {
        Self {
            little_endian,
            ..Self::default()
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.little_endian {
            out.extend_from_slice(b"II\x2a\0\x08\0\0\0");
        } else {
            out.extend_from_slice(b"MM\0\x2a\0\0\0\x08");
        }
        let mut pointers = Vec::new();
        if !self.exif.is_empty() {
            pointers.push(0x8769);
        }
        if !self.gps.is_empty() {
            pointers.push(0x8825);
        }
        let slots = self.write_ifd(&mut out, &self.ifd0, &pointers);
        let mut slots = slots.into_iter();
        for sub in [&self.exif, &self.gps] {
            if sub.is_empty() {
                continue;
            }
            let slot = slots.next().unwrap();
            let ofs = self.u32(out.len() as u32);
            out[slot..slot + 4].copy_from_slice(&ofs);
            self.write_ifd(&mut out, sub, &[]);
        }
        out
    }

    // Writes an IFD followed by its value area.  Returns the positions
    // of the value fields of the pointer entries.
    fn write_ifd(&self, out: &mut Vec<u8>, fields: &[(u16, Val)], pointers: &[u16]) -> Vec<usize> {
        let n = fields.len() + pointers.len();
        let area = out.len() + 2 + 12 * n + 4;
        let mut data = vec![0; self.padding];
        out.extend_from_slice(&self.u16(n as u16));
        for (tag, val) in fields {
            let (typ, count, bytes) = self.encode(val);
            out.extend_from_slice(&self.u16(*tag));
            out.extend_from_slice(&self.u16(typ));
            out.extend_from_slice(&self.u32(count));
            if bytes.len() <= 4 {
                let mut inline = bytes.clone();
                inline.resize(4, 0);
                out.extend_from_slice(&inline);
            } else {
                out.extend_from_slice(&self.u32((area + data.len()) as u32));
                data.extend_from_slice(&bytes);
                if data.len() % 2 == 1 {
                    data.push(0);
                }
            }
        }
        let mut slots = Vec::new();
        for tag in pointers {
            out.extend_from_slice(&self.u16(*tag));
            out.extend_from_slice(&self.u16(4));
            out.extend_from_slice(&self.u32(1));
            slots.push(out.len());
            out.extend_from_slice(&[0; 4]);
        }
        // The next IFD offset.
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&data);
        slots
    }

    fn encode(&self, val: &Val) -> (u16, u32, Vec<u8>) {
        match val {
            Val::Byte(v) => (1, v.len() as u32, v.clone()),
            Val::Ascii(s) => {
                let mut v = s.as_bytes().to_vec();
                v.push(0);
                (2, v.len() as u32, v)
            }
            Val::Short(v) => (3, v.len() as u32, v.iter().flat_map(|&x| self.u16(x)).collect()),
            Val::Long(v) => (4, v.len() as u32, v.iter().flat_map(|&x| self.u32(x)).collect()),
            Val::Rational(v) => (
                5,
                v.len() as u32,
                v.iter()
                    .flat_map(|&(n, d)| self.u32(n).into_iter().chain(self.u32(d)))
                    .collect(),
            ),
            Val::SLong(v) => (9, v.len() as u32, v.iter().flat_map(|&x| self.u32(x as u32)).collect()),
            Val::Undefined(v) => (7, v.len() as u32, v.clone()),
        }
    }

    fn u16(&self, x: u16) -> [u8; 2] {
        if self.little_endian {
            x.to_le_bytes()
        } else {
            x.to_be_bytes()
        }
    }

    fn u32(&self, x: u32) -> [u8; 4] {
        if self.little_endian {
            x.to_le_bytes()
        } else {
            x.to_be_bytes()
        }
    }
}

/// What precedes the APP1 segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// APP1 right after SOI.
    Plain,
    /// A JFIF APP0 segment first.
    Jfif,
    /// A quantization table first, so that APP1 must be searched for.
    Dqt,
}

/// Wraps a TIFF structure in a minimal JPEG stream.
pub fn jpeg(tiff: &[u8], layout: Layout) -> Vec<u8> {
    let mut v = vec![0xff, 0xd8];
    match layout {
        Layout::Plain => {}
        Layout::Jfif => v.extend_from_slice(b"\xff\xe0\x00\x10JFIF\0\x01\x01\0\0\x01\0\x01\0\0"),
        Layout::Dqt => v.extend_from_slice(b"\xff\xdb\x00\x06\x00\x01\x02\x03"),
    }
    v.extend_from_slice(&[0xff, 0xe1]);
    v.extend_from_slice(&(8 + tiff.len() as u16).to_be_bytes());
    v.extend_from_slice(b"Exif\0\0");
    v.extend_from_slice(tiff);
    // Start of scan and end of image.
    v.extend_from_slice(b"\xff\xda\x00\x02\xff\xd9");
    v
}

/// A camera-like sample carrying every mandatory field.
pub fn sample(little_endian: bool) -> TiffBuilder {
    let mut b = TiffBuilder::new(little_endian);
    b.ifd0 = vec![
        (0x010f, Val::Ascii("Vogel")),
        (0x0110, Val::Ascii("Model 7")),
        (0x011a, Val::Rational(vec![(300, 1)])),
        (0x011b, Val::Rational(vec![(300, 1)])),
        (0x0128, Val::Short(vec![2])),
        (0x0132, Val::Ascii("2016:05:04 03:02:01")),
        (0x0213, Val::Short(vec![2])),
    ];
    b.exif = vec![
        (0x829a, Val::Rational(vec![(1, 60)])),
        (0x9000, Val::Undefined(b"0231".to_vec())),
        (0x9003, Val::Ascii("2016:05:04 03:02:01")),
        (0x9101, Val::Undefined(vec![1, 2, 3, 0])),
        (0x9291, Val::Ascii("25")),
        (0xa000, Val::Undefined(b"0100".to_vec())),
        (0xa001, Val::Short(vec![1])),
        (0xa002, Val::Long(vec![640])),
        (0xa003, Val::Short(vec![480])),
    ];
    b.gps = vec![
        (0x0001, Val::Ascii("N")),
        (0x0002, Val::Rational(vec![(35, 1), (39, 1), (2, 1)])),
    ];
    b
}
