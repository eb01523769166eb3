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

use std::collections::{BTreeMap, HashSet};

use crate::error::Error;
use crate::source::{ByteCursor, ByteSource};
use crate::tag;
use crate::value::Value;

/// Bounds on the work a single decode may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest sub-IFD nesting; IFD0 is depth 0.
    pub max_ifd_depth: u32,
    /// Largest entry count accepted for one IFD.
    pub max_entries: u16,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_ifd_depth: 4,
            max_entries: 1024,
        }
    }
}

#[derive(Debug)]
pub struct Parser {
    pub entries: BTreeMap<String, Value>,
    pub little_endian: bool,
    pub limits: Limits,
    // Absolute offsets of the IFDs entered so far.
    pub visited: HashSet<u64>,
}

pub trait Parse {
    /// Decodes the TIFF structure whose header starts at `tiff_base`.
    fn parse<R: ByteSource>(&mut self, cursor: &mut ByteCursor<R>, tiff_base: u64) -> Result<(), Error>;
}

impl Parser {
    pub fn new(limits: Limits) -> Self {
        Self {
            entries: BTreeMap::new(),
            little_endian: false,
            limits,
            visited: HashSet::new(),
        }
    }

    /// Fills in the catalog default of every tag that has one.
    pub fn seed_defaults(&mut self) {
        for desc in tag::all() {
            if let Some(value) = desc.default_value() {
                self.entries.insert(desc.name.to_owned(), value);
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}
