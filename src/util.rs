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

use crate::error::Error;

// This function must not be called with more than 4 bytes.
pub fn atou16(bytes: &[u8]) -> Result<u16, Error> {
    debug_assert!(bytes.len() <= 4);
    bytes
        .iter()
        .try_fold(0u16, |n, &c| Ok(n * 10 + ctou32(c)? as u16))
}

pub fn ctou32(c: u8) -> Result<u32, Error> {
    if !c.is_ascii_digit() {
        return Err(Error::InvalidFormat("Invalid ASCII digit"));
    }
    Ok((c - b'0') as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_digits() {
        assert_eq!(atou16(b"0").unwrap(), 0);
        assert_eq!(atou16(b"2016").unwrap(), 2016);
        assert_eq!(atou16(b"9999").unwrap(), 9999);
        assert_eq!(atou16(b"").unwrap(), 0);
        assert_err_pat!(atou16(b"12a4"), Error::InvalidFormat(_));
        assert_err_pat!(ctou32(b' '), Error::InvalidFormat(_));
        assert_eq!(ctou32(b'7').unwrap(), 7);
    }
}
