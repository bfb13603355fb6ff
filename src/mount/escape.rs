//! Octal escape decoding for text mount tables.
//!
//! The kernel writes space, tab, newline and backslash inside mount paths as
//! `\NNN` (three octal digits). Decoding reverses exactly that encoding.
use std::borrow::Cow;

/// Decode `\NNN` sequences. Sequences that are not three octal digits, or
/// whose value does not fit a byte, are left as-is.
#[must_use]
pub fn octal_deslash(s: &[u8]) -> Cow<'_, [u8]> {
    if !s.contains(&b'\\') {
        return Cow::Borrowed(s);
    }
    let mut out = Vec::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        if s[i] == b'\\' {
            if let Some(byte) = s.get(i + 1..i + 4).and_then(octal_byte) {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(s[i]);
        i += 1;
    }
    Cow::Owned(out)
}

fn octal_byte(digits: &[u8]) -> Option<u8> {
    let mut v: u32 = 0;
    for &d in digits {
        if !(b'0'..=b'7').contains(&d) {
            return None;
        }
        v = (v << 3) | u32::from(d - b'0');
    }
    u8::try_from(v).ok()
}
