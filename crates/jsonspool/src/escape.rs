//! Escape classification for JSON string payloads.
//!
//! The table maps every byte to one of three classes: `0` for bytes that
//! pass through verbatim (this includes all bytes ≥ 0x80, so UTF-8
//! sequences are copied untouched), `b'u'` for control characters that need
//! a full `\u00XX` escape, and otherwise the byte that follows the
//! backslash in a two-character escape.

/// Per-byte escape classes for the string writer.
pub(crate) const ESCAPE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 0x20 {
        table[i] = b'u';
        i += 1;
    }
    table[0x08] = b'b';
    table[0x09] = b't';
    table[0x0a] = b'n';
    table[0x0c] = b'f';
    table[0x0d] = b'r';
    table[0x22] = b'"';
    table[0x5c] = b'\\';
    table
};

/// Lowercase hex digits used by `\u00xx` escapes.
pub(crate) const HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";

/// Length of the longest leading run of `s` that needs no escaping and can
/// be bulk-copied to the output.
#[inline]
pub(crate) fn count_unescaped(s: &[u8]) -> usize {
    s.iter().take_while(|&&b| ESCAPE[b as usize] == 0).count()
}
