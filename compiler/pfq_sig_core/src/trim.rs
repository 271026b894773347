//! Whitespace trimming over signature bytes.

use std::ops::Range;

/// Returns `true` for bytes that separate signature tokens.
///
/// ASCII whitespace plus vertical tab, matching C `isspace` in the "C" locale.
#[inline]
pub fn is_blank(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0B
}

/// Range of `bytes` left after dropping leading and trailing blanks.
///
/// All-blank input yields an empty range positioned at the end of the input.
pub fn trim_range(bytes: &[u8]) -> Range<usize> {
    let Some(start) = bytes.iter().position(|&b| !is_blank(b)) else {
        return bytes.len()..bytes.len();
    };
    // A non-blank byte exists, so `rposition` finds at least `start`.
    let end = bytes
        .iter()
        .rposition(|&b| !is_blank(b))
        .map_or(start, |last| last + 1);
    start..end
}
