//! Bracket-depth scanning.
//!
//! `(`/`)` and `[`/`]` share a single depth counter: callers only ask
//! "is this offset at the top level?" and "where does this bracket close?",
//! and neither question depends on bracket kind. Kind mismatches such as
//! `(CInt]` are left to the validator.
//!
//! No stack is kept. Unterminated input is reported against the outermost
//! bracket that was never closed, which is the one remembered when depth
//! leaves zero.

/// Failure to balance the brackets of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// A closing bracket with no open bracket before it.
    #[error("unmatched `{found}` at offset {offset}")]
    UnmatchedClose { offset: usize, found: char },
    /// Input ended while a bracket was still open.
    #[error("`{open}` at offset {offset} is never closed")]
    Unterminated { offset: usize, open: char },
}

/// Returns `true` for `(` and `[`.
#[inline]
pub fn is_open(byte: u8) -> bool {
    matches!(byte, b'(' | b'[')
}

/// Returns `true` for `)` and `]`.
#[inline]
pub fn is_close(byte: u8) -> bool {
    matches!(byte, b')' | b']')
}

/// Returns the earliest (minimum) of two optional positions.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Offsets of the bracket bytes in `bytes`, in order.
///
/// `memchr3` handles at most three needles, so parentheses and square
/// brackets are searched separately. The next hit of each pair is cached and
/// only the consumed one is searched again, so a full walk reads every byte
/// once per pair.
#[derive(Clone, Debug)]
struct Brackets<'a> {
    bytes: &'a [u8],
    paren: Option<usize>,
    square: Option<usize>,
}

impl<'a> Brackets<'a> {
    /// Brackets at or after `from`.
    fn new(bytes: &'a [u8], from: usize) -> Self {
        Brackets {
            bytes,
            paren: search(bytes, from, b'(', b')'),
            square: search(bytes, from, b'[', b']'),
        }
    }

    #[inline]
    fn peek(&self) -> Option<usize> {
        earliest_of(self.paren, self.square)
    }
}

impl Iterator for Brackets<'_> {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<(usize, u8)> {
        let at = self.peek()?;
        if self.paren == Some(at) {
            self.paren = search(self.bytes, at + 1, b'(', b')');
        } else {
            self.square = search(self.bytes, at + 1, b'[', b']');
        }
        self.bytes.get(at).map(|&byte| (at, byte))
    }
}

impl std::iter::FusedIterator for Brackets<'_> {}

fn search(bytes: &[u8], from: usize, open: u8, close: u8) -> Option<usize> {
    let rest = bytes.get(from..)?;
    memchr::memchr2(open, close, rest).map(|pos| from + pos)
}

/// Per-offset depth iterator.
///
/// Yields `(offset, depth)` for every byte. An opening bracket reports the
/// depth outside it and its matching close reports the same depth, so both
/// brackets of a top-level group are yielded at depth 0 while their
/// contents are at depth 1.
///
/// Iteration stops early at a stray closing bracket; [`finish`](Self::finish)
/// reports why it stopped.
#[derive(Clone, Debug)]
pub struct DepthScan<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: u32,
    /// Offset of the bracket that last took depth from 0 to 1.
    outermost_open: usize,
    error: Option<ScanError>,
}

impl<'a> DepthScan<'a> {
    /// Start scanning `bytes` at offset 0 and depth 0.
    pub fn new(bytes: &'a [u8]) -> Self {
        DepthScan {
            bytes,
            pos: 0,
            depth: 0,
            outermost_open: 0,
            error: None,
        }
    }

    /// Depth after the bytes consumed so far.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Consume the rest of the input and report whether it balanced.
    pub fn finish(mut self) -> Result<(), ScanError> {
        for _ in self.by_ref() {}
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.depth > 0 {
            return Err(unterminated(self.bytes, self.outermost_open));
        }
        Ok(())
    }
}

impl Iterator for DepthScan<'_> {
    type Item = (usize, u32);

    fn next(&mut self) -> Option<(usize, u32)> {
        if self.error.is_some() {
            return None;
        }
        let at = self.pos;
        let byte = *self.bytes.get(at)?;
        if is_open(byte) {
            if self.depth == 0 {
                self.outermost_open = at;
            }
            let outside = self.depth;
            self.depth = self.depth.saturating_add(1);
            self.pos += 1;
            Some((at, outside))
        } else if is_close(byte) {
            if self.depth == 0 {
                self.error = Some(ScanError::UnmatchedClose {
                    offset: at,
                    found: char::from(byte),
                });
                return None;
            }
            self.depth -= 1;
            self.pos += 1;
            Some((at, self.depth))
        } else {
            self.pos += 1;
            Some((at, self.depth))
        }
    }
}

fn unterminated(bytes: &[u8], offset: usize) -> ScanError {
    ScanError::Unterminated {
        offset,
        open: bytes.get(offset).copied().map_or('(', char::from),
    }
}

/// Check that every bracket in `bytes` is matched.
///
/// Jumps from bracket to bracket, so bracket-free stretches cost one
/// `memchr` pass.
pub fn scan_balance(bytes: &[u8]) -> Result<(), ScanError> {
    let mut depth: u32 = 0;
    let mut outermost_open = 0;
    for (at, byte) in Brackets::new(bytes, 0) {
        if is_open(byte) {
            if depth == 0 {
                outermost_open = at;
            }
            depth = depth.saturating_add(1);
        } else if depth == 0 {
            return Err(ScanError::UnmatchedClose {
                offset: at,
                found: char::from(byte),
            });
        } else {
            depth -= 1;
        }
    }
    if depth > 0 {
        return Err(unterminated(bytes, outermost_open));
    }
    Ok(())
}

/// Offset of the bracket closing the one at `open`.
///
/// Returns `None` when `open` is not an opening bracket or the bracket is
/// never closed. The closing byte may be of either kind.
pub fn matching_close(bytes: &[u8], open: usize) -> Option<usize> {
    if !is_open(*bytes.get(open)?) {
        return None;
    }
    let mut depth: u32 = 1;
    for (at, byte) in Brackets::new(bytes, open + 1) {
        if is_open(byte) {
            depth = depth.saturating_add(1);
        } else {
            depth -= 1;
            if depth == 0 {
                return Some(at);
            }
        }
    }
    None
}

/// Offset of the first occurrence of `needle` at depth 0.
///
/// `needle` must not contain bracket bytes. Returns `None` when there is no
/// top-level occurrence, or when a stray closing bracket precedes one.
///
/// Only the brackets between consecutive needle hits are walked, so the
/// cost is bounded by the offset of the answer.
pub fn find_top_level(bytes: &[u8], needle: &[u8]) -> Option<usize> {
    let mut depth: u32 = 0;
    let mut walked = 0;
    for at in memchr::memmem::find_iter(bytes, needle) {
        let stretch = bytes.get(walked..at)?;
        for (_, byte) in Brackets::new(stretch, 0) {
            depth = if is_open(byte) {
                depth.saturating_add(1)
            } else {
                depth.checked_sub(1)?
            };
        }
        walked = at;
        if depth == 0 {
            return Some(at);
        }
    }
    None
}
