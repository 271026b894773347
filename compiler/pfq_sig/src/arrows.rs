//! Splitting function signatures at their top-level arrows.
//!
//! `CInt -> (CInt -> CShort) -> SkBuff` has three segments: the two
//! parameter types and the result type. The parenthesized arrow in the
//! middle is a single parameter.
//!
//! `->` is right-associative, so `A -> (B -> C)` is the same type as
//! `A -> B -> C`. When the final segment is a wrapped arrow type the
//! splitter continues inside it, giving both spellings the same segments.
//!
//! Segments are produced lazily by [`Segments`]; nothing is collected.
//! Reading from the front re-scans each spliced result, so a deeply nested
//! right spine costs its depth times its length. Reading from the back is a
//! single right-to-left pass: the trailing `)` run tells which nested
//! groups are spliced before any segment is produced. [`arity`] and the
//! currying operations read from the back.

use pfq_sig_core::{find_top_level, is_blank, scan_balance, Signature, ARROW};

use crate::wraps::strip_outer_wraps;

/// One segment together with the residual signature starting at it.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Segment<'a> {
    /// The segment's own type, trimmed.
    pub ty: Signature<'a>,
    /// Everything from this segment to the end of the signature: the type
    /// left after binding all earlier segments.
    pub tail: Signature<'a>,
}

/// Left-to-right splitter.
#[derive(Clone, Debug)]
struct Front<'a> {
    rest: Signature<'a>,
    done: bool,
}

impl<'a> Front<'a> {
    fn next(&mut self) -> Option<Segment<'a>> {
        if self.done {
            return None;
        }
        let body = self.rest;
        let Some(at) = find_top_level(body.as_bytes(), ARROW) else {
            self.done = true;
            return Some(Segment {
                ty: body,
                tail: body,
            });
        };

        let ty = body.slice(0..at).trim();
        let mut rest = body.slice(at + ARROW.len()..body.len()).trim();
        if find_top_level(rest.as_bytes(), ARROW).is_none() {
            let inner = strip_outer_wraps(rest);
            if find_top_level(inner.as_bytes(), ARROW).is_some() {
                rest = inner;
            }
        }
        self.rest = rest;
        Some(Segment { ty, tail: body })
    }
}

/// What precedes an opening paren, blanks skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Before {
    Paren,
    Arrow,
    Other,
}

/// Start of the blank run ending at `end`.
fn blanks_before(bytes: &[u8], mut end: usize) -> usize {
    while end > 0 && is_blank(bytes[end - 1]) {
        end -= 1;
    }
    end
}

fn ends_with_arrow(bytes: &[u8], end: usize) -> bool {
    bytes.get(..end).is_some_and(|head| head.ends_with(ARROW))
}

fn preceding(bytes: &[u8], open: usize) -> Before {
    let end = blanks_before(bytes, open);
    if end > 0 && bytes[end - 1] == b'(' {
        Before::Paren
    } else if ends_with_arrow(bytes, end) {
        Before::Arrow
    } else {
        Before::Other
    }
}

/// Number of trailing `)` layers the splitter descends through.
///
/// The trailing `)`s close a chain of nested groups, layer 1 outermost.
/// Read right to left, each layer's opener shows what precedes it, and the
/// text between it and the next layer shows whether the layer has a
/// top-level arrow. A run of directly nested layers is one wrapped result.
/// It is spliced when an arrow precedes the run and its innermost layer has
/// a top-level arrow; splicing stops at the first run, from the outside,
/// that fails.
fn spliced_layers(bytes: &[u8]) -> usize {
    let mut pos = bytes.len();
    let mut depth = 0usize;
    while pos > 0 {
        match bytes[pos - 1] {
            b')' => depth += 1,
            byte if is_blank(byte) => {}
            _ => break,
        }
        pos -= 1;
    }

    let mut low = depth;
    let mut arrow_at_low = false;
    // Innermost layer of the run being read, and whether it has an arrow.
    let mut run: Option<(usize, bool)> = None;
    // Deepest spliced layer reachable through the run read last, when an
    // arrow precedes that run.
    let mut reach: Option<usize> = None;
    while low > 0 && pos > 0 {
        pos -= 1;
        match bytes[pos] {
            b')' | b']' => depth += 1,
            open @ (b'(' | b'[') => {
                let Some(outside) = depth.checked_sub(1) else {
                    return 0;
                };
                depth = outside;
                if depth >= low {
                    continue;
                }
                let layer = low;
                low = depth;
                let (innermost, has_arrow) = *run.get_or_insert((layer, arrow_at_low));
                arrow_at_low = false;
                let before = if open == b'(' {
                    preceding(bytes, pos)
                } else {
                    Before::Other
                };
                if before == Before::Paren {
                    continue;
                }
                let deepest = if has_arrow {
                    reach.unwrap_or(innermost)
                } else {
                    layer - 1
                };
                reach = (before == Before::Arrow).then_some(deepest);
                run = None;
            }
            b'>' if depth == low && pos > 0 && bytes[pos - 1] == b'-' => {
                arrow_at_low = true;
                pos -= 1;
            }
            _ => {}
        }
    }
    if low > 0 {
        return 0;
    }
    reach.unwrap_or(0)
}

/// Right-to-left splitter.
#[derive(Clone, Debug)]
struct Back<'a> {
    canonical: Signature<'a>,
    /// Bytes before `pos` are unread.
    pos: usize,
    depth: usize,
    /// Depth of the top-level arrows of the level being split.
    level: usize,
    seg_end: usize,
    /// Closing paren of the level being split, or the end of input.
    level_end: usize,
    done: bool,
}

impl<'a> Back<'a> {
    fn new(canonical: Signature<'a>) -> Self {
        let bytes = canonical.as_bytes();
        let level = spliced_layers(bytes);
        let end = match level.checked_sub(1) {
            Some(nth) => bytes
                .iter()
                .enumerate()
                .rev()
                .filter(|&(_, &b)| b == b')')
                .nth(nth)
                .map_or(bytes.len(), |(at, _)| at),
            None => bytes.len(),
        };
        Back {
            canonical,
            pos: end,
            depth: level,
            level,
            seg_end: end,
            level_end: end,
            done: false,
        }
    }

    fn segment(&self, start: usize) -> Segment<'a> {
        Segment {
            ty: self.canonical.slice(start..self.seg_end).trim(),
            tail: self.canonical.slice(start..self.level_end).trim(),
        }
    }

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.done {
            return None;
        }
        let bytes = self.canonical.as_bytes();
        while self.pos > 0 {
            self.pos -= 1;
            let at = self.pos;
            match bytes[at] {
                b')' | b']' => self.depth += 1,
                b'(' | b'[' if self.depth > self.level || self.level == 0 => {
                    self.depth = self.depth.saturating_sub(1);
                }
                b'(' | b'[' => {
                    let segment = self.segment(at + 1);
                    self.climb(at);
                    return Some(segment);
                }
                b'>' if self.depth == self.level && at > 0 && bytes[at - 1] == b'-' => {
                    let segment = self.segment(at + 1);
                    self.pos = at - 1;
                    self.seg_end = at - 1;
                    return Some(segment);
                }
                _ => {}
            }
        }
        self.done = true;
        Some(self.segment(0))
    }

    /// Leave a spliced level through its opener at `open`: step out over the
    /// parens wrapping it, then over the arrow in front of them.
    fn climb(&mut self, mut open: usize) {
        let bytes = self.canonical.as_bytes();
        loop {
            self.depth = self.depth.saturating_sub(1);
            self.level = self.level.saturating_sub(1);
            let mut next_close = self.level_end + 1;
            while next_close < bytes.len() && is_blank(bytes[next_close]) {
                next_close += 1;
            }
            self.level_end = next_close.min(bytes.len());

            let end = blanks_before(bytes, open);
            if end > 0 && bytes[end - 1] == b'(' {
                open = end - 1;
                continue;
            }
            let resume = if ends_with_arrow(bytes, end) {
                end - ARROW.len()
            } else {
                end
            };
            self.pos = resume;
            self.seg_end = resume;
            return;
        }
    }
}

/// Iterator over the segments of a signature.
///
/// Created by [`segments`]. Malformed or empty signatures yield nothing.
/// The length is known up front and both ends can be read.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    front: Front<'a>,
    back: Back<'a>,
    remaining: usize,
}

impl<'a> Segments<'a> {
    fn new(sig: Signature<'a>) -> Self {
        let canonical = strip_outer_wraps(sig);
        let usable = if canonical.is_empty() {
            false
        } else if let Err(err) = scan_balance(canonical.as_bytes()) {
            tracing::trace!(%err, sig = %canonical, "unbalanced signature has no segments");
            false
        } else {
            true
        };
        let back = Back::new(canonical);
        let remaining = if usable {
            let mut walker = back.clone();
            std::iter::from_fn(|| walker.next()).count()
        } else {
            0
        };
        Segments {
            front: Front {
                rest: canonical,
                done: !usable,
            },
            back,
            remaining,
        }
    }

    pub(crate) fn next_segment(&mut self) -> Option<Segment<'a>> {
        if self.remaining == 0 {
            return None;
        }
        let segment = self.front.next()?;
        self.remaining -= 1;
        Some(segment)
    }

    pub(crate) fn next_back_segment(&mut self) -> Option<Segment<'a>> {
        if self.remaining == 0 {
            return None;
        }
        let segment = self.back.next()?;
        self.remaining -= 1;
        Some(segment)
    }

    /// Skip `n` segments from the back, then yield the next one.
    pub(crate) fn nth_back_segment(&mut self, n: usize) -> Option<Segment<'a>> {
        for _ in 0..n {
            self.next_back_segment()?;
        }
        self.next_back_segment()
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Signature<'a>;

    fn next(&mut self) -> Option<Signature<'a>> {
        self.next_segment().map(|segment| segment.ty)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn count(self) -> usize {
        self.remaining
    }

    fn last(mut self) -> Option<Signature<'a>> {
        self.next_back()
    }
}

impl DoubleEndedIterator for Segments<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.next_back_segment().map(|segment| segment.ty)
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl std::iter::FusedIterator for Segments<'_> {}

/// Segments of `sig`: its parameter types followed by its result type.
///
/// A non-function yields one segment (itself, canonicalized); an empty,
/// bracket-empty or unbalanced signature yields none.
pub fn segments(sig: Signature<'_>) -> Segments<'_> {
    Segments::new(sig)
}

/// Number of parameters of `sig`.
///
/// `None` when the signature is empty after stripping wraps (`""`, `()`) or
/// its brackets do not balance. `Some(0)` for a plain type such as `CInt`
/// or `Action SkBuff`.
pub fn arity(sig: Signature<'_>) -> Option<usize> {
    segments(sig).len().checked_sub(1)
}

/// Returns `true` if `sig` takes at least one argument.
pub fn is_function(sig: Signature<'_>) -> bool {
    arity(sig).is_some_and(|n| n >= 1)
}

#[cfg(test)]
mod tests;
