//! Redundant outer parentheses.
//!
//! `((CInt -> Bool))` and `CInt -> Bool` are the same signature. Every
//! higher-level operation first strips the parenthesis layers that enclose
//! the whole (trimmed) span, working on the canonical view that remains.

use pfq_sig_core::{is_blank, DepthScan, Signature};

/// Count and remove every enclosing `(...)` layer of a trimmed view in one
/// pass.
///
/// Layer `k` is a wrap when the `k`-th opening paren of the leading run
/// (parens and blanks) is closed by the `k`-th closing paren of the
/// trailing run, counting from the outside. The depth scan starts after the
/// leading run; the first time depth falls to `k - 1` marks where layer `k`
/// closes.
fn unwrap_layers(trimmed: Signature<'_>) -> (usize, Signature<'_>) {
    let bytes = trimmed.as_bytes();
    let lead = bytes
        .iter()
        .take_while(|&&b| b == b'(' || is_blank(b))
        .count();
    let opens = bytes[..lead].iter().filter(|&&b| b == b'(').count();
    let trail = bytes
        .iter()
        .rev()
        .take_while(|&&b| b == b')' || is_blank(b))
        .count();
    let tail_start = bytes.len() - trail;
    let closes = bytes[tail_start..].iter().filter(|&&b| b == b')').count();

    let mut layers = opens.min(closes);
    if layers == 0 {
        return (0, trimmed);
    }

    // Closing parens of the trailing run, innermost candidate first.
    let mut tail = bytes[tail_start..]
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b')')
        .map(|(i, _)| tail_start + i)
        .skip(closes.saturating_sub(opens));

    let mut low = opens;
    for (at, depth) in DepthScan::new(bytes).skip(lead) {
        let depth = usize::try_from(depth).unwrap_or(usize::MAX);
        if depth >= low {
            continue;
        }
        low = depth;
        if depth < closes && tail.next() != Some(at) {
            layers = layers.min(depth);
        }
        if depth == 0 || layers == 0 {
            break;
        }
    }
    if low != 0 {
        return (0, trimmed);
    }

    let open = bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'(')
        .nth(layers - 1);
    let close = bytes
        .iter()
        .enumerate()
        .rev()
        .filter(|&(_, &b)| b == b')')
        .nth(layers - 1);
    match (open, close) {
        (Some((open, _)), Some((close, _))) => (layers, trimmed.slice(open + 1..close).trim()),
        _ => (0, trimmed),
    }
}

/// Number of parenthesis layers enclosing the whole of `sig`.
///
/// `count_outer_wraps(strip_outer_wraps(s))` is always 0.
pub fn count_outer_wraps(sig: Signature<'_>) -> usize {
    unwrap_layers(sig.trim()).0
}

/// Canonical view of `sig`: trimmed, with every enclosing paren layer removed.
///
/// `()` strips to an empty view.
pub fn strip_outer_wraps(sig: Signature<'_>) -> Signature<'_> {
    unwrap_layers(sig.trim()).1
}

/// Alias of [`strip_outer_wraps`].
#[inline]
pub fn simplify(sig: Signature<'_>) -> Signature<'_> {
    strip_outer_wraps(sig)
}
