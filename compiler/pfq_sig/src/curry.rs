//! Curried application: parameter lookup and residual signatures.
//!
//! Terms are applied one argument at a time. [`arg`] gives the type the
//! next argument must have, [`bind`] the type left once it is applied.
//! Asking past the last parameter is not an error: both return an empty
//! signature, which is how a caller detects that no more arguments fit.

use pfq_sig_core::Signature;

use crate::arrows::segments;

/// Type of parameter `n` (0-based) of `sig`.
///
/// Empty when `n >= arity(sig)`, including when `sig` is not a function.
pub fn arg(sig: Signature<'_>, n: usize) -> Signature<'_> {
    let mut segs = segments(sig);
    // The last segment is the result type, not a parameter.
    match segs.len().checked_sub(n) {
        Some(from_back) if from_back >= 2 => segs
            .nth_back(from_back - 1)
            .unwrap_or_else(|| sig.empty_at_end()),
        _ => sig.empty_at_end(),
    }
}

/// Signature remaining after binding the first `n` arguments of `sig`.
///
/// `bind(s, 0)` is the canonical form of `s`, `bind(s, arity)` the result
/// type. Empty when `n > arity(s)` or `s` has no segments.
pub fn bind(sig: Signature<'_>, n: usize) -> Signature<'_> {
    let mut segs = segments(sig);
    match segs.len().checked_sub(n) {
        Some(from_back) if from_back >= 1 => segs
            .nth_back_segment(from_back - 1)
            .map_or_else(|| sig.empty_at_end(), |segment| segment.tail),
        _ => sig.empty_at_end(),
    }
}
