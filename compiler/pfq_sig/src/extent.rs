//! Array extents: `[T]`.

use pfq_sig_core::{matching_close, Signature};

/// Interior of `sig` when the whole signature is one `[...]` extent.
///
/// Exactly one layer is removed and the interior is trimmed. Anything else
/// comes back trimmed but otherwise unchanged.
pub fn remove_extent(sig: Signature<'_>) -> Signature<'_> {
    let trimmed = sig.trim();
    if trimmed.first() != Some(b'[') || trimmed.last() != Some(b']') {
        return trimmed;
    }
    let last = trimmed.len() - 1;
    if matching_close(trimmed.as_bytes(), 0) == Some(last) {
        trimmed.slice(1..last).trim()
    } else {
        trimmed
    }
}
