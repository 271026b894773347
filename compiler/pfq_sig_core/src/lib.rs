//! Low-level layer of the pfq-lang signature algebra.
//!
//! Standalone: no `pfq_*` dependencies. Provides the pieces every
//! higher-level signature operation is built from:
//!
//! - [`Span`] and [`Signature`]: borrowed views into caller-owned text.
//! - [`trim_range`]: whitespace trimming.
//! - [`DepthScan`], [`scan_balance`], [`matching_close`], [`find_top_level`]:
//!   bracket-depth scanning with a single shared counter for `()` and `[]`.
//!
//! Nothing here allocates or copies signature text.

mod scan;
mod signature;
mod span;
mod trim;

pub use scan::{
    find_top_level, is_close, is_open, matching_close, scan_balance, DepthScan, ScanError,
};
pub use signature::Signature;
pub use span::{Span, SpanError};
pub use trim::{is_blank, trim_range};

/// The arrow token separating a function's parameter from its result.
pub const ARROW: &[u8] = b"->";

/// Returns `true` for bytes that may appear in an identifier.
///
/// Identifiers are maximal runs of ASCII alphanumerics.
#[inline]
pub fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}
