//! Borrowed signature views.
//!
//! A [`Signature`] is a [`Span`] paired with the text it indexes. Every
//! operation that narrows a signature (trimming, splitting at arrows,
//! stripping brackets) returns another view into the same buffer, so a
//! whole analysis runs without copying or allocating text.
//!
//! Views are `Copy`; the lifetime `'a` ties every derived view to the
//! caller's buffer.

use std::fmt;

use crate::span::{Span, SpanError};
use crate::trim::trim_range;

/// Non-owning view of a type signature inside a text buffer.
#[derive(Copy, Clone)]
pub struct Signature<'a> {
    src: &'a str,
    span: Span,
}

impl<'a> Signature<'a> {
    /// View the whole of `src`.
    ///
    /// Buffers longer than `u32::MAX` bytes are viewed up to that length;
    /// use [`try_new`](Self::try_new) to reject them instead.
    pub fn new(src: &'a str) -> Self {
        let len = u32::try_from(src.len()).unwrap_or(u32::MAX);
        Signature {
            src,
            span: Span::new(0, len),
        }
    }

    /// View the whole of `src`, failing for buffers over `u32::MAX` bytes.
    pub fn try_new(src: &'a str) -> Result<Self, SpanError> {
        let span = Span::try_from_range(0..src.len())?;
        Ok(Signature { src, span })
    }

    /// View `span` of `src`.
    ///
    /// The span is clamped to the buffer.
    pub fn with_span(src: &'a str, span: Span) -> Self {
        Signature::new(src).slice(span.to_range())
    }

    /// The backing buffer this view indexes.
    #[inline]
    pub fn src(&self) -> &'a str {
        self.src
    }

    /// Position of this view in the backing buffer.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Text of the view.
    ///
    /// Signatures are ASCII, so every split point the algebra produces lies
    /// on a character boundary. A view that would split a multi-byte
    /// character yields `""`.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.src.get(self.span.to_range()).unwrap_or("")
    }

    /// Bytes of the view.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.src
            .as_bytes()
            .get(self.span.to_range())
            .unwrap_or_default()
    }

    /// Length of the view in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.span.len() as usize
    }

    /// Returns `true` for the zero-length "no information" signature.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// First byte of the view, if any.
    #[inline]
    pub fn first(&self) -> Option<u8> {
        self.as_bytes().first().copied()
    }

    /// Last byte of the view, if any.
    #[inline]
    pub fn last(&self) -> Option<u8> {
        self.as_bytes().last().copied()
    }

    /// Narrow the view using offsets relative to its start.
    ///
    /// Offsets past the end are clamped; the result never leaves `self`.
    #[inline]
    #[must_use]
    pub fn slice(&self, range: std::ops::Range<usize>) -> Signature<'a> {
        Signature {
            src: self.src,
            span: self.span.sub(range),
        }
    }

    /// The view without leading or trailing whitespace.
    ///
    /// All-blank views trim to an empty view at their end.
    #[must_use]
    pub fn trim(&self) -> Signature<'a> {
        self.slice(trim_range(self.as_bytes()))
    }

    /// Empty view positioned at the end of `self`.
    #[inline]
    #[must_use]
    pub fn empty_at_end(&self) -> Signature<'a> {
        Signature {
            src: self.src,
            span: Span::point(self.span.end),
        }
    }

    /// Returns `true` if both views cover the same bytes of the same buffer.
    pub fn same_view(&self, other: &Signature<'_>) -> bool {
        std::ptr::eq(self.src, other.src) && self.span == other.span
    }
}

impl<'a> From<&'a str> for Signature<'a> {
    fn from(src: &'a str) -> Self {
        Signature::new(src)
    }
}

impl fmt::Debug for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:?} @ {})", self.as_str(), self.span)
    }
}

impl fmt::Display for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
