//! Grammar validation.
//!
//! ```text
//! Type  ::= Base ("->" Type)?
//! Base  ::= "(" Type ")"
//!         | "[" Type "]"
//!         | Ctor Base
//!         | Identifier
//! ```
//!
//! A recursive-descent pass over the signature bytes. `Ctor` is any name in
//! the [`ConstructorSet`]; a constructor not followed by a type is a plain
//! identifier. The empty signature is valid (no constraint).
//!
//! Validation never fails loudly: [`check`] answers with a boolean and
//! [`check_detailed`] with a [`CheckError`] naming the first problem.

use pfq_sig_core::{is_blank, is_ident_byte, Signature, ARROW};

use crate::constructors::ConstructorSet;
use crate::stack::ensure_sufficient_stack;

/// First problem found in a rejected signature.
///
/// Offsets are relative to the start of the checked view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The signature ended where a type was expected.
    #[error("unexpected end of signature, expected a type")]
    UnexpectedEnd,
    /// A byte that cannot start or continue a type.
    #[error("unexpected `{found}` at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },
    /// A bracket whose closing counterpart never appears.
    #[error("`{open}` at offset {offset} is never closed")]
    Unclosed { offset: usize, open: char },
    /// A complete type followed by more text.
    #[error("trailing input at offset {offset} after a complete type")]
    TrailingInput { offset: usize },
}

/// Recursive-descent validator state.
struct Validator<'s, 'c> {
    bytes: &'s [u8],
    pos: usize,
    /// `None` lets every identifier take an argument.
    ctors: Option<&'c ConstructorSet<'c>>,
}

impl<'s, 'c> Validator<'s, 'c> {
    fn new(bytes: &'s [u8], ctors: Option<&'c ConstructorSet<'c>>) -> Self {
        Validator {
            bytes,
            pos: 0,
            ctors,
        }
    }

    #[inline]
    fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_blank(&mut self) {
        while self.current().is_some_and(is_blank) {
            self.pos += 1;
        }
    }

    /// Whether the next non-blank byte can start a `Base`, without consuming.
    fn starts_base(&self) -> bool {
        self.bytes
            .get(self.pos..)
            .and_then(|rest| rest.iter().find(|&&b| !is_blank(b)))
            .is_some_and(|&b| b == b'(' || b == b'[' || is_ident_byte(b))
    }

    fn at_arrow(&self) -> bool {
        self.bytes
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(ARROW))
    }

    fn unexpected(&self) -> CheckError {
        match self.current() {
            Some(byte) => CheckError::UnexpectedChar {
                offset: self.pos,
                found: char::from(byte),
            },
            None => CheckError::UnexpectedEnd,
        }
    }

    /// `Type`. Arrow chains are consumed iteratively.
    fn parse_type(&mut self) -> Result<(), CheckError> {
        loop {
            self.parse_base()?;
            self.skip_blank();
            if !self.at_arrow() {
                return Ok(());
            }
            self.pos += ARROW.len();
        }
    }

    /// `Base`. All recursion passes through here.
    fn parse_base(&mut self) -> Result<(), CheckError> {
        ensure_sufficient_stack(|| {
            self.skip_blank();
            match self.current() {
                Some(open @ (b'(' | b'[')) => self.parse_group(open),
                Some(byte) if is_ident_byte(byte) => {
                    let start = self.pos;
                    while self.current().is_some_and(is_ident_byte) {
                        self.pos += 1;
                    }
                    let name = &self.bytes[start..self.pos];
                    let applies = match self.ctors {
                        Some(ctors) => ctors.contains(name),
                        None => true,
                    };
                    if applies && self.starts_base() {
                        self.parse_base()
                    } else {
                        Ok(())
                    }
                }
                _ => Err(self.unexpected()),
            }
        })
    }

    /// `"(" Type ")"` or `"[" Type "]"`, positioned on the opening bracket.
    fn parse_group(&mut self, open: u8) -> Result<(), CheckError> {
        let open_at = self.pos;
        let close = if open == b'(' { b')' } else { b']' };
        self.pos += 1;
        self.parse_type()?;
        self.skip_blank();
        match self.current() {
            Some(byte) if byte == close => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.unexpected()),
            None => Err(CheckError::Unclosed {
                offset: open_at,
                open: char::from(open),
            }),
        }
    }

    fn parse_signature(&mut self) -> Result<(), CheckError> {
        self.skip_blank();
        if self.current().is_none() {
            return Ok(());
        }
        self.parse_type()?;
        self.skip_blank();
        if self.current().is_some() {
            return Err(CheckError::TrailingInput { offset: self.pos });
        }
        Ok(())
    }
}

/// Validate `sig` against the grammar using `ctors` as the constructor set.
#[tracing::instrument(level = "trace", skip_all, fields(sig = %sig))]
pub fn check_detailed_with(
    sig: Signature<'_>,
    ctors: &ConstructorSet<'_>,
) -> Result<(), CheckError> {
    let result = Validator::new(sig.as_bytes(), Some(ctors)).parse_signature();
    if let Err(err) = &result {
        tracing::debug!(%err, sig = %sig, "signature rejected");
    }
    result
}

/// Validate `sig` with the default constructors, reporting the first problem.
pub fn check_detailed(sig: Signature<'_>) -> Result<(), CheckError> {
    check_detailed_with(sig, &ConstructorSet::DEFAULT)
}

/// Returns `true` if `sig` is well-formed under `ctors`.
pub fn check_with(sig: Signature<'_>, ctors: &ConstructorSet<'_>) -> bool {
    check_detailed_with(sig, ctors).is_ok()
}

/// Returns `true` if `sig` is well-formed under the default constructors.
pub fn check(sig: Signature<'_>) -> bool {
    check_detailed(sig).is_ok()
}

/// Returns `true` if `sig` is well-formed when any identifier may be
/// applied to an argument, as in `List CInt`.
pub(crate) fn check_structure(sig: Signature<'_>) -> bool {
    Validator::new(sig.as_bytes(), None).parse_signature().is_ok()
}

#[cfg(test)]
mod tests;
