//! Structural equality of signatures.
//!
//! Two signatures are equal when they describe the same grammar tree.
//! Whitespace and redundant parentheses are ignored at every level, not
//! only around the whole signature: `CInt -> (String) -> SkBuff` equals
//! `((CInt -> String -> (SkBuff)))`.
//!
//! The tree is never built. Both signatures are read once, side by side, as
//! streams of identifiers, arrows and square brackets with the parentheses
//! set aside. Two well-formed signatures denote the same tree exactly when
//! those streams agree and both need parentheses around the same stretches
//! of it. A group is needed only when it holds an arrow type used as a
//! parameter (`(A -> B) -> C`) or as a constructor argument
//! (`Maybe (A -> B)`).
//!
//! When the trees agree, every group of one side nests cleanly with every
//! group of the other. Groups the two sides open at the same point share
//! one frame of the walk; a group closing across one the other side
//! still holds open settles the answer early.

use pfq_sig_core::{is_blank, is_ident_byte, Signature, ARROW};

use crate::check::check_structure;
use crate::stack::ensure_sufficient_stack;
use crate::wraps::strip_outer_wraps;

/// Anything but a parenthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a [u8]),
    Arrow,
    OpenExtent,
    CloseExtent,
}

/// The two sides describe different trees.
#[derive(Clone, Copy, Debug)]
struct Differ;

/// Reading position in one side.
#[derive(Clone, Debug)]
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// The innermost open group has a top-level arrow so far.
    arrow: bool,
}

impl<'a> Cursor<'a> {
    fn new(sig: Signature<'a>) -> Self {
        Cursor {
            bytes: sig.as_bytes(),
            pos: 0,
            arrow: false,
        }
    }

    /// Next non-blank byte, left unconsumed.
    fn peek(&mut self) -> Option<u8> {
        while self.bytes.get(self.pos).is_some_and(|&b| is_blank(b)) {
            self.pos += 1;
        }
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_arrow(&mut self) -> bool {
        self.peek();
        self.bytes
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(ARROW))
    }

    fn open_groups(&mut self) -> usize {
        let mut opened = 0;
        while self.eat(b'(') {
            opened += 1;
        }
        opened
    }

    fn token(&mut self) -> Result<Option<Token<'a>>, Differ> {
        let Some(byte) = self.peek() else {
            return Ok(None);
        };
        let (bytes, start) = (self.bytes, self.pos);
        let token = match byte {
            b'[' => {
                self.pos += 1;
                Token::OpenExtent
            }
            b']' => {
                self.pos += 1;
                Token::CloseExtent
            }
            b'-' if self.at_arrow() => {
                self.pos += ARROW.len();
                Token::Arrow
            }
            byte if is_ident_byte(byte) => {
                while bytes.get(self.pos).copied().is_some_and(is_ident_byte) {
                    self.pos += 1;
                }
                Token::Ident(&bytes[start..self.pos])
            }
            _ => return Err(Differ),
        };
        Ok(Some(token))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Whole,
    Extent,
    Groups,
}

/// Parenthesis groups opened at one point, or a `[...]` both sides share.
#[derive(Debug)]
struct Frame {
    scope: Scope,
    /// Groups each side still holds open here.
    open: [usize; 2],
    /// Each side's arrow flag from outside the frame.
    saved: [bool; 2],
    /// The groups follow an identifier, so they hold a constructor argument.
    argument: bool,
}

impl Frame {
    fn new(scope: Scope, open: [usize; 2], saved: [bool; 2], argument: bool) -> Self {
        Frame {
            scope,
            open,
            saved,
            argument,
        }
    }
}

struct Walk<'a> {
    sides: [Cursor<'a>; 2],
    after_ident: bool,
}

impl<'a> Walk<'a> {
    fn new(lhs: Signature<'a>, rhs: Signature<'a>) -> Self {
        Walk {
            sides: [Cursor::new(lhs), Cursor::new(rhs)],
            after_ident: false,
        }
    }

    fn arrows(&self) -> [bool; 2] {
        [self.sides[0].arrow, self.sides[1].arrow]
    }

    /// Close the groups of `frame` that end here. Each side that closed any
    /// must agree with the other on whether the stretch needed them.
    fn close_groups(&mut self, frame: &mut Frame) -> Result<(), Differ> {
        let mut needed = [false; 2];
        for (i, side) in self.sides.iter_mut().enumerate() {
            let mut innermost = None;
            while frame.open[i] > 0 && side.eat(b')') {
                innermost.get_or_insert(side.arrow);
                frame.open[i] -= 1;
                side.arrow = frame.open[i] == 0 && frame.saved[i];
            }
            if let Some(arrow) = innermost {
                needed[i] = arrow && (frame.argument || side.at_arrow());
            }
        }
        if needed[0] == needed[1] {
            Ok(())
        } else {
            Err(Differ)
        }
    }

    /// Walk both sides until `frame` ends.
    fn frame(&mut self, frame: &mut Frame) -> Result<(), Differ> {
        ensure_sufficient_stack(|| loop {
            if frame.scope == Scope::Groups {
                self.close_groups(frame)?;
                if frame.open == [0, 0] {
                    return Ok(());
                }
            }
            if self.sides.iter_mut().any(|side| side.peek() == Some(b')')) {
                return Err(Differ);
            }

            let opened = [self.sides[0].open_groups(), self.sides[1].open_groups()];
            if opened != [0, 0] {
                let mut inner = Frame::new(Scope::Groups, opened, self.arrows(), self.after_ident);
                for (side, &count) in self.sides.iter_mut().zip(&opened) {
                    if count > 0 {
                        side.arrow = false;
                    }
                }
                self.frame(&mut inner)?;
                self.after_ident = false;
                continue;
            }

            let token = self.sides[0].token()?;
            if self.sides[1].token()? != token {
                return Err(Differ);
            }
            self.after_ident = matches!(token, Some(Token::Ident(_)));
            match token {
                None if frame.scope == Scope::Whole => return Ok(()),
                None => return Err(Differ),
                Some(Token::Ident(_)) => {}
                Some(Token::Arrow) => {
                    for side in &mut self.sides {
                        side.arrow = true;
                    }
                }
                Some(Token::OpenExtent) => {
                    let mut inner = Frame::new(Scope::Extent, [0, 0], self.arrows(), false);
                    for side in &mut self.sides {
                        side.arrow = false;
                    }
                    self.frame(&mut inner)?;
                }
                Some(Token::CloseExtent) if frame.scope == Scope::Extent => {
                    for (side, &arrow) in self.sides.iter_mut().zip(&frame.saved) {
                        side.arrow = arrow;
                    }
                    return Ok(());
                }
                Some(Token::CloseExtent) => return Err(Differ),
            }
        })
    }
}

/// Returns `true` if `lhs` and `rhs` denote the same type.
///
/// Identifiers compare case-sensitively and whole: `Maybe CInt` is neither
/// `MaybeCInt` nor `Maybe -> CInt`. Arrows associate to the right, so
/// `A -> (B -> C)` equals `A -> B -> C` but not `(A -> B) -> C`.
///
/// Any identifier followed by a type is an application here, constructor
/// or not. A signature that does not parse even so is equal only to the
/// same text, after trimming and stripping outer wraps.
#[tracing::instrument(level = "trace", skip_all, fields(lhs = %lhs, rhs = %rhs), ret)]
pub fn equal(lhs: Signature<'_>, rhs: Signature<'_>) -> bool {
    let (lhs, rhs) = (strip_outer_wraps(lhs), strip_outer_wraps(rhs));
    if lhs.is_empty() || rhs.is_empty() {
        return lhs.is_empty() && rhs.is_empty();
    }
    if !check_structure(lhs) || !check_structure(rhs) {
        tracing::trace!(%lhs, %rhs, "malformed signature compared by text");
        return lhs.as_bytes() == rhs.as_bytes();
    }
    let mut whole = Frame::new(Scope::Whole, [0, 0], [false, false], false);
    Walk::new(lhs, rhs).frame(&mut whole).is_ok()
}
