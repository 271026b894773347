//! Checking curried applications before a term is serialized.
//!
//! A term such as `forward 3 buff` is accepted only if every argument's
//! signature equals the parameter type it is bound to. [`Application`]
//! walks the function signature one argument at a time using
//! [`arg`](crate::arg) and [`bind`](crate::bind); the residual signature is
//! the type of the partially applied term.
//!
//! There is no inference: a type variable such as `a` matches only `a`.

use pfq_sig_core::Signature;

use crate::arrows::arity;
use crate::check::{check_detailed_with, CheckError};
use crate::constructors::ConstructorSet;
use crate::curry::{arg, bind};
use crate::equal::equal;

/// Why an argument could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// The function or an argument signature does not parse.
    #[error("malformed signature `{signature}`")]
    Malformed {
        signature: String,
        #[source]
        reason: CheckError,
    },
    /// More arguments than the function has parameters.
    #[error("`{signature}` takes {arity} argument(s), cannot bind argument {index}")]
    OverApplied {
        signature: String,
        arity: usize,
        index: usize,
    },
    /// An argument's signature differs from the parameter type.
    #[error("argument {index} has type `{found}`, expected `{expected}`")]
    Mismatch {
        index: usize,
        expected: String,
        found: String,
    },
}

/// A function signature with some of its arguments bound.
#[derive(Clone, Copy, Debug)]
pub struct Application<'a, 'c> {
    fun: Signature<'a>,
    arity: usize,
    bound: usize,
    ctors: ConstructorSet<'c>,
}

impl<'a> Application<'a, 'static> {
    /// Start applying `fun`, validated with the default constructors.
    pub fn new(fun: Signature<'a>) -> Result<Self, ApplyError> {
        Application::with_constructors(fun, ConstructorSet::DEFAULT)
    }
}

impl<'a, 'c> Application<'a, 'c> {
    /// Start applying `fun`, validated with `ctors`.
    pub fn with_constructors(
        fun: Signature<'a>,
        ctors: ConstructorSet<'c>,
    ) -> Result<Self, ApplyError> {
        validate(fun, &ctors)?;
        Ok(Application {
            fun,
            arity: arity(fun).unwrap_or(0),
            bound: 0,
            ctors,
        })
    }

    /// Bind the next argument, whose type is `value`.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(fun = %self.fun, index = self.bound, value = %value)
    )]
    pub fn push(&mut self, value: Signature<'_>) -> Result<(), ApplyError> {
        validate(value, &self.ctors)?;
        let index = self.bound;
        if index >= self.arity {
            tracing::debug!(index, arity = self.arity, "over-application");
            return Err(ApplyError::OverApplied {
                signature: self.fun.as_str().to_owned(),
                arity: self.arity,
                index,
            });
        }
        let expected = arg(self.fun, index);
        if !equal(expected, value) {
            tracing::debug!(index, %expected, found = %value, "argument type mismatch");
            return Err(ApplyError::Mismatch {
                index,
                expected: expected.as_str().to_owned(),
                found: value.as_str().trim().to_owned(),
            });
        }
        self.bound += 1;
        Ok(())
    }

    /// The function signature being applied.
    pub fn function(&self) -> Signature<'a> {
        self.fun
    }

    /// Number of arguments bound so far.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Number of parameters still unbound.
    pub fn remaining(&self) -> usize {
        self.arity - self.bound
    }

    /// Returns `true` once every parameter is bound.
    pub fn is_saturated(&self) -> bool {
        self.bound == self.arity
    }

    /// Type of the term with the arguments bound so far.
    pub fn residual(&self) -> Signature<'a> {
        bind(self.fun, self.bound)
    }
}

fn validate(sig: Signature<'_>, ctors: &ConstructorSet<'_>) -> Result<(), ApplyError> {
    check_detailed_with(sig, ctors).map_err(|reason| ApplyError::Malformed {
        signature: sig.as_str().to_owned(),
        reason,
    })
}

/// Apply `values` to `fun` in order, returning the residual signature.
pub fn apply<'a>(
    fun: Signature<'a>,
    values: &[Signature<'_>],
) -> Result<Signature<'a>, ApplyError> {
    let mut application = Application::new(fun)?;
    for &value in values {
        application.push(value)?;
    }
    Ok(application.residual())
}
