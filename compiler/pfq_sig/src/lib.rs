//! Signature algebra for pfq-lang.
//!
//! pfq-lang terms carry textual type signatures such as
//! `CInt -> (Maybe SkBuff) -> Action SkBuff`. Before a term is serialized
//! for the packet engine its signature is validated, its arguments are
//! checked one at a time, and signatures that differ only in spacing or
//! redundant parentheses are recognized as the same type.
//!
//! Every operation works on [`Signature`] views into caller-owned text and
//! returns views into the same text, booleans or counts. Nothing here
//! panics or returns an error on malformed input: a bad signature simply
//! fails [`check`], has no [`arity`], and yields empty views.
//!
//! | Operation | Purpose |
//! |-----------|---------|
//! | [`count_outer_wraps`], [`strip_outer_wraps`] | redundant outer parentheses |
//! | [`segments`], [`arity`], [`is_function`] | top-level arrows |
//! | [`arg`], [`bind`] | currying |
//! | [`remove_extent`] | `[T]` array extents |
//! | [`equal`] | structural equality |
//! | [`check`], [`check_detailed`] | grammar validation |
//! | [`Application`], [`apply`] | argument-by-argument application |
//!
//! # Tracing
//!
//! Entry points are instrumented with `tracing`. Call [`init_tracing`] and
//! set `RUST_LOG=pfq_sig=trace` to see them.

mod apply;
mod arrows;
mod check;
mod constructors;
mod curry;
mod equal;
mod extent;
mod stack;
mod wraps;

pub use apply::{apply, Application, ApplyError};
pub use arrows::{arity, is_function, segments, Segments};
pub use check::{check, check_detailed, check_detailed_with, check_with, CheckError};
pub use constructors::ConstructorSet;
pub use curry::{arg, bind};
pub use equal::equal;
pub use extent::remove_extent;
pub use wraps::{count_outer_wraps, simplify, strip_outer_wraps};

pub use pfq_sig_core::{ScanError, Signature, Span, SpanError};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times; only the first call has an effect.
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=pfq_sig=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
