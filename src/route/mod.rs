//! # Route Module
//!
//! The value types every other module operates on: a [`Route`] is an
//! endpoint with a compiled pattern, and the pattern is an ordered sequence
//! of typed [`Segment`]s.
//!
//! ## Segment types
//!
//! - **Static** - matched by exact literal equality (`users`)
//! - **Variable** - captures one component, optionally constrained (`{id}`, `{id:\d+}`)
//! - **Partial variable** - literal text mixed with captures (`user-{id}`)
//! - **Single wildcard** - exactly one component (`*`, `*name`)
//! - **Multi wildcard** - zero or more components (`**`, `**name`)
//!
//! Routes are usually built with [`Route::compile`], which runs the bundled
//! path compiler. Producers with their own compiler assemble patterns from the
//! [`Segment`] constructors and [`Route::new`].

mod compile;
mod types;

pub use compile::{compile_path, RouteError};
pub use types::{
    HandlerRef, Route, RouteKey, Segment, SegmentKind, ANONYMOUS_MULTI, ANONYMOUS_SINGLE,
};
