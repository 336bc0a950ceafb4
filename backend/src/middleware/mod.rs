//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns such as trace
//! correlation.

pub mod trace;

pub use trace::Trace;
