//! Request middleware.
//!
//! Purpose: request lifecycle middleware. [`Trace`] assigns each request a
//! trace identifier and logs its completion.

pub mod trace;

pub use trace::Trace;
