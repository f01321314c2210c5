//! HTTP handlers.

pub mod sync;
