//! Database query implementations.

pub mod slots;
