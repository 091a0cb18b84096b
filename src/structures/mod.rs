//! The abstract elements of a solve and their representation.

pub mod literal;
