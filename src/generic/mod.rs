//! Generic structures, not tied to any solver internals.

pub mod index_heap;
pub mod luby;
pub mod minimal_pcg;
