//! The procedures of a solve, one file per procedure.

pub mod analysis;
pub mod backjump;
pub mod bcp;
pub mod decision;
pub mod gc;
pub mod search;
pub mod simplify;
