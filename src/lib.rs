//! A library for determining the satisfiability of boolean formulas written in conjunctive normal form.
//!
//! marten_sat is a conflict-driven clause-learning solver extended with symmetry breaking:
//! alongside a formula the solver accepts a collection of permutations of the literals which map
//! the formula to itself, and uses these to prune symmetric regions of the search space.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [solver](crate::context).
//!
//! Internally, and at a high-level, a solve is viewed in terms of the manipulation of, and the
//! relationships between, a handful of databases:
//! - The formula is stored in a [clause arena](crate::db::arena), addressed by compact references.
//! - The (partial) valuation, reasons, and decision levels are stored in a
//!   [variable database](crate::db::vars).
//! - The order of assignments is stored on a [trail](crate::db::trail), delimited by decision level.
//! - For each literal, the clauses which may become unit when the literal is falsified are listed
//!   in the [watch lists](crate::db::watches).
//!
//! Useful starting points, then, may be:
//! - The high-level [search procedure](crate::procedures::search) to inspect the dynamics of a solve.
//! - The [database module](crate::db) to inspect the data considered during a solve.
//! - The [symmetry module](crate::symmetry) for the symmetry-breaking subsystem.
//! - The [configuration](crate::config) to see what features are supported.
//!
//! # Example
//!
//! ```rust
//! # use marten_sat::context::Solver;
//! # use marten_sat::config::Config;
//! # use marten_sat::reports::Report;
//! # use marten_sat::structures::literal::Lit;
//! let mut solver = Solver::from_config(Config::default());
//!
//! let p = solver.new_var();
//! let q = solver.new_var();
//!
//! assert!(solver.add_clause(vec![Lit::negative(p), Lit::positive(q)]).is_ok());
//! assert!(solver.add_clause(vec![Lit::positive(p), Lit::negative(q)]).is_ok());
//!
//! assert_eq!(solver.solve(), Report::Satisfiable);
//! ```
//!
//! # Logs
//!
//! To help diagnose issues calls to [log!](log) are made throughout, and a variety of targets are
//! defined in order to help narrow output to relevant parts of the library.
//! No log implementation is bundled; the targets are listed in [misc::log].

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;

pub mod symmetry;

pub mod misc;
pub mod reports;
