//! High-level reports on the satisfiability of a formula.

/// The outcome of a solve, from the perspective of a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// The formula is satisfiable, and a model has been recorded.
    Satisfiable,

    /// The formula is unsatisfiable, perhaps relative to a collection of assumptions.
    Unsatisfiable,

    /// Satisfiability was not determined, e.g. due to an interrupt or an exhausted budget.
    Unknown,
}

impl Report {
    /// The conventional process exit code for the report: 10 for satisfiable, 20 for
    /// unsatisfiable, and 0 otherwise.
    pub fn exit_code(self) -> i32 {
        match self {
            Report::Satisfiable => 10,
            Report::Unsatisfiable => 20,
            Report::Unknown => 0,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Report::Satisfiable => write!(f, "SATISFIABLE"),
            Report::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Report::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
