/*!
Error types used in the library.

- Most of these are very unlikely to occur during use.
- Some are external --- e.g. a solver returns an `Unsatisfiable` error to highlight that a
  request to add a clause made the formula unsatisfiable.
  In this case information about satisfiability is obtained and the solver may continue to be
  queried (every further query reports unsatisfiability).

Names of the error enums --- for the most part --- overlap with corresponding procedures, and
throughout the library `err::{self}` is often used to prefix use of the types with `err::`.
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error when building a formula.
    Build(BuildError),

    /// An error related to parsing.
    Parse(ParseError),

    /// An error in the symmetry subsystem.
    Symmetry(SymmetryError),
}

/// Noted errors when building a formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A clear instance of an unsatisfiable clause.
    ///
    /// Once seen, the error is sticky: the solver reports it for every further addition.
    Unsatisfiable,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification in a DIMACS input.
    ProblemSpecification,

    /// Some unspecific problem at a specific line.
    Line(usize),

    /// A literal was found where no literal could be read.
    Literal(usize),

    /// A required delimiter was not found.
    MissingDelimiter,

    /// A generator count was expected and not found.
    GeneratorCount,

    /// A generator ended mid-pair.
    IncompletePair,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors in the symmetry subsystem.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SymmetryError {
    /// An equality was looked up before being registered in the equality table.
    UnregisteredEquality,
}

impl From<SymmetryError> for ErrorKind {
    fn from(e: SymmetryError) -> Self {
        ErrorKind::Symmetry(e)
    }
}
