/*!
Reading and writing the DIMACS representation of a formula.

The reader accepts the standard format: an optional `p cnf <variables> <clauses>` header,
comment lines opened by `c`, and zero-terminated clauses of non-zero integer literals.
Variables beyond the declared count are created on demand.

The writer emits the formula filtered against the top-level valuation --- satisfied clauses are
dropped and false literals omitted --- with assumptions as unit clauses, and variables renumbered
densely from one in order of first encounter.
*/

use std::io::{BufRead, Write};

use rand::{Rng, SeedableRng};

use crate::{
    context::GenericSolver,
    db::ClauseRef,
    structures::literal::{Lit, Var},
    types::err::{self, ParseError},
};

/// A summary of a parsed DIMACS input.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParserInfo {
    pub expected_vars: Option<usize>,
    pub expected_clauses: Option<usize>,
    pub added_clauses: usize,
}

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Reads a DIMACS formula into the solver.
    ///
    /// ```rust
    /// # use marten_sat::context::Solver;
    /// # use marten_sat::config::Config;
    /// # use marten_sat::reports::Report;
    /// let mut solver = Solver::from_config(Config::default());
    ///
    /// let dimacs = "\
    /// p cnf 2 4
    ///  1  2 0
    ///  1 -2 0
    /// -1  2 0
    /// -1 -2 0
    /// ";
    ///
    /// assert!(solver.read_dimacs(dimacs.as_bytes()).is_ok());
    /// assert_eq!(solver.solve(), Report::Unsatisfiable);
    /// ```
    pub fn read_dimacs(&mut self, mut reader: impl BufRead) -> Result<ParserInfo, err::ErrorKind> {
        let mut buffer = String::default();
        let mut clause_buffer: Vec<Lit> = Vec::default();
        let mut info = ParserInfo::default();
        let mut lines = 0;

        loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => lines += 1,
                Err(_) => return Err(ParseError::Line(lines).into()),
            }

            match buffer.chars().next() {
                Some('c') => continue,

                Some('p') => {
                    let mut details = buffer.split_whitespace();
                    let vars: usize = match details.nth(2).map(str::parse) {
                        Some(Ok(count)) => count,
                        _ => return Err(ParseError::ProblemSpecification.into()),
                    };
                    let clauses: usize = match details.next().map(str::parse) {
                        Some(Ok(count)) => count,
                        _ => return Err(ParseError::ProblemSpecification.into()),
                    };

                    while (self.n_vars() as usize) < vars {
                        self.new_var();
                    }

                    info.expected_vars = Some(vars);
                    info.expected_clauses = Some(clauses);
                }

                Some('%') => break,

                _ => {
                    for item in buffer.split_whitespace() {
                        match item {
                            "0" => {
                                let clause = std::mem::take(&mut clause_buffer);
                                self.add_clause(clause)?;
                                info.added_clauses += 1;
                            }
                            _ => {
                                let int: i32 = match item.parse() {
                                    Ok(int) if int != 0 => int,
                                    _ => return Err(ParseError::Literal(lines).into()),
                                };
                                while self.n_vars() < int.unsigned_abs() {
                                    self.new_var();
                                }
                                clause_buffer.push(Lit::from_dimacs(int));
                            }
                        }
                    }
                }
            }
        }

        if !clause_buffer.is_empty() {
            return Err(ParseError::MissingDelimiter.into());
        }

        Ok(info)
    }

    /// Writes the formula in DIMACS form, with `assumptions` as unit clauses.
    ///
    /// Clauses satisfied at the top level are dropped, false literals are omitted, and variables
    /// are renumbered densely from one in order of first encounter.
    /// A solver in the contradictory state writes a small canonical contradiction.
    pub fn to_dimacs(&self, writer: &mut impl Write, assumptions: &[Lit]) -> std::io::Result<()> {
        if !self.ok {
            return write!(writer, "p cnf 1 2\n1 0\n-1 0\n");
        }

        let mut map: Vec<Option<Var>> = vec![None; self.n_vars() as usize];
        let mut mapped: Var = 0;

        // Map the variables of unsatisfied clauses first, then assumptions.
        let mut count = 0;
        for &cr in &self.clauses {
            if self.arena.is_deleted(cr) || self.satisfied(cr) {
                continue;
            }
            count += 1;
            for l in self.arena.literals(cr) {
                if self.vars.value_of_lit(l) != Some(false) {
                    map_var(l.var(), &mut map, &mut mapped);
                }
            }
        }
        for &assumption in assumptions {
            map_var(assumption.var(), &mut map, &mut mapped);
        }
        count += assumptions.len();

        writeln!(writer, "p cnf {mapped} {count}")?;

        for &assumption in assumptions {
            let var = map_var(assumption.var(), &mut map, &mut mapped) + 1;
            match assumption.polarity() {
                true => writeln!(writer, "{var} 0")?,
                false => writeln!(writer, "-{var} 0")?,
            }
        }

        for &cr in &self.clauses {
            if self.arena.is_deleted(cr) {
                continue;
            }
            self.write_clause_dimacs(writer, cr, &mut map, &mut mapped)?;
        }

        Ok(())
    }

    fn write_clause_dimacs(
        &self,
        writer: &mut impl Write,
        cr: ClauseRef,
        map: &mut Vec<Option<Var>>,
        mapped: &mut Var,
    ) -> std::io::Result<()> {
        if self.satisfied(cr) {
            return Ok(());
        }

        for l in self.arena.literals(cr) {
            if self.vars.value_of_lit(l) != Some(false) {
                let var = map_var(l.var(), map, mapped) + 1;
                match l.polarity() {
                    true => write!(writer, "{var} ")?,
                    false => write!(writer, "-{var} ")?,
                }
            }
        }
        writeln!(writer, "0")
    }
}

fn map_var(var: Var, map: &mut Vec<Option<Var>>, mapped: &mut Var) -> Var {
    if map.len() <= var as usize {
        map.resize(var as usize + 1, None);
    }
    *map[var as usize].get_or_insert_with(|| {
        let fresh = *mapped;
        *mapped += 1;
        fresh
    })
}

#[cfg(test)]
mod dimacs_parser_tests {
    use crate::{config::Config, context::Solver, types::err::ErrorKind};

    use super::*;

    #[test]
    fn bad_delimiter() {
        let mut solver = Solver::from_config(Config::default());

        assert_eq!(
            solver.read_dimacs("1 2".as_bytes()),
            Err(ErrorKind::Parse(ParseError::MissingDelimiter))
        );
    }

    #[test]
    fn bad_problem_spec() {
        let mut solver = Solver::from_config(Config::default());

        assert_eq!(
            solver.read_dimacs("p cnf\n1 2 0".as_bytes()),
            Err(ErrorKind::Parse(ParseError::ProblemSpecification))
        );
    }

    #[test]
    fn empty_ok() {
        let mut solver = Solver::from_config(Config::default());

        assert!(solver.read_dimacs("\n\n".as_bytes()).is_ok());
        assert_eq!(solver.n_vars(), 0);
    }

    #[test]
    fn vars_ensured() {
        let mut solver = Solver::from_config(Config::default());

        let info = solver.read_dimacs("p cnf 10 0".as_bytes()).expect("parse failure");

        assert_eq!(solver.n_vars(), 10);
        assert_eq!(info.expected_clauses, Some(0));
    }

    #[test]
    fn undeclared_vars_created() {
        let mut solver = Solver::from_config(Config::default());

        assert!(solver.read_dimacs("p cnf 1 1\n1 7 0".as_bytes()).is_ok());
        assert_eq!(solver.n_vars(), 7);
    }

    #[test]
    fn round_trip() {
        let mut solver = Solver::from_config(Config::default());
        solver
            .read_dimacs("p cnf 3 2\n1 -2 0\n2 3 0\n".as_bytes())
            .expect("parse failure");

        let mut out = Vec::new();
        solver.to_dimacs(&mut out, &[]).expect("write failure");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.starts_with("p cnf 3 2"));
        assert!(text.contains("1 -2 0"));
        assert!(text.contains("2 3 0"));
    }
}
