/*!
Reading the symmetry-file representation of a generator set.

The format opens with the number of generators.
Each generator is a sequence of cycles --- non-zero integer pairs `l1 l2` closed by a zero ---
and ends at an empty cycle, i.e. a lone further zero.
A pair with `|l1| ≤ |l2|` and `l1 > 0` registers the mapping `l1 ↦ l2`, and symmetrically with
the pair reversed; other pairs are implied by sign-consistency and skipped.
Comment lines open with `c`.

Parsed generators are handed to
[add_symmetry_generator](crate::context::GenericSolver::add_symmetry_generator) as they complete.
*/

use std::io::BufRead;

use rand::{Rng, SeedableRng};

use crate::{
    context::GenericSolver,
    misc::log::targets::{self},
    symmetry::Permutation,
    types::err::{self, ParseError},
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Reads a symmetry file into the solver, returning the count of generators registered.
    pub fn read_symmetry(&mut self, mut reader: impl BufRead) -> Result<usize, err::ErrorKind> {
        let mut tokens: Vec<i64> = Vec::default();
        let mut buffer = String::default();
        let mut lines = 0;

        loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => lines += 1,
                Err(_) => return Err(ParseError::Line(lines).into()),
            }
            if buffer.starts_with('c') {
                continue;
            }
            for item in buffer.split_whitespace() {
                match item.parse() {
                    Ok(int) => tokens.push(int),
                    Err(_) => return Err(ParseError::Literal(lines).into()),
                }
            }
        }

        let mut stream = tokens.into_iter();
        let declared = match stream.next() {
            Some(count) if count >= 0 => count as usize,
            _ => return Err(ParseError::GeneratorCount.into()),
        };

        let mut registered = 0;
        let mut pairs: Vec<(i32, i32)> = Vec::default();

        loop {
            let l1 = match stream.next() {
                None => break,
                Some(int) => int,
            };

            if l1 == 0 {
                // An empty cycle closes the generator.
                let permutation = Permutation::from_pairs(&pairs);
                pairs.clear();
                self.ensure_permutation_vars(&permutation);
                self.add_symmetry_generator(permutation)?;
                registered += 1;
                continue;
            }

            let l2 = match stream.next() {
                Some(int) if int != 0 => int,
                _ => return Err(ParseError::IncompletePair.into()),
            };
            match stream.next() {
                Some(0) => {}
                _ => return Err(ParseError::IncompletePair.into()),
            }

            pairs.push((l1 as i32, l2 as i32));
        }

        if !pairs.is_empty() {
            // The final generator may end at end of input rather than an empty cycle.
            let permutation = Permutation::from_pairs(&pairs);
            self.ensure_permutation_vars(&permutation);
            self.add_symmetry_generator(permutation)?;
            registered += 1;
        }

        if registered != declared {
            log::warn!(
                target: targets::SYMMETRY,
                "The file declared {declared} generators; {registered} were read.",
            );
        }

        Ok(registered)
    }

    /// Grows the variable set to cover every variable a permutation moves.
    fn ensure_permutation_vars(&mut self, permutation: &Permutation) {
        for &var in permutation.support() {
            let required = match permutation.image_of(var) {
                Some(image) => var.max(image.var()),
                None => var,
            };
            while self.n_vars() <= required {
                self.new_var();
            }
        }
    }
}

#[cfg(test)]
mod symmetry_parser_tests {
    use crate::{config::Config, context::Solver};

    #[test]
    fn pair_generators() {
        let mut solver = Solver::from_config(Config::default());
        for _ in 0..6 {
            solver.new_var();
        }

        // Two generators of two transpositions each.
        let file = "2\n1 3 0 2 4 0 0\n3 5 0 4 6 0 0\n";
        let read = solver.read_symmetry(file.as_bytes()).expect("parse failure");

        assert_eq!(read, 2);
        assert_eq!(solver.symmetry_perm_count(), 2);
    }

    #[test]
    fn comments_skipped() {
        let mut solver = Solver::from_config(Config::default());
        for _ in 0..4 {
            solver.new_var();
        }

        let file = "c generated\n1\nc pigeons\n1 3 0 2 4 0 0\n";
        assert_eq!(solver.read_symmetry(file.as_bytes()), Ok(1));
    }
}
