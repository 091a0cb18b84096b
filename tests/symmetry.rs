use marten_sat::{
    config::Config,
    context::Solver,
    reports::Report,
    structures::literal::Lit,
    symmetry::Permutation,
};

/// The pigeonhole formula PHP(3,2): three pigeons into two holes, with `x_{p,h}` meaning pigeon
/// `p` sits in hole `h`.
/// Six variables and nine clauses, unsatisfiable.
fn pigeonhole_3_2(solver: &mut Solver) {
    let var = |pigeon: usize, hole: usize| Lit::positive((pigeon * 2 + hole) as u32);
    for _ in 0..6 {
        solver.new_var();
    }

    // Every pigeon sits somewhere.
    for pigeon in 0..3 {
        solver
            .add_clause(vec![var(pigeon, 0), var(pigeon, 1)])
            .expect("pigeon clause");
    }

    // No two pigeons share a hole.
    for hole in 0..2 {
        for first in 0..3 {
            for second in first + 1..3 {
                solver
                    .add_clause(vec![!var(first, hole), !var(second, hole)])
                    .expect("hole clause");
            }
        }
    }
}

/// The generator swapping pigeons one and two: `x_{1,h} ↔ x_{2,h}` for both holes.
fn pigeon_swap() -> Permutation {
    Permutation::from_pairs(&[(1, 3), (2, 4)])
}

fn config_with(
    shatter: bool,
    chain: bool,
    eq_aux: bool,
    dynamic: bool,
) -> Config {
    let mut config = Config::default();
    config.symm_shatter.value = shatter;
    config.symm_chain.value = chain;
    config.symm_eq_aux.value = eq_aux;
    config.symm_dynamic.value = dynamic;
    config
}

mod pigeonhole {
    use super::*;

    #[test]
    fn baseline_unsat() {
        let mut solver = Solver::from_config(Config::default());
        pigeonhole_3_2(&mut solver);

        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn chain_static_unsat() {
        let mut solver = Solver::from_config(config_with(false, true, false, false));
        pigeonhole_3_2(&mut solver);
        solver.add_symmetry_generator(pigeon_swap()).expect("generator");

        assert!(solver.n_vars() > 6); // Pointer variables were introduced.
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn chain_with_eq_aux_unsat() {
        let mut solver = Solver::from_config(config_with(false, true, true, false));
        pigeonhole_3_2(&mut solver);
        solver.add_symmetry_generator(pigeon_swap()).expect("generator");

        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn chain_dynamic_unsat() {
        let mut solver = Solver::from_config(config_with(false, true, false, true));
        pigeonhole_3_2(&mut solver);
        solver.add_symmetry_generator(pigeon_swap()).expect("generator");

        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn shatter_unsat() {
        let mut solver = Solver::from_config(config_with(true, false, false, false));
        pigeonhole_3_2(&mut solver);
        solver.add_symmetry_generator(pigeon_swap()).expect("generator");

        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn shatter_with_eq_aux_unsat() {
        let mut solver = Solver::from_config(config_with(true, false, true, false));
        pigeonhole_3_2(&mut solver);
        solver.add_symmetry_generator(pigeon_swap()).expect("generator");

        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }
}

mod satisfiability_preserved {
    use super::*;

    /// `(1 ∨ 2) ∧ (3 ∨ 4)` with the symmetry swapping the two clauses.
    fn symmetric_sat(solver: &mut Solver) -> Vec<Vec<Lit>> {
        for _ in 0..4 {
            solver.new_var();
        }
        let clauses = vec![
            vec![Lit::positive(0), Lit::positive(1)],
            vec![Lit::positive(2), Lit::positive(3)],
        ];
        for clause in &clauses {
            solver.add_clause(clause.clone()).expect("clause");
        }
        clauses
    }

    fn model_satisfies(solver: &Solver, clauses: &[Vec<Lit>]) -> bool {
        clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|&l| solver.model_value(l) == Some(true))
        })
    }

    #[test]
    fn chain_static_sat() {
        let mut solver = Solver::from_config(config_with(false, true, false, false));
        let clauses = symmetric_sat(&mut solver);
        solver
            .add_symmetry_generator(Permutation::from_pairs(&[(1, 3), (2, 4)]))
            .expect("generator");

        assert_eq!(solver.solve(), Report::Satisfiable);
        assert!(model_satisfies(&solver, &clauses));
    }

    #[test]
    fn chain_dynamic_sat() {
        let mut solver = Solver::from_config(config_with(false, true, false, true));
        let clauses = symmetric_sat(&mut solver);
        solver
            .add_symmetry_generator(Permutation::from_pairs(&[(1, 3), (2, 4)]))
            .expect("generator");

        assert_eq!(solver.solve(), Report::Satisfiable);
        assert!(model_satisfies(&solver, &clauses));
    }

    #[test]
    fn shatter_sat() {
        let mut solver = Solver::from_config(config_with(true, false, false, false));
        let clauses = symmetric_sat(&mut solver);
        solver
            .add_symmetry_generator(Permutation::from_pairs(&[(1, 3), (2, 4)]))
            .expect("generator");

        assert_eq!(solver.solve(), Report::Satisfiable);
        assert!(model_satisfies(&solver, &clauses));
    }
}

mod subsystem {
    use super::*;

    #[test]
    fn aux_definitions_shared_between_permutations() {
        let mut solver = Solver::from_config(config_with(false, true, true, false));
        pigeonhole_3_2(&mut solver);

        solver.add_symmetry_generator(pigeon_swap()).expect("generator");
        let after_first = solver.n_vars();

        // The same mappings again: the equality pairs are memoized, only fresh pointer
        // variables appear.
        solver.add_symmetry_generator(pigeon_swap()).expect("generator");
        let second_cost = solver.n_vars() - after_first;

        assert_eq!(second_cost, 2);
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn aux_vars_respect_decision_config() {
        let mut config = config_with(false, true, false, false);
        config.symm_aux_decide.value = false;
        let mut solver = Solver::from_config(config);

        let clauses_vars = 4;
        for _ in 0..clauses_vars {
            solver.new_var();
        }
        solver
            .add_clause(vec![Lit::positive(0), Lit::positive(1)])
            .expect("clause");
        solver
            .add_clause(vec![Lit::positive(2), Lit::positive(3)])
            .expect("clause");
        solver
            .add_symmetry_generator(Permutation::from_pairs(&[(1, 3), (2, 4)]))
            .expect("generator");

        // A model is still found with the auxiliary variables excluded from decisions.
        assert_eq!(solver.solve(), Report::Satisfiable);
    }

    #[test]
    fn generators_via_file_dynamic() {
        let mut solver = Solver::from_config(config_with(false, true, false, true));
        pigeonhole_3_2(&mut solver);

        let file = "1\n1 3 0 2 4 0 0\n";
        assert_eq!(solver.read_symmetry(file.as_bytes()), Ok(1));
        assert_eq!(solver.symmetry_perm_count(), 1);

        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn empty_support_skipped() {
        let mut solver = Solver::from_config(config_with(false, true, false, false));
        pigeonhole_3_2(&mut solver);

        solver
            .add_symmetry_generator(Permutation::from_pairs(&[]))
            .expect("empty generator");

        assert_eq!(solver.symmetry_perm_count(), 0);
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }
}
