use marten_sat::{
    builder::ClauseOk,
    config::Config,
    context::Solver,
    reports::Report,
    structures::literal::Lit,
    types::err::{BuildError, ErrorKind},
};

mod basic {
    use super::*;

    #[test]
    fn empty_formula() {
        let mut solver = Solver::from_config(Config::default());

        assert_eq!(solver.solve(), Report::Satisfiable);
        assert!(solver.model().is_empty());
    }

    #[test]
    fn one_literal() {
        let mut solver = Solver::from_config(Config::default());
        let p = Lit::positive(solver.new_var());

        assert_eq!(solver.add_clause(vec![p]), Ok(ClauseOk::Added));
        assert_eq!(solver.solve(), Report::Satisfiable);
        assert_eq!(solver.model_value(p), Some(true));
    }

    #[test]
    fn conflict() {
        let mut solver = Solver::from_config(Config::default());

        let p = Lit::positive(solver.new_var());
        let q = Lit::positive(solver.new_var());

        assert!(solver.add_clause(vec![p, q]).is_ok());
        assert!(solver.add_clause(vec![!p, q]).is_ok());
        assert!(solver.add_clause(vec![p, !q]).is_ok());
        assert!(solver.add_clause(vec![!p, !q]).is_ok());

        assert_eq!(solver.solve(), Report::Unsatisfiable);
        assert!(!solver.is_ok());
    }

    #[test]
    fn unit_conjunct() {
        let mut solver = Solver::from_config(Config::default());

        let p = Lit::positive(solver.new_var());
        let q = Lit::positive(solver.new_var());

        assert_eq!(solver.add_clause(vec![p, q]), Ok(ClauseOk::Added));
        assert!(solver.add_clause(vec![!p]).is_ok());

        assert_eq!(solver.solve(), Report::Satisfiable);

        assert_eq!(solver.model_value(p), Some(false));
        assert_eq!(solver.model_value(q), Some(true));
    }

    #[test]
    fn contradiction_sticks() {
        let mut solver = Solver::from_config(Config::default());

        let p = Lit::positive(solver.new_var());
        let q = Lit::positive(solver.new_var());

        assert!(solver.add_clause(vec![p]).is_ok());
        assert_eq!(
            solver.add_clause(vec![!p]),
            Err(ErrorKind::Build(BuildError::Unsatisfiable))
        );
        assert!(!solver.is_ok());

        // Every further addition and solve reports unsatisfiability.
        assert_eq!(
            solver.add_clause(vec![q]),
            Err(ErrorKind::Build(BuildError::Unsatisfiable))
        );
        assert_eq!(solver.solve(), Report::Unsatisfiable);
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn duplicates_collapse() {
        let mut solver = Solver::from_config(Config::default());

        let p = Lit::positive(solver.new_var());
        let q = Lit::positive(solver.new_var());

        assert_eq!(solver.add_clause(vec![p, p, q, q]), Ok(ClauseOk::Added));
        assert_eq!(solver.n_clauses(), 1);
    }

    #[test]
    fn tautology_skip() {
        let mut solver = Solver::from_config(Config::default());

        let p = Lit::positive(solver.new_var());
        let q = Lit::positive(solver.new_var());

        assert_eq!(solver.add_clause(vec![p, !q, !p]), Ok(ClauseOk::Tautology));
        assert_eq!(solver.n_clauses(), 0);
    }

    #[test]
    fn two_colouring_of_a_path() {
        // A satisfiable formula with propagation beyond units.
        let mut solver = Solver::from_config(Config::default());

        let vars: Vec<Lit> = (0..6).map(|_| Lit::positive(solver.new_var())).collect();

        // Each of three nodes picks one of two colours, adjacent nodes differ.
        for node in 0..3 {
            let a = vars[2 * node];
            let b = vars[2 * node + 1];
            assert!(solver.add_clause(vec![a, b]).is_ok());
            assert!(solver.add_clause(vec![!a, !b]).is_ok());
        }
        for edge in 0..2 {
            for colour in 0..2 {
                let here = vars[2 * edge + colour];
                let there = vars[2 * (edge + 1) + colour];
                assert!(solver.add_clause(vec![!here, !there]).is_ok());
            }
        }

        assert_eq!(solver.solve(), Report::Satisfiable);

        for node in 0..3 {
            let a = solver.model_value(vars[2 * node]);
            let b = solver.model_value(vars[2 * node + 1]);
            assert_ne!(a, b);
        }
    }
}
