use marten_sat::{config::Config, context::Solver, reports::Report, structures::literal::Lit};

mod basic_assumptions {
    use super::*;

    #[test]
    fn direct() {
        let mut solver = Solver::from_config(Config::default());

        let p = Lit::positive(solver.new_var());
        let q = Lit::positive(solver.new_var());

        assert!(solver.add_clause(vec![!p, q]).is_ok());
        assert!(solver.add_clause(vec![!q]).is_ok());

        assert_eq!(solver.solve_with_assumptions(&[p]), Report::Unsatisfiable);

        // The conflict holds the negations of the responsible assumptions.
        assert!(solver.failed_assumptions().contains(&!p));

        // The formula itself stays satisfiable.
        assert!(solver.is_ok());
        assert_eq!(solver.solve(), Report::Satisfiable);
    }

    #[test]
    fn small_chain() {
        let mut solver = Solver::from_config(Config::default());

        let lits: Vec<Lit> = (0..5).map(|_| Lit::positive(solver.new_var())).collect();
        let [p, q, r, s, t] = lits.as_slice() else {
            panic!("insufficient literals");
        };

        assert!(solver.add_clause(vec![!*p, *q]).is_ok());
        assert!(solver.add_clause(vec![!*q, *r]).is_ok());
        assert!(solver.add_clause(vec![!*r, *s]).is_ok());
        assert!(solver.add_clause(vec![!*s, *t]).is_ok());
        assert!(solver.add_clause(vec![!*t]).is_ok());

        assert_eq!(solver.solve_with_assumptions(&[*p]), Report::Unsatisfiable);
        assert!(solver.failed_assumptions().contains(&!*p));
    }

    #[test]
    fn conflict_set_over_both_assumptions() {
        let mut solver = Solver::from_config(Config::default());

        let p = Lit::positive(solver.new_var());
        let q = Lit::positive(solver.new_var());

        assert!(solver.add_clause(vec![p, q]).is_ok());

        assert_eq!(
            solver.solve_with_assumptions(&[!p, !q]),
            Report::Unsatisfiable
        );

        let conflict = solver.failed_assumptions();
        assert!(conflict.contains(&p));
        assert!(conflict.contains(&q));
        assert_eq!(conflict.len(), 2);
    }

    #[test]
    fn consistent_assumptions() {
        let mut solver = Solver::from_config(Config::default());

        let p = Lit::positive(solver.new_var());
        let q = Lit::positive(solver.new_var());

        assert!(solver.add_clause(vec![!p, q]).is_ok());

        assert_eq!(solver.solve_with_assumptions(&[p]), Report::Satisfiable);
        assert_eq!(solver.model_value(p), Some(true));
        assert_eq!(solver.model_value(q), Some(true));

        // Assumptions do not stick between solves.
        assert_eq!(solver.solve_with_assumptions(&[!p]), Report::Satisfiable);
        assert_eq!(solver.model_value(p), Some(false));
    }
}
