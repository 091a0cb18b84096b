use marten_sat::{config::Config, context::Solver, reports::Report, structures::literal::Lit};

fn dimacs_snapshot(solver: &Solver) -> String {
    let mut out = Vec::new();
    solver.to_dimacs(&mut out, &[]).expect("write failure");
    String::from_utf8(out).expect("utf8")
}

mod maintenance {
    use super::*;

    /// A chain of implications with a few side clauses, satisfiable.
    fn implication_ladder(solver: &mut Solver) -> Vec<Lit> {
        let lits: Vec<Lit> = (0..12).map(|_| Lit::positive(solver.new_var())).collect();

        for pair in lits.windows(2) {
            solver.add_clause(vec![!pair[0], pair[1]]).expect("clause");
        }
        for triple in lits.chunks(3) {
            solver
                .add_clause(triple.to_vec())
                .expect("clause");
        }

        lits
    }

    #[test]
    fn garbage_collection_round_trip() {
        let mut solver = Solver::from_config(Config::default());
        let lits = implication_ladder(&mut solver);

        assert_eq!(solver.solve(), Report::Satisfiable);

        let before = dimacs_snapshot(&solver);
        solver.garbage_collect();
        let after = dimacs_snapshot(&solver);

        assert_eq!(before, after);

        // The solver stays usable across compaction.
        assert_eq!(solver.solve_with_assumptions(&[lits[0]]), Report::Satisfiable);
        assert_eq!(solver.model_value(lits[11]), Some(true));
    }

    #[test]
    fn backjumps_are_idempotent() {
        let mut solver = Solver::from_config(Config::default());
        let lits = implication_ladder(&mut solver);

        assert!(solver.implies(&[lits[0]]).is_some());
        assert_eq!(solver.decision_level(), 0);

        solver.cancel_until(0);
        solver.cancel_until(0);
        assert_eq!(solver.decision_level(), 0);

        assert_eq!(solver.solve(), Report::Satisfiable);
    }

    #[test]
    fn implies_follows_the_chain() {
        let mut solver = Solver::from_config(Config::default());
        let lits = implication_ladder(&mut solver);

        let implied = solver.implies(&[lits[0]]).expect("consistent assumption");
        for lit in &lits[1..] {
            assert!(implied.contains(lit));
        }

        // No residue on the trail.
        assert_eq!(solver.decision_level(), 0);
        assert_eq!(solver.value_of(lits[3].var()), None);
    }

    #[test]
    fn implies_detects_inconsistency() {
        let mut solver = Solver::from_config(Config::default());
        let lits = implication_ladder(&mut solver);

        assert!(solver.implies(&[lits[0], !lits[11]]).is_none());
        assert_eq!(solver.decision_level(), 0);
    }

    #[test]
    fn conflict_budget_reports_unknown() {
        let mut solver = Solver::from_config(Config::default());

        // PHP(4,3): twelve variables, unsatisfiable with some search required.
        let var = |pigeon: usize, hole: usize| Lit::positive((pigeon * 3 + hole) as u32);
        for _ in 0..12 {
            solver.new_var();
        }
        for pigeon in 0..4 {
            solver
                .add_clause(vec![var(pigeon, 0), var(pigeon, 1), var(pigeon, 2)])
                .expect("pigeon clause");
        }
        for hole in 0..3 {
            for first in 0..4 {
                for second in first + 1..4 {
                    solver
                        .add_clause(vec![!var(first, hole), !var(second, hole)])
                        .expect("hole clause");
                }
            }
        }

        solver.set_conf_budget(0);
        assert_eq!(solver.solve(), Report::Unknown);

        solver.budget_off();
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn interrupt_reports_unknown() {
        let mut solver = Solver::from_config(Config::default());
        let lits = implication_ladder(&mut solver);

        solver.interrupt_flag().store(true, std::sync::atomic::Ordering::Relaxed);
        assert_eq!(solver.solve(), Report::Unknown);

        solver.clear_interrupt();
        assert_eq!(solver.solve_with_assumptions(&[lits[0]]), Report::Satisfiable);
    }

    #[test]
    fn released_variables_recycle() {
        let mut solver = Solver::from_config(Config::default());

        let keep = solver.new_var();
        let released = solver.new_var();

        solver
            .add_clause(vec![Lit::positive(keep), Lit::positive(released)])
            .expect("clause");

        solver.release_var(Lit::positive(released));
        assert!(solver.simplify());

        assert_eq!(solver.new_var(), released);
    }
}
