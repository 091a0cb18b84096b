/// Counts for various things which count, roughly.
#[derive(Default)]
pub struct Counters {
    /// A count of calls to solve.
    pub solves: u64,

    /// A count of restarts, i.e. calls to search.
    pub starts: u64,

    /// A count of decisions made.
    pub decisions: u64,

    /// A count of decisions made on a randomly chosen variable.
    pub rnd_decisions: u64,

    /// A count of literals propagated.
    pub propagations: u64,

    /// A count of conflicts seen.
    pub conflicts: u64,

    /// A count of decision-eligible variables.
    pub dec_vars: u64,

    /// A count of attached original clauses.
    pub num_clauses: u64,

    /// A count of attached learnt clauses.
    pub num_learnts: u64,

    /// A count of literals in attached original clauses.
    pub clauses_literals: u64,

    /// A count of literals in attached learnt clauses.
    pub learnts_literals: u64,

    /// A count of learnt literals before minimization.
    pub max_literals: u64,

    /// A count of learnt literals after minimization.
    pub tot_literals: u64,
}
