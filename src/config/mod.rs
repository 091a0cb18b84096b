/*!
Configuration of a solver.

All configuration for a solver is contained within a [Config], passed to the solver on
construction.
Options carry their name and permitted range so external interfaces (notably the command-line
interface) can validate requested values, while a few fixed tunables of the learnt-clause limit
schedule are plain fields.

The defaults are those of the original MiniSAT-family option table.
*/

mod config_option;
pub use config_option::ConfigOption;

/// The representation of variable and clause activity.
pub type Activity = f64;

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// The variable activity decay factor.
    pub var_decay: ConfigOption<f64>,

    /// The clause activity decay factor.
    pub clause_decay: ConfigOption<f64>,

    /// The frequency with which the decision heuristic tries to choose a random variable.
    pub random_var_freq: ConfigOption<f64>,

    /// The seed used by random variable selection.
    pub random_seed: ConfigOption<u64>,

    /// Controls conflict clause minimization (0=none, 1=basic, 2=deep).
    pub ccmin_mode: ConfigOption<u8>,

    /// Controls the level of phase saving (0=none, 1=limited, 2=full).
    pub phase_saving: ConfigOption<u8>,

    /// Randomize the initial activity.
    pub rnd_init_act: ConfigOption<bool>,

    /// Use a random polarity when making a decision.
    pub rnd_pol: ConfigOption<bool>,

    /// Use the luby restart sequence, geometric restarts otherwise.
    pub luby_restart: ConfigOption<bool>,

    /// The base restart interval.
    pub restart_first: ConfigOption<u32>,

    /// The restart interval increase factor.
    pub restart_inc: ConfigOption<f64>,

    /// The fraction of wasted memory allowed before a garbage collection is triggered.
    pub garbage_frac: ConfigOption<f64>,

    /// Minimum learnt clause limit.
    pub min_learnts_lim: ConfigOption<u32>,

    /// Break symmetries by emulating shatter.
    pub symm_shatter: ConfigOption<bool>,

    /// Break symmetries via implication chaining SBPs.
    pub symm_chain: ConfigOption<bool>,

    /// Use equality table auxiliary variables.
    pub symm_eq_aux: ConfigOption<bool>,

    /// Add the symmetry breaking clauses dynamically.
    pub symm_dynamic: ConfigOption<bool>,

    /// Decide on symmetry added auxiliary variables.
    pub symm_aux_decide: ConfigOption<bool>,

    /// The fraction of original clauses used to seed the learnt clause limit.
    pub learntsize_factor: f64,

    /// The factor by which the learnt clause limit grows on each adjustment.
    pub learntsize_inc: f64,

    /// Conflicts before the first adjustment of the learnt clause limit.
    pub learntsize_adjust_start: f64,

    /// The factor by which the adjustment interval itself grows.
    pub learntsize_adjust_inc: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            var_decay: ConfigOption {
                name: "var-decay",
                min: f64::MIN_POSITIVE,
                max: 1.0,
                value: 0.95,
            },

            clause_decay: ConfigOption {
                name: "cla-decay",
                min: f64::MIN_POSITIVE,
                max: 1.0,
                value: 0.999,
            },

            random_var_freq: ConfigOption {
                name: "rnd-freq",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_seed: ConfigOption {
                name: "rnd-seed",
                min: 1,
                max: u64::MAX,
                value: 91648253,
            },

            ccmin_mode: ConfigOption {
                name: "ccmin-mode",
                min: 0,
                max: 2,
                value: 2,
            },

            phase_saving: ConfigOption {
                name: "phase-saving",
                min: 0,
                max: 2,
                value: 2,
            },

            rnd_init_act: ConfigOption {
                name: "rnd-init",
                min: false,
                max: true,
                value: false,
            },

            rnd_pol: ConfigOption {
                name: "rnd-pol",
                min: false,
                max: true,
                value: false,
            },

            luby_restart: ConfigOption {
                name: "luby",
                min: false,
                max: true,
                value: true,
            },

            restart_first: ConfigOption {
                name: "rfirst",
                min: 1,
                max: u32::MAX,
                value: 100,
            },

            restart_inc: ConfigOption {
                name: "rinc",
                min: 1.0,
                max: f64::MAX,
                value: 2.0,
            },

            garbage_frac: ConfigOption {
                name: "gc-frac",
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
                value: 0.20,
            },

            min_learnts_lim: ConfigOption {
                name: "min-learnts",
                min: 0,
                max: u32::MAX,
                value: 0,
            },

            symm_shatter: ConfigOption {
                name: "symm-shatter",
                min: false,
                max: true,
                value: false,
            },

            symm_chain: ConfigOption {
                name: "symm-chain",
                min: false,
                max: true,
                value: false,
            },

            symm_eq_aux: ConfigOption {
                name: "symm-eq-aux",
                min: false,
                max: true,
                value: false,
            },

            symm_dynamic: ConfigOption {
                name: "symm-dynamic",
                min: false,
                max: true,
                value: false,
            },

            symm_aux_decide: ConfigOption {
                name: "symm-aux-decide",
                min: false,
                max: true,
                value: false,
            },

            learntsize_factor: 1.0 / 3.0,
            learntsize_inc: 1.1,
            learntsize_adjust_start: 100.0,
            learntsize_adjust_inc: 1.5,
        }
    }
}
