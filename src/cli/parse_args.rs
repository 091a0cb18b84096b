use std::path::PathBuf;

use marten_sat::config::Config;

/// Options which concern the driver rather than the solver.
#[derive(Default)]
pub struct CliConfig {
    /// The path to a symmetry file, if given.
    pub symmetry: Option<PathBuf>,

    /// Whether to write a model, if one exists.
    pub model: bool,

    /// Whether to write search statistics.
    pub stats: bool,
}

/// Parse CLI arguments into a [Config] struct and a [CliConfig] struct.
///
/// If an unrecognised argument or invalid option is found a message is sent and the process is
/// terminated.
pub fn parse_args(args: &[String], config: &mut Config, cli: &mut CliConfig) {
    // If a value is present, may be parsed appropriately, and is valid, the option is updated.
    // Otherwise, a message is sent.
    macro_rules! set_option {
        ($option:expr, $request:expr, $type:ty) => {{
            let (min, max) = $option.min_max();
            let mut updated = false;
            if let Some(request) = $request {
                if let Ok(value) = request.parse::<$type>() {
                    if min <= value && value <= max {
                        println!("c {} set to: {value}", $option.name);
                        $option.value = value;
                        updated = true;
                    }
                }
            }
            if !updated {
                println!("{} requires a value between {min} and {max}", $option.name);
                std::process::exit(1);
            }
        }};
    }

    for arg in args.iter().skip(1).rev().skip(1) {
        let mut split = arg.split('=');
        match split.next() {
            Some("--model") | Some("--valuation") => {
                println!("c A model will be written, if one exists.");
                cli.model = true;
            }

            Some("--stats") => {
                cli.stats = true;
            }

            Some("--symm") => {
                let Some(path) = split.next() else {
                    println!("The symm option requires a path to a symmetry file.");
                    std::process::exit(1);
                };
                println!("c Symmetries will be read from: {path}");
                cli.symmetry = Some(PathBuf::from(path));
            }

            // The remaining cases follow a common template, and should be in lexicographic
            // order.
            Some("--ccmin-mode") => set_option!(config.ccmin_mode, split.next(), u8),

            Some("--cla-decay") => set_option!(config.clause_decay, split.next(), f64),

            Some("--gc-frac") => set_option!(config.garbage_frac, split.next(), f64),

            Some("--luby") => set_option!(config.luby_restart, split.next(), bool),

            Some("--min-learnts") => set_option!(config.min_learnts_lim, split.next(), u32),

            Some("--phase-saving") => set_option!(config.phase_saving, split.next(), u8),

            Some("--rfirst") => set_option!(config.restart_first, split.next(), u32),

            Some("--rinc") => set_option!(config.restart_inc, split.next(), f64),

            Some("--rnd-freq") => set_option!(config.random_var_freq, split.next(), f64),

            Some("--rnd-init") => set_option!(config.rnd_init_act, split.next(), bool),

            Some("--rnd-pol") => set_option!(config.rnd_pol, split.next(), bool),

            Some("--rnd-seed") => set_option!(config.random_seed, split.next(), u64),

            Some("--symm-aux-decide") => set_option!(config.symm_aux_decide, split.next(), bool),

            Some("--symm-chain") => set_option!(config.symm_chain, split.next(), bool),

            Some("--symm-dynamic") => set_option!(config.symm_dynamic, split.next(), bool),

            Some("--symm-eq-aux") => set_option!(config.symm_eq_aux, split.next(), bool),

            Some("--symm-shatter") => set_option!(config.symm_shatter, split.next(), bool),

            Some("--var-decay") => set_option!(config.var_decay, split.next(), f64),

            Some(_) | None => {
                println!("Unable to parse argument: {arg:?}");
                std::process::exit(1);
            }
        }
    }
}
