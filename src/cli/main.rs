use std::{io::BufReader, path::PathBuf, str::FromStr};

use marten_sat::{config::Config, context::Solver, reports::Report};

mod parse_args;
use parse_args::{parse_args, CliConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("c A path to a CNF file is required.");
        std::process::exit(1);
    }

    let mut config = Config::default();
    let mut cli = CliConfig::default();
    parse_args(&args, &mut config, &mut cli);

    let mut solver = Solver::from_config(config);

    let path = match PathBuf::from_str(args.last().expect("an argument")) {
        Ok(path) => path,
        Err(_) => {
            println!("c Unable to interpret the CNF path.");
            std::process::exit(1);
        }
    };

    let file = match std::fs::File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            println!("c Failed to open the CNF file: {e}");
            std::process::exit(1);
        }
    };

    let parse_result = match path.extension().and_then(|extension| extension.to_str()) {
        Some("xz") => solver.read_dimacs(BufReader::new(xz2::read::XzDecoder::new(&file))),
        _ => solver.read_dimacs(BufReader::new(&file)),
    };

    if let Err(e) = parse_result {
        if solver.is_ok() {
            println!("c Failed to parse the CNF file: {e:?}");
            std::process::exit(1);
        }
        // Unsatisfiability during parsing falls through to the report.
    }

    if let Some(symmetry_path) = &cli.symmetry {
        match std::fs::File::open(symmetry_path) {
            Err(e) => {
                println!("c Failed to open the symmetry file: {e}");
                std::process::exit(1);
            }
            Ok(file) => match solver.read_symmetry(BufReader::new(&file)) {
                Ok(count) => println!("c Read {count} symmetry generators."),
                Err(e) => {
                    if solver.is_ok() {
                        println!("c Failed to parse the symmetry file: {e:?}");
                        std::process::exit(1);
                    }
                }
            },
        }
    }

    let report = solver.solve();

    if cli.stats {
        print_stats(&solver);
    }

    println!("s {report}");

    if cli.model && report == Report::Satisfiable {
        print!("v");
        for (var, value) in solver.model().iter().enumerate() {
            match value {
                Some(true) => print!(" {}", var + 1),
                Some(false) => print!(" -{}", var + 1),
                None => {}
            }
        }
        println!(" 0");
    }

    std::process::exit(report.exit_code());
}

fn print_stats(solver: &Solver) {
    let counters = &solver.counters;
    println!("c restarts              : {}", counters.starts);
    println!("c conflicts             : {}", counters.conflicts);
    let random_share = match counters.decisions {
        0 => 0.0,
        _ => counters.rnd_decisions as f64 * 100.0 / counters.decisions as f64,
    };
    println!(
        "c decisions             : {} ({random_share:.2} % random)",
        counters.decisions,
    );
    println!("c propagations          : {}", counters.propagations);
    let deleted_share = match counters.max_literals {
        0 => 0.0,
        _ => {
            (counters.max_literals - counters.tot_literals) as f64 * 100.0
                / counters.max_literals as f64
        }
    };
    println!(
        "c conflict literals     : {} ({deleted_share:.2} % deleted)",
        counters.tot_literals,
    );

    if solver.symmetry_perm_count() > 0 {
        let sbp = solver.sbp_stats();
        println!("c sbp clauses           : {}", sbp.sbp_clauses);
        println!("c sbp untouched         : {}", sbp.sbp_untouched);
        println!("c sbp outside analysis  : {}", sbp.sbp_unresolved);
    }
}
