#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use otter_bmc::{
    config::Config,
    driver::{check_each_property, Driver, Outcome, Report, StepReport},
    encoding::Encoding,
    engine::{Context, Status, Stop},
    index::Indexer,
    input,
    specification::Specification,
    types::err::ErrorKind,
};

mod artifacts;
mod config_io;
mod parse;

use config_io::ConfigIO;

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = parse::cli::cli().get_matches();

    let config = match parse::config::config_from_args(&matches) {
        Ok(config) => config,
        Err(e) => {
            println!("c Configuration error: {e}");
            std::process::exit(1);
        }
    };
    let config_io = ConfigIO::from_args(&matches);

    let spec = match input::load(&config_io.input)
        .map_err(ErrorKind::from)
        .and_then(|source| Ok(Specification::build(&source, config.spec_options())?))
    {
        Ok(spec) => spec,
        Err(e) => {
            println!("c Error reading {}: {e}", config_io.input.display());
            std::process::exit(1);
        }
    };

    if config_io.detail > 0 {
        println!(
            "c {} atoms, {} rules, {} properties",
            spec.symbols().len(),
            spec.rules().len(),
            spec.properties().len()
        );
    }

    let index = Indexer::build(&spec, config.bound);
    let encoding = match Encoding::build(&spec, &index) {
        Ok(encoding) => encoding,
        Err(e) => {
            println!("c Encoding error: {e}");
            std::process::exit(2);
        }
    };

    match artifacts::write_artifacts(&encoding, &config_io.input, &config_io.output_dir) {
        Ok((cnf_path, map_path)) => {
            if config_io.detail > 0 {
                println!("c Wrote {} and {}", cnf_path.display(), map_path.display());
            }
        }
        Err(e) => {
            println!("c Error writing artifacts: {e}");
            std::process::exit(1);
        }
    }

    let stop = match config.time_limit {
        Some(limit) => Stop::with_time_limit(limit),
        None => Stop::default(),
    };

    let code = match config_io.each_property {
        true => each_property(&spec, &config, &config_io, &stop),
        false => all_properties(&spec, (&index, &encoding), &config, &config_io, &stop),
    };

    std::process::exit(code)
}

fn all_properties(
    spec: &Specification,
    (index, encoding): (&Indexer, &Encoding),
    config: &Config,
    config_io: &ConfigIO,
    stop: &Stop,
) -> i32 {
    let observer = |report: &StepReport| {
        if config_io.detail > 0 {
            println!(
                "c Step {}: {} clauses, assuming {:?}",
                report.step, report.clauses, report.assumptions
            );
        }
        match report.status {
            Status::Unsatisfiable => {
                println!("UNSATISFIABLE up to step {} — property holds", report.step + 1)
            }
            Status::Unknown => println!("UNKNOWN up to step {}", report.step + 1),
            Status::Satisfiable => {}
        }
    };

    let result = Driver::new(spec, config.bound)
        .with_stop(stop.clone())
        .run_with(index, encoding, || Ok(Context::from_config(config.engine.clone())), observer);

    match result {
        Ok(report) => print_outcome(&report, config_io),
        Err(e) => error_code(e),
    }
}

fn each_property(spec: &Specification, config: &Config, config_io: &ConfigIO, stop: &Stop) -> i32 {
    let result = check_each_property(
        spec,
        config.bound,
        || Ok(Context::from_config(config.engine.clone())),
        stop,
    );

    let reports = match result {
        Ok(reports) => reports,
        Err(e) => return error_code(e),
    };

    let mut code = 20;
    for (property, report) in reports {
        println!("c Property: {property}");
        match print_outcome(&report, config_io) {
            10 => code = 10,
            30 if code != 10 => code = 30,
            _ => {}
        }
    }
    code
}

/// Prints the outcome of a report, returning the exit code of the outcome.
fn print_outcome(report: &Report, config_io: &ConfigIO) -> i32 {
    match &report.outcome {
        Outcome::Counterexample(trace) => {
            println!("SATISFIABLE — property violated at step {}", trace.step + 1);
            println!("{trace}");
            10
        }
        Outcome::SafeUpTo(bound) => {
            if config_io.each_property {
                println!("UNSATISFIABLE up to step {} — property holds", bound + 1);
            }
            20
        }
        Outcome::Inconclusive(step) => {
            if config_io.each_property {
                println!("UNKNOWN up to step {}", step + 1);
            }
            30
        }
    }
}

fn error_code(error: ErrorKind) -> i32 {
    println!("c Error: {error}");
    match error {
        ErrorKind::Engine(_) | ErrorKind::Index(_) => 2,
        ErrorKind::Config(_) | ErrorKind::Input(_) | ErrorKind::Spec(_) => 1,
    }
}
