use std::path::PathBuf;

use clap::{value_parser, Arg, Command};

use otter_bmc::config::{self, EngineConfig};

/// Reads `0`, `1`, `true`, or `false`.
fn flag(text: &str) -> Result<bool, String> {
    match text.trim().to_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("expected 0, 1, true, or false, found '{other}'")),
    }
}

pub fn cli() -> Command {
    let engine = EngineConfig::default();

    Command::new("otter_bmc")
        .about("Checks safety properties of a transition system up to a bound, by incremental satisfiability")
        .version(env!("CARGO_PKG_VERSION"))

        .arg(Arg::new("input")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("The JSON description of the transition system."))

        .arg(Arg::new("output_dir")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("The directory to write the CNF and activation map artifacts to."))

        .arg(Arg::new("steps")
            .required(false)
            .value_parser(value_parser!(usize))
            .help(format!("The bound, as a number of transitions.
Default: {}", config::DEFAULT_BOUND)))

        .arg(Arg::new("incremental")
            .required(false)
            .value_parser(flag)
            .help("Whether to solve incrementally, as 0, 1, true, or false.
Default: true")
            .long_help("Whether to solve incrementally, as 0, 1, true, or false.
Default: true

Incrementally, a single engine is grown through activation literals from one bound to the next.
Otherwise, the instance of each bound is encoded and solved afresh."))

        .arg(Arg::new("time_limit")
            .long("time-limit")
            .short('t')
            .value_name("SECONDS")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help("Time limit for the run, after which the result is unknown."))

        .arg(Arg::new("no_inertia")
            .long("no-inertia")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Allow atoms unaffected by every enabled rule to change value.")
            .long_help("Allow atoms unaffected by every enabled rule to change value.

By default, an atom keeps its value across a transition unless some enabled rule mentions the atom in its effects."))

        .arg(Arg::new("each_property")
            .long("each-property")
            .short('e')
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Check each safety property on its own, in parallel."))

        .arg(Arg::new("polarity_lean")
            .long("polarity-lean")
            .value_parser(value_parser!(f64))
            .required(false)
            .num_args(1)
            .help(format!("The chance of choosing a value of true for an atom with no saved phase.
Default: {}", engine.polarity_lean.value)))

        .arg(Arg::new("random_decision_bias")
            .long("random-decision-bias")
            .value_parser(value_parser!(f64))
            .required(false)
            .num_args(1)
            .help(format!("The chance of choosing an atom at random, rather than by activity.
Default: {}", engine.random_decision_bias.value)))

        .arg(Arg::new("luby")
            .long("luby")
            .short('l')
            .value_name("U")
            .value_parser(value_parser!(u32))
            .required(false)
            .num_args(1)
            .help(format!("The u value to multiply the luby sequence by when scheduling restarts.
Default: {}", engine.luby_u.value)))

        .arg(Arg::new("seed")
            .long("seed")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help(format!("Seed for the source of randomness.
Default: {}", engine.seed)))

        .arg(Arg::new("detail")
            .long("detail")
            .short('d')
            .value_parser(value_parser!(u8))
            .required(false)
            .num_args(1)
            .help("The level of detail to print: 0 for results and every state of a counterexample, 1 to add the clauses and assumptions of each step."))
}

#[cfg(test)]
mod tests {
    use super::flag;

    #[test]
    fn flags() {
        assert_eq!(flag("1"), Ok(true));
        assert_eq!(flag("False"), Ok(false));
        assert!(flag("yes").is_err());
    }
}
