use clap::ArgMatches;

use otter_bmc::{config::Config, types::err::{self}};

pub fn config_from_args(args: &ArgMatches) -> Result<Config, err::ConfigError> {
    let mut the_config = Config::default();

    if let Ok(Some(steps)) = args.try_get_one::<usize>("steps") {
        the_config.bound = *steps
    };

    if let Ok(Some(incremental)) = args.try_get_one::<bool>("incremental") {
        the_config.incremental = *incremental
    };

    if let Ok(Some(true)) = args.try_get_one::<bool>("no_inertia") {
        the_config.inertia = false
    };

    if let Ok(Some(secs)) = args.try_get_one::<u64>("time_limit") {
        the_config.time_limit = Some(std::time::Duration::from_secs(*secs))
    };

    if let Ok(Some(lean)) = args.try_get_one::<f64>("polarity_lean") {
        the_config.engine.polarity_lean.set(*lean)?
    };

    if let Ok(Some(bias)) = args.try_get_one::<f64>("random_decision_bias") {
        the_config.engine.random_decision_bias.set(*bias)?
    };

    if let Ok(Some(u)) = args.try_get_one::<u32>("luby") {
        the_config.engine.luby_u.set(*u)?
    };

    if let Ok(Some(seed)) = args.try_get_one::<u64>("seed") {
        the_config.engine.seed = *seed
    };

    Ok(the_config)
}
