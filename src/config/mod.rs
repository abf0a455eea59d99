/*!
Configuration of a run.

The primary configuration structure is [Config], which holds the bound, the encoding mode, and an [EngineConfig] for the default engine.

Numeric options with a range are [ConfigOption]s, which refuse values outside of the range.
*/

mod config_option;
pub use config_option::ConfigOption;

use std::time::Duration;

use crate::specification::Options;

/// The bound used when none is given.
pub const DEFAULT_BOUND: usize = 10;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The largest step for which a counterexample is searched.
    pub bound: usize,

    /// Grow a single engine through activation literals, rather than solving each bound afresh.
    pub incremental: bool,

    /// Keep atoms unaffected by every enabled rule at their previous value.
    pub inertia: bool,

    /// The time limit for a run.
    pub time_limit: Option<Duration>,

    /// Configuration of the default engine.
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bound: DEFAULT_BOUND,
            incremental: true,
            inertia: true,
            time_limit: None,
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// The options relevant to building a specification.
    pub fn spec_options(&self) -> Options {
        Options {
            incremental: self.incremental,
            inertia: self.inertia,
        }
    }
}

/// Configuration of the default [engine](crate::engine::Context).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// The probability of assigning positive polarity to an atom when freely choosing an atom.
    pub polarity_lean: ConfigOption<f64>,

    /// The probability of choosing an atom at random, rather than by activity.
    pub random_decision_bias: ConfigOption<f64>,

    /// The `u` value to multiply the luby sequence by when determining whether to perform a restart.
    pub luby_u: ConfigOption<u32>,

    /// The factor by which activity decays after each conflict.
    pub activity_decay: ConfigOption<f64>,

    /// Default to the last set value of an atom when choosing a value for the atom.
    pub phase_saving: bool,

    /// Seed for the source of randomness.
    pub seed: u64,
}

impl Default for EngineConfig {
    /// The default engine is configured to provide quick, deterministic, results.
    fn default() -> Self {
        EngineConfig {
            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            luby_u: ConfigOption {
                name: "luby",
                min: 1,
                max: u32::MAX,
                value: 128,
            },

            activity_decay: ConfigOption {
                name: "activity_decay",
                min: 0.5,
                max: 1.0,
                value: 0.95,
            },

            phase_saving: true,

            seed: 0,
        }
    }
}
