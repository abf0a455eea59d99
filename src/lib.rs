//! A library for bounded model checking of finite-state transition systems through incremental satisfiability solving.
//!
//! otter_bmc checks that invariant safety properties hold on every execution of a transition system of length at most some bound *K*.
//! The check is made by encoding bounded executions as formulas in conjunctive normal form and asking an incremental sat engine for a counterexample of each length 0, 1, …, *K* in turn.
//!
//! # Orientation
//!
//! Data flows one way, through a handful of immutable structures and the transforms between them:
//!
//! - A [Source](specification::Source) describes a system as text: declared atoms, an initial constraint, transition rules, and safety properties.
//!   Sources are usually read from [JSON](crate::input).
//! - A [Specification](specification::Specification) is a source resolved against a [symbol table](structures::symbols), with every formula normalized to [CNF](structures::cnf).
//! - An [Indexer](index::Indexer) allocates a dense integer variable to each (atom, value, timestep) triple, and to each per-timestep activation atom.
//! - A [ClauseBuilder](clauses::ClauseBuilder) translates the typed clauses of a specification to signed-integer clauses at a given timestep.
//! - An [Encoding](encoding::Encoding) groups those clauses by the step at which they are first required, and writes the DIMACS and activation map artifacts.
//! - A [Driver](driver::Driver) walks the bounds, feeding an [Engine](engine::Engine) new clauses and assumptions, and decodes any satisfying valuation into a [counterexample](driver::Counterexample).
//!
//! The default engine is the conflict-driven clause-learning [Context](engine::Context), though any structure with the IPASIR shaped methods of the [Engine](engine::Engine) trait may be used.
//!
//! # Example
//!
//! ```rust
//! # use otter_bmc::config::Config;
//! # use otter_bmc::driver::{Driver, Outcome};
//! # use otter_bmc::engine::Context;
//! # use otter_bmc::specification::{Source, Specification};
//! let source = Source::default()
//!     .boolean("lamp")
//!     .init("lamp=false")
//!     .rule("on", ["~lamp"], ["lamp"])
//!     .rule("off", ["lamp"], ["~lamp"])
//!     .safety("~lamp");
//!
//! let config = Config::default();
//! let spec = Specification::build(&source, config.spec_options()).unwrap();
//!
//! let driver = Driver::new(&spec, 3);
//! let report = driver
//!     .run(|| Ok(Context::from_config(config.engine.clone())), |_| {})
//!     .unwrap();
//!
//! match report.outcome {
//!     Outcome::Counterexample(trace) => assert_eq!(trace.step, 1),
//!     _ => panic!("lamp is lit after one toggle"),
//! }
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout, on the targets listed in [misc::log].
//! No logger is installed by the library, though the cli installs [env_logger](https://docs.rs/env_logger/latest/env_logger/) when built with the `log` feature.
//! For example, `RUST_LOG=driver=info` shows the result of each step, and `RUST_LOG=engine=debug` the work of the engine.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod types;

pub mod misc;
pub mod structures;

pub mod parse;
pub mod specification;

pub mod input;

pub mod clauses;
pub mod encoding;
pub mod index;

pub mod driver;
pub mod engine;
