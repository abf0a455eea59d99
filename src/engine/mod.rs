/*!
Engines, and the capability required of an engine by the [driver](crate::driver).

An [Engine] is anything with the methods of the reentrant incremental sat solver API, IPASIR:
- [add_clause](Engine::add_clause), to add a clause of integer literals.
- [assume](Engine::assume), to add an assumption for the next solve.
- [solve](Engine::solve), returning an IPASIR status code: 10 for satisfiable, 20 for unsatisfiable, and 0 for unknown.
- [value_of](Engine::value_of), the value of a literal after a satisfiable solve.
- [failed](Engine::failed), whether an assumption was used to derive unsatisfiability.
- [release](Engine::release), to release the resources of the engine.

Information about the API may be found at <https://github.com/biotomas/ipasir>.

An engine is held within a [Session], which releases the engine when dropped, and so on every exit path of whatever owns the session.

The default engine is the conflict-driven clause-learning [Context].

# Stopping

Every solve is given a [Stop], a shared flag paired with an optional deadline.
A solve which observes a stop returns unknown.

```rust
# use otter_bmc::config::EngineConfig;
# use otter_bmc::engine::{Context, Engine, Session, Status, Stop};
let stop = Stop::default();
let mut session = Session::acquire(|| Ok(Context::from_config(EngineConfig::default()))).unwrap();

session.add_clause(&[1, 2]).unwrap();

stop.request();
assert_eq!(session.solve(&stop), Ok(Status::Unknown.code()));
```
*/

pub mod context;
pub use context::Context;
mod ipasir;
pub use ipasir::IPASIR_SIGNATURE;
pub mod literal;
pub mod luby;
pub mod procedures;

use std::{
    ops::{Deref, DerefMut},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use crate::{
    misc::log::targets::{self},
    structures::clause::IntLiteral,
    types::err::{self},
};

/// The result of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Satisfiable,
    Unsatisfiable,
    /// The solve was stopped before a result was found.
    Unknown,
}

impl Status {
    /// The IPASIR code of the status.
    pub fn code(&self) -> i32 {
        match self {
            Self::Satisfiable => 10,
            Self::Unsatisfiable => 20,
            Self::Unknown => 0,
        }
    }

    /// The status of an IPASIR code.
    pub fn from_code(code: i32) -> Result<Self, err::EngineError> {
        match code {
            10 => Ok(Self::Satisfiable),
            20 => Ok(Self::Unsatisfiable),
            0 => Ok(Self::Unknown),
            _ => Err(err::EngineError::UnexpectedStatus(code)),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A signal to stop, either on request or once a deadline has passed.
///
/// Clones share the flag, so a stop may be requested from any thread holding a clone.
#[derive(Clone, Debug, Default)]
pub struct Stop {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Stop {
    /// A stop with a deadline the given duration from now.
    pub fn with_time_limit(limit: Duration) -> Self {
        Stop {
            flag: Arc::default(),
            deadline: Instant::now().checked_add(limit),
        }
    }

    /// A stop sharing the given flag.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Stop {
            flag,
            deadline: None,
        }
    }

    pub fn request(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether a stop has been requested, or the deadline has passed.
    pub fn requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// The capability required of an engine, in the shape of IPASIR.
pub trait Engine {
    /// The name and version of the engine.
    fn signature(&self) -> &'static str;

    /// Adds a clause.
    /// The empty clause is permitted, and makes the formula unsatisfiable.
    fn add_clause(&mut self, clause: &[IntLiteral]) -> Result<(), err::EngineError>;

    /// Adds an assumption for the next solve.
    fn assume(&mut self, literal: IntLiteral) -> Result<(), err::EngineError>;

    /// Solves the clauses under the assumptions made since the last solve, returning an IPASIR status code.
    fn solve(&mut self, stop: &Stop) -> Result<i32, err::EngineError>;

    /// The value of a literal, if the last solve was satisfiable and the variable of the literal is known.
    fn value_of(&self, literal: IntLiteral) -> Option<bool>;

    /// Whether the given assumption was used to derive unsatisfiability in the last solve.
    fn failed(&self, literal: IntLiteral) -> bool;

    /// Releases the resources of the engine.
    /// An engine is not used after release.
    fn release(&mut self);
}

/// An engine, released when the session is dropped.
pub struct Session<E: Engine> {
    engine: E,
}

impl<E: Engine> Session<E> {
    /// Acquires an engine from a factory.
    pub fn acquire(factory: impl FnOnce() -> Result<E, err::EngineError>) -> Result<Self, err::EngineError> {
        let engine = factory()?;
        log::debug!(target: targets::ENGINE, "Acquired {}", engine.signature());
        Ok(Session { engine })
    }
}

impl<E: Engine> Deref for Session<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.engine
    }
}

impl<E: Engine> DerefMut for Session<E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.engine
    }
}

impl<E: Engine> Drop for Session<E> {
    fn drop(&mut self) {
        log::debug!(target: targets::ENGINE, "Released {}", self.engine.signature());
        self.engine.release();
    }
}
