/*!
The context of the default engine, to which clauses are added and within which solves take place.

The context is an incremental conflict-driven clause-learning solver:
- Clauses are added between solves, and are never removed.
- Assumptions are made for a single solve, each as a decision on its own level.
- Clauses learnt during a solve are consequences of the added clauses alone, and so are kept for later solves.

For the procedures of a solve, see [procedures](crate::engine::procedures).

# Example

```rust
# use otter_bmc::config::EngineConfig;
# use otter_bmc::engine::{Context, Engine, Status, Stop};
let mut context = Context::from_config(EngineConfig::default());

assert!(context.add_clause(&[1, 2]).is_ok());
assert!(context.add_clause(&[-1]).is_ok());

let stop = Stop::default();
assert_eq!(context.solve(&stop), Ok(Status::Satisfiable.code()));
assert_eq!(context.value_of(1), Some(false));
assert_eq!(context.value_of(2), Some(true));

assert!(context.assume(-2).is_ok());
assert_eq!(context.solve(&stop), Ok(Status::Unsatisfiable.code()));
assert!(context.failed(-2));
```
*/

use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::EngineConfig,
    engine::{
        literal::{CLiteral, EngineAtom},
        luby::Luby,
    },
    misc::log::targets::{self},
    types::err::{self},
};

/// The index of a clause in the clause store of a context.
pub type ClauseKey = usize;

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The context allows input.
    Input,

    /// A satisfying valuation was found by the last solve.
    Satisfiable,

    /// The last solve found the clauses unsatisfiable, given the assumptions made.
    Unsatisfiable,

    /// The last solve was stopped before a result was found.
    Unknown,

    /// The context has been released, and may not be used.
    Released,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Unknown => write!(f, "Unknown"),
            Self::Released => write!(f, "Released"),
        }
    }
}

/// Counts for various things which count, roughly.
pub struct Counters {
    /// A count of every conflict seen.
    pub total_conflicts: usize,

    /// A count of conflicts seen since the last restart.
    ///
    /// As u32 rather than a usize for easier interaction with the luby sequence.
    pub fresh_conflicts: u32,

    /// A count of all decisions made.
    pub total_decisions: usize,

    /// A count of solves.
    pub solves: usize,

    /// The number of restarts.
    pub restarts: usize,

    /// The time taken during the last solve.
    pub time: Duration,

    /// The current element in the luby sequence.
    pub luby: Luby,
}

impl Default for Counters {
    fn default() -> Self {
        Counters {
            total_conflicts: 0,
            fresh_conflicts: 0,
            total_decisions: 0,
            solves: 0,
            restarts: 0,
            time: Duration::from_secs(0),
            luby: Luby::default(),
        }
    }
}

/// A clause of the context.
pub struct StoredClause {
    /// The literals of the clause, with the watched literals at indicies 0 and 1.
    pub literals: Vec<CLiteral>,

    /// Whether the clause was learnt through analysis.
    pub learnt: bool,
}

/// The context of the default engine.
pub struct Context {
    pub config: EngineConfig,

    pub state: ContextState,

    pub counters: Counters,

    /// Clauses of at least two literals.
    pub(super) clauses: Vec<StoredClause>,

    /// For each literal, keys to the clauses watching the literal.
    pub(super) watches: Vec<Vec<ClauseKey>>,

    /// Unit clauses, added or learnt.
    pub(super) units: Vec<CLiteral>,

    /// Whether the empty clause has been added or derived.
    pub(super) inconsistent: bool,

    /// The value of each atom, indexed by atom.
    pub(super) values: Vec<Option<bool>>,

    /// The decision level at which each atom was valued.
    pub(super) levels: Vec<usize>,

    /// The clause which forced the value of each atom, if any.
    pub(super) reasons: Vec<Option<ClauseKey>>,

    /// The last value of each atom.
    pub(super) phases: Vec<bool>,

    pub(super) activity: Vec<f64>,

    pub(super) activity_increment: f64,

    /// Valued literals, in order of valuation.
    pub(super) trail: Vec<CLiteral>,

    /// The length of the trail at the start of each decision level.
    pub(super) trail_limits: Vec<usize>,

    /// The index of the next literal on the trail to propagate.
    pub(super) q_head: usize,

    pub(super) assumptions: Vec<CLiteral>,

    /// The assumptions used to derive unsatisfiability in the last solve.
    pub(super) failed: Vec<CLiteral>,

    /// The valuation found by the last satisfiable solve.
    pub(super) model: Vec<Option<bool>>,

    /// Scratch marks used during analysis.
    pub(super) seen: Vec<bool>,

    pub(super) rng: StdRng,
}

impl Context {
    /// A context from some config, with an empty formula.
    pub fn from_config(config: EngineConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let mut context = Context {
            config,
            state: ContextState::Input,
            counters: Counters::default(),
            clauses: Vec::default(),
            watches: Vec::default(),
            units: Vec::default(),
            inconsistent: false,
            values: Vec::default(),
            levels: Vec::default(),
            reasons: Vec::default(),
            phases: Vec::default(),
            activity: Vec::default(),
            activity_increment: 1.0,
            trail: Vec::default(),
            trail_limits: Vec::default(),
            q_head: 0,
            assumptions: Vec::default(),
            failed: Vec::default(),
            model: Vec::default(),
            seen: Vec::default(),
            rng,
        };
        // Atom 0 is never used, though is allocated to keep indexing direct.
        context.ensure_atom(0);
        context
    }

    /// The count of stored clauses, not counting units.
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Ensures the given atom, and all lesser atoms, are part of the context.
    pub(super) fn ensure_atom(&mut self, atom: EngineAtom) {
        let required = atom as usize + 1;
        while self.values.len() < required {
            let phase = self.rng.gen_bool(self.config.polarity_lean.value);
            self.values.push(None);
            self.levels.push(0);
            self.reasons.push(None);
            self.phases.push(phase);
            self.activity.push(0.0);
            self.seen.push(false);
            self.watches.push(Vec::default());
            self.watches.push(Vec::default());
        }
    }

    /// The value of a literal on the current valuation.
    pub(super) fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        literal_value(&self.values, literal)
    }

    pub(super) fn decision_level(&self) -> usize {
        self.trail_limits.len()
    }

    pub(super) fn push_level(&mut self) {
        self.trail_limits.push(self.trail.len());
    }

    /// Values the atom of a literal to match the literal, at the current level.
    pub(super) fn assign(&mut self, literal: CLiteral, reason: Option<ClauseKey>) {
        let atom = literal.atom() as usize;
        self.values[atom] = Some(literal.polarity());
        self.levels[atom] = self.decision_level();
        self.reasons[atom] = reason;
        self.trail.push(literal);
    }

    /// Removes every value, including those at level 0.
    pub(super) fn clear_valuation(&mut self) {
        self.backjump(0);
        for literal in self.trail.drain(..) {
            let atom = literal.atom() as usize;
            self.values[atom] = None;
            self.reasons[atom] = None;
        }
        self.q_head = 0;
    }

    /// Stores a clause of at least two literals, watching the first two.
    pub(super) fn store_clause(&mut self, literals: Vec<CLiteral>, learnt: bool) -> ClauseKey {
        let key = self.clauses.len();
        self.watches[literals[0].index()].push(key);
        self.watches[literals[1].index()].push(key);
        log::trace!(target: targets::ENGINE, "Stored {key}: {literals:?}");
        self.clauses.push(StoredClause { literals, learnt });
        key
    }

    /// Adds a clause to the context, removing any existing valuation.
    pub(super) fn add_literals(&mut self, literals: Vec<CLiteral>) {
        if !self.trail.is_empty() {
            self.clear_valuation();
        }
        self.state = ContextState::Input;

        let mut clause: Vec<CLiteral> = Vec::with_capacity(literals.len());
        for literal in literals {
            self.ensure_atom(literal.atom());
            if clause.contains(&literal.negate()) {
                log::trace!(target: targets::ENGINE, "Skipped tautology");
                return;
            }
            if !clause.contains(&literal) {
                clause.push(literal);
            }
        }

        match clause.len() {
            0 => {
                log::debug!(target: targets::ENGINE, "Empty clause added");
                self.inconsistent = true;
            }
            1 => self.units.push(clause[0]),
            _ => {
                self.store_clause(clause, false);
            }
        }
    }

    pub(super) fn bump_activity(&mut self, atom: EngineAtom) {
        let activity = &mut self.activity[atom as usize];
        *activity += self.activity_increment;
        if *activity > 1e100 {
            for activity in &mut self.activity {
                *activity *= 1e-100;
            }
            self.activity_increment *= 1e-100;
        }
    }

    pub(super) fn decay_activity(&mut self) {
        self.activity_increment /= self.config.activity_decay.value;
    }

    /// The value of an atom on the valuation found by the last satisfiable solve.
    pub fn model_value(&self, atom: EngineAtom) -> Option<bool> {
        match self.state {
            ContextState::Satisfiable => self.model.get(atom as usize).copied().flatten(),
            _ => None,
        }
    }

    pub(super) fn check_released(&self) -> Result<(), err::EngineError> {
        match self.state {
            ContextState::Released => Err(err::EngineError::Released),
            _ => Ok(()),
        }
    }
}

/// The value of a literal on a valuation.
pub(super) fn literal_value(values: &[Option<bool>], literal: CLiteral) -> Option<bool> {
    values[literal.atom() as usize].map(|value| value == literal.polarity())
}
