//! Determines the satisfiability of the clauses of a context, given the assumptions made.
//!
//! # Overview
//!
//! A solve begins from an empty valuation, to which each unit clause is added, and then loops:
//!
//! ```none
//!             +-----------+
//!   +---------| decide    |<----------------------+
//!   |         +-----------+                       |
//!   |                                             | if there is no conflict
//!   ⌄         +-----------+                       |
//! --+-------->|    bcp    |-----------------------+
//!   ⌃         +-----------+
//!   |               |
//!   |               | if there is a conflict
//!   |               ⌄
//!   |         +-----------+       +----------+
//!   +---------| analysis  |------>| backjump |
//!             +-----------+       +----------+
//! ```
//!
//! While some assumption is not yet a decision, the next decision is the next assumption.
//!
//! - If the assumption is already true, an empty level is made, so the level of each assumption matches its position.
//! - If the assumption is already false, the solve is unsatisfiable, and [final analysis](crate::engine::procedures::analysis) notes the assumptions used.
//!
//! Otherwise, the solve is satisfiable once every atom has a value, and unsatisfiable if a conflict is found at level 0.
//!
//! Restarts are scheduled by the [luby sequence](crate::engine::luby), with a restart after [luby_u](crate::config::EngineConfig::luby_u) times the current element of the sequence conflicts.
//! A restart keeps all clauses learnt, and assumptions are made again as decisions.
//!
//! The stop signal is checked on each pass through the loop, and if a stop has been requested the solve returns [Unknown](Status::Unknown).

use std::time::Instant;

use crate::{
    engine::{
        context::{Context, ContextState},
        Status, Stop,
    },
    misc::log::targets::{self},
    types::err::{self},
};

impl Context {
    /// Solves the clauses of the context with the assumptions made since the last solve.
    ///
    /// Assumptions are cleared once the solve completes, whatever the result.
    pub fn solve_given(&mut self, stop: &Stop) -> Result<Status, err::EngineError> {
        self.check_released()?;

        let start = Instant::now();
        self.counters.solves += 1;

        let result = self.search(stop);

        self.assumptions.clear();
        self.counters.time = start.elapsed();

        match &result {
            Ok(status) => {
                log::info!(target: targets::ENGINE, "Solve {} is {status:?} after {:?}", self.counters.solves, self.counters.time)
            }
            Err(e) => log::error!(target: targets::ENGINE, "Solve {} failed: {e}", self.counters.solves),
        }

        result
    }

    fn search(&mut self, stop: &Stop) -> Result<Status, err::EngineError> {
        self.clear_valuation();
        self.failed.clear();
        self.model.clear();

        if self.inconsistent {
            self.state = ContextState::Unsatisfiable;
            return Ok(Status::Unsatisfiable);
        }

        for index in 0..self.units.len() {
            let unit = self.units[index];
            match self.literal_value(unit) {
                None => self.assign(unit, None),
                Some(true) => {}
                Some(false) => {
                    self.inconsistent = true;
                    self.state = ContextState::Unsatisfiable;
                    return Ok(Status::Unsatisfiable);
                }
            }
        }

        'solve_loop: loop {
            if stop.requested() {
                log::info!(target: targets::ENGINE, "Stop requested");
                self.backjump(0);
                self.state = ContextState::Unknown;
                return Ok(Status::Unknown);
            }

            if let Some(conflict) = self.bcp() {
                self.counters.total_conflicts += 1;
                self.counters.fresh_conflicts += 1;

                if self.decision_level() == 0 {
                    self.inconsistent = true;
                    self.state = ContextState::Unsatisfiable;
                    return Ok(Status::Unsatisfiable);
                }

                let (clause, level) = self.conflict_analysis(conflict)?;
                self.backjump(level);

                let asserted = clause[0];
                match clause.len() {
                    1 => {
                        self.units.push(asserted);
                        self.assign(asserted, None);
                    }
                    _ => {
                        let key = self.store_clause(clause, true);
                        self.assign(asserted, Some(key));
                    }
                }

                self.decay_activity();

                let limit = self
                    .config
                    .luby_u
                    .value
                    .saturating_mul(self.counters.luby.value());
                if self.counters.fresh_conflicts >= limit {
                    self.counters.luby.next();
                    self.counters.fresh_conflicts = 0;
                    self.counters.restarts += 1;
                    log::trace!(target: targets::ENGINE, "Restart {}", self.counters.restarts);
                    self.backjump(0);
                }

                continue 'solve_loop;
            }

            if let Some(assumption) = self.assumptions.get(self.decision_level()).copied() {
                match self.literal_value(assumption) {
                    Some(true) => self.push_level(),

                    Some(false) => {
                        self.final_analysis(assumption);
                        self.state = ContextState::Unsatisfiable;
                        return Ok(Status::Unsatisfiable);
                    }

                    None => {
                        self.push_level();
                        self.assign(assumption, None);
                    }
                }
                continue 'solve_loop;
            }

            match self.make_decision() {
                Some(decision) => {
                    log::trace!(target: targets::ENGINE, "Decision {decision}");
                    self.push_level();
                    self.assign(decision, None);
                }

                None => {
                    self.model = self.values.clone();
                    self.state = ContextState::Satisfiable;
                    return Ok(Status::Satisfiable);
                }
            }
        }
    }
}
