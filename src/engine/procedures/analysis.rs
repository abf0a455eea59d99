/*!
Analysis of an unsatisfiable clause.

# Conflict analysis

Takes a key to a clause which is unsatisfiable on the current valuation and returns an asserting clause, together with the level to backjump to.

The clause is resolved with the reasons of literals valued at the current level, from the most recent, until a single literal of the current level remains: the first unique implication point.
The asserting clause is the negation of that literal, with the remaining literals of lower levels.
Literals valued at level 0 are consequences of the formula alone, and are dropped.

The asserting literal is at index 0 of the returned clause, and if there is more than one literal, a literal of the backjump level is at index 1, so the clause may be watched on those two.

# Final analysis

When an assumption is false on the valuation built from the assumptions before it, the assumptions used to derive the negation of the assumption are recorded, and are the [failed](crate::engine::Engine::failed) assumptions of the solve.
*/

use crate::{
    engine::{context::Context, literal::CLiteral},
    misc::log::targets::{self},
    types::err::{self},
};

impl Context {
    /// For documentation see [procedures::analysis](crate::engine::procedures::analysis).
    pub fn conflict_analysis(
        &mut self,
        conflict: usize,
    ) -> Result<(Vec<CLiteral>, usize), err::AnalysisError> {
        let level = self.decision_level();
        log::debug!(target: targets::ANALYSIS, "Analysis of {conflict} at level {level}");

        // Index 0 is replaced by the asserting literal.
        let mut clause: Vec<CLiteral> = vec![CLiteral::new(0, false)];
        let mut path_count = 0;
        let mut resolved: Option<CLiteral> = None;
        let mut trail_index = self.trail.len();
        let mut key = conflict;

        loop {
            let literals = self.clauses[key].literals.clone();
            for literal in literals {
                let atom = literal.atom();
                if resolved.is_some_and(|resolved| resolved.atom() == atom) {
                    continue;
                }
                if self.seen[atom as usize] || self.levels[atom as usize] == 0 {
                    continue;
                }

                self.seen[atom as usize] = true;
                self.bump_activity(atom);

                match self.levels[atom as usize] == level {
                    true => path_count += 1,
                    false => clause.push(literal),
                }
            }

            if path_count == 0 {
                return Err(err::AnalysisError::NoAssertion);
            }

            let next = loop {
                let Some(index) = trail_index.checked_sub(1) else {
                    return Err(err::AnalysisError::NoAssertion);
                };
                trail_index = index;
                let candidate = self.trail[index];
                if self.seen[candidate.atom() as usize] {
                    break candidate;
                }
            };

            self.seen[next.atom() as usize] = false;
            path_count -= 1;

            if path_count == 0 {
                clause[0] = next.negate();
                break;
            }

            let Some(reason) = self.reasons[next.atom() as usize] else {
                return Err(err::AnalysisError::MissingReason);
            };
            key = reason;
            resolved = Some(next);
        }

        for literal in &clause[1..] {
            self.seen[literal.atom() as usize] = false;
        }

        let backjump_level = match clause.len() {
            1 => 0,
            _ => {
                let mut highest = 1;
                for index in 2..clause.len() {
                    if self.levels[clause[index].atom() as usize]
                        > self.levels[clause[highest].atom() as usize]
                    {
                        highest = index;
                    }
                }
                clause.swap(1, highest);
                self.levels[clause[1].atom() as usize]
            }
        };

        log::debug!(target: targets::ANALYSIS, "Asserting clause {clause:?}, backjump to {backjump_level}");
        Ok((clause, backjump_level))
    }

    /// Records the assumptions used to derive the negation of the given assumption.
    pub fn final_analysis(&mut self, assumption: CLiteral) {
        self.failed.clear();
        self.failed.push(assumption);

        let Some(start) = self.trail_limits.first().copied() else {
            return;
        };

        self.seen[assumption.atom() as usize] = true;

        for index in (start..self.trail.len()).rev() {
            let literal = self.trail[index];
            let atom = literal.atom() as usize;
            if !self.seen[atom] {
                continue;
            }

            match self.reasons[atom] {
                None => {
                    if self.levels[atom] > 0 {
                        self.failed.push(literal);
                    }
                }

                Some(key) => {
                    for other in &self.clauses[key].literals {
                        let other_atom = other.atom() as usize;
                        if other_atom != atom && self.levels[other_atom] > 0 {
                            self.seen[other_atom] = true;
                        }
                    }
                }
            }

            self.seen[atom] = false;
        }

        self.seen[assumption.atom() as usize] = false;
        log::debug!(target: targets::ANALYSIS, "Failed assumptions: {:?}", self.failed);
    }
}
