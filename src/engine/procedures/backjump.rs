//! Recovery from a conflict.
//!
//! A backjump is a 'jump' from some (higher) decision level to some previous (lower) decision level.
//!
//! Typically, a backjump is made from level *l* to level *l - i* because a conflict was found at level *l* and analysis produced a clause which asserts some literal at level *l - i*.
//! In this case, all decisions and all consequences of those decisions from level *l* down to level *l - i* are undone.
//!
//! Passing a target level greater than or equal to the current level is safe, as nothing happens.
//!
//! If phase saving is enabled the value of each atom is noted as it is undone, for use in later decisions.

use crate::engine::context::Context;

impl Context {
    /// Backjumps to the given target level.
    pub fn backjump(&mut self, target: usize) {
        if self.decision_level() <= target {
            return;
        }

        let start = self.trail_limits[target];
        let phase_saving = self.config.phase_saving;

        for literal in self.trail.drain(start..) {
            let atom = literal.atom() as usize;
            if phase_saving {
                self.phases[atom] = literal.polarity();
            }
            self.values[atom] = None;
            self.reasons[atom] = None;
        }

        self.trail_limits.truncate(target);
        self.q_head = self.trail.len();
    }
}
