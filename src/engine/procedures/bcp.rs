/*!
Boolean constraint propagation.

Propagates each literal on the trail which has not yet been propagated.

This is done by examining the clauses watching the negation of the literal, as each such clause has lost a watch.
For each clause, either:
- The other watched literal is true, and nothing is done.
- Some unwatched literal is not false, and the watch is moved to that literal.
- Every unwatched literal is false, and so the other watched literal is either a consequence of the clause, or the clause conflicts with the current valuation.

# Complications

The watch list under inspection is taken from the context for the duration of the inspection, to allow other watch lists to be updated.
This is safe, as a watch is never moved to the literal whose list is inspected: the literal is false, and a watch is only moved to a literal which is not false.
*/

use crate::{
    engine::context::{literal_value, ClauseKey, Context},
    misc::log::targets::{self},
};

impl Context {
    /// Propagates the trail, returning the key of a conflicting clause if a conflict is found.
    pub fn bcp(&mut self) -> Option<ClauseKey> {
        while let Some(literal) = self.trail.get(self.q_head).copied() {
            self.q_head += 1;

            let false_literal = literal.negate();
            let mut watchers = std::mem::take(&mut self.watches[false_literal.index()]);
            let mut conflict = None;
            let mut index = 0;

            'watch_loop: while index < watchers.len() {
                let key = watchers[index];
                let clause = &mut self.clauses[key].literals;

                if clause[0] == false_literal {
                    clause.swap(0, 1);
                }
                let other = clause[0];

                if literal_value(&self.values, other) == Some(true) {
                    index += 1;
                    continue 'watch_loop;
                }

                for position in 2..clause.len() {
                    if literal_value(&self.values, clause[position]) != Some(false) {
                        clause.swap(1, position);
                        self.watches[clause[1].index()].push(key);
                        watchers.swap_remove(index);
                        continue 'watch_loop;
                    }
                }

                match literal_value(&self.values, other) {
                    Some(false) => {
                        log::trace!(target: targets::PROPAGATION, "Conflict on {key} from {literal}");
                        conflict = Some(key);
                        break 'watch_loop;
                    }

                    _ => {
                        log::trace!(target: targets::PROPAGATION, "{other} from {key}");
                        self.assign(other, Some(key));
                        index += 1;
                    }
                }
            }

            self.watches[false_literal.index()] = watchers;

            if conflict.is_some() {
                self.q_head = self.trail.len();
                return conflict;
            }
        }

        None
    }
}
