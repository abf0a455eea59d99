/*!
Methods for choosing the value of an atom.

# Overview

The core decision procedure is straightforward:
- Search through all atoms in the context for an atom which is not assigned a value, and assign either true or false.

Strictly a decision is to value some atom *a* with value *v*.
Still, it is convenient to represent such a decision as a literal with atom *a* and polarity *v*.

# Heuristics

- Atoms are chosen by activity, which is bumped for each atom seen during [analysis](crate::engine::procedures::analysis) and decays after each conflict.
  Though, with probability [random_decision_bias](crate::config::EngineConfig::random_decision_bias) an atom is chosen at random.
- With phase saving an atom takes the value it last held, and otherwise a value is chosen with probability [polarity_lean](crate::config::EngineConfig::polarity_lean) of being true.
*/

use rand::{seq::IteratorRandom, Rng};

use crate::engine::{
    context::Context,
    literal::{CLiteral, EngineAtom},
};

impl Context {
    /// A decision, or none if every atom has a value.
    pub fn make_decision(&mut self) -> Option<CLiteral> {
        let atom = self.atom_without_value()?;
        self.counters.total_decisions += 1;

        let polarity = match self.config.phase_saving {
            true => self.phases[atom as usize],
            false => self.rng.gen_bool(self.config.polarity_lean.value),
        };
        Some(CLiteral::new(atom, polarity))
    }

    /// An atom without a value, either chosen at random or with the highest activity.
    fn atom_without_value(&mut self) -> Option<EngineAtom> {
        let values = &self.values;
        let unvalued = (1..values.len()).filter(|atom| values[*atom].is_none());

        match self.rng.gen_bool(self.config.random_decision_bias.value) {
            true => unvalued.choose(&mut self.rng).map(|atom| atom as EngineAtom),

            false => {
                let mut chosen: Option<usize> = None;
                for atom in unvalued {
                    match chosen {
                        Some(best) if self.activity[best] >= self.activity[atom] => {}
                        _ => chosen = Some(atom),
                    }
                }
                chosen.map(|atom| atom as EngineAtom)
            }
        }
    }
}
