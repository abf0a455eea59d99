//! Counterexamples, decoded from the valuation of an engine.

use crate::{
    engine::Engine,
    index::Indexer,
    specification::Specification,
    structures::clause::int_literal,
    types::err::{self},
};

/// The value of an atom in some state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub atom: String,

    /// `true` or `false` for a boolean atom, and the value of an enumerated atom.
    /// Absent if no value of an enumerated atom was true, which the domain clauses prevent.
    pub value: Option<String>,
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={value}", self.atom),
            None => write!(f, "{}=?", self.atom),
        }
    }
}

/// The state at some timestep of a counterexample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub step: usize,

    /// The value of the activation atom of the step, in incremental mode.
    pub activation: Option<bool>,

    /// The value of each atom, in declaration order.
    pub assignments: Vec<Assignment>,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step {}:", self.step)?;
        for assignment in &self.assignments {
            write!(f, " {assignment}")?;
        }
        if let Some(activation) = self.activation {
            write!(f, " (activation={activation})")?;
        }
        Ok(())
    }
}

/// An execution of the system which violates some property at its final state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterexample {
    /// The step at which a property is violated.
    pub step: usize,

    /// The states of the execution, from the initial state to the violating state.
    pub states: Vec<State>,
}

impl Counterexample {
    /// Decodes the states of timesteps 0 to `step`, inclusive, from an engine after a satisfiable solve.
    ///
    /// A boolean atom with no value from the engine is read as false.
    pub fn decode<E: Engine>(
        engine: &E,
        spec: &Specification,
        index: &Indexer,
        step: usize,
    ) -> Result<Self, err::IndexError> {
        let mut states = Vec::with_capacity(step + 1);

        for t in 0..=step {
            let activation = match index.incremental() {
                true => {
                    let var = index.activation(t)?;
                    Some(engine.value_of(int_literal(var, true)).unwrap_or(false))
                }
                false => None,
            };

            let mut assignments = Vec::with_capacity(spec.symbols().len());
            for (id, atom) in spec.symbols().iter() {
                let value = match atom.is_boolean() {
                    true => {
                        let var = index.state(id, None, t)?;
                        let value = engine.value_of(int_literal(var, true)).unwrap_or(false);
                        Some(value.to_string())
                    }

                    false => {
                        let mut found = None;
                        for (value, name) in atom.values() {
                            let var = index.state(id, Some(value), t)?;
                            if engine.value_of(int_literal(var, true)) == Some(true) {
                                found = Some(name.to_string());
                                break;
                            }
                        }
                        found
                    }
                };

                assignments.push(Assignment {
                    atom: atom.symbol().to_string(),
                    value,
                });
            }

            states.push(State {
                step: t,
                activation,
                assignments,
            });
        }

        Ok(Counterexample { step, states })
    }

    /// The value of an atom at a step, if the step is part of the counterexample.
    pub fn value_of(&self, step: usize, atom: &str) -> Option<&str> {
        self.states
            .get(step)?
            .assignments
            .iter()
            .find(|assignment| assignment.atom == atom)?
            .value
            .as_deref()
    }
}

impl std::fmt::Display for Counterexample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, state) in self.states.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{state}")?;
        }
        Ok(())
    }
}
