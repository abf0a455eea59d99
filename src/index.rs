/*!
The variable index, a map between (atom, value, timestep) triples and the variables of a CNF.

Variables are allocated in a single pass over the timesteps 0..=*K*.
At each timestep the activation variable is allocated first, if the specification is incremental, followed by one variable for each boolean atom and one variable for each value of each enumerated atom, in declaration order.
So, identical specifications and bounds always give identical variables, and variables are dense over 1..=[nvars](Indexer::nvars).

```rust
# use otter_bmc::index::{Indexer, VarKey};
# use otter_bmc::specification::{Options, Source, Specification};
let source = Source::default()
    .boolean("lamp")
    .enumerated("floor", ["0", "1"]);
let spec = Specification::build(&source, Options::default()).unwrap();

let index = Indexer::build(&spec, 1);
assert_eq!(index.nvars(), 8);
assert_eq!(index.activation_map(), vec![1, 5]);

let floor_one_at_one = VarKey::State { atom: 1, value: Some(1), step: 1 };
assert_eq!(index.lookup(floor_one_at_one), Ok(8));
assert_eq!(index.decode(8), Ok(floor_one_at_one));

assert!(index.lookup(VarKey::State { atom: 0, value: None, step: 2 }).is_err());
```

Lookup of a key which was never allocated is an [error](err::IndexError::Unallocated), and is never defaulted.
*/

use std::collections::HashMap;

use crate::{
    misc::log::targets::{self},
    specification::Specification,
    structures::{
        atom::{AtomId, ValueId},
        clause::{IntLiteral, Var},
    },
    types::err::{self},
};

/// What a variable stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarKey {
    /// An atom has a value at a timestep.
    /// For a boolean atom the value is absent, and the variable is true exactly when the atom is.
    State {
        atom: AtomId,
        value: Option<ValueId>,
        step: usize,
    },

    /// The activation variable of a timestep.
    Activation { step: usize },
}

impl VarKey {
    pub fn step(&self) -> usize {
        match self {
            Self::State { step, .. } | Self::Activation { step } => *step,
        }
    }
}

/// The variable index of a specification, up to some bound.
#[derive(Clone, Debug)]
pub struct Indexer {
    /// The key of each variable, with the key of variable `v` at index `v - 1`.
    keys: Vec<VarKey>,

    ids: HashMap<VarKey, Var>,

    bound: usize,

    incremental: bool,
}

impl Indexer {
    /// Allocates variables for every timestep up to and including the bound.
    pub fn build(spec: &Specification, bound: usize) -> Self {
        let incremental = spec.activation().is_some();
        let symbols = spec.symbols();

        let width: usize = symbols.iter().map(|(_, atom)| atom.width()).sum();
        let per_step = width + incremental as usize;

        let mut index = Indexer {
            keys: Vec::with_capacity(per_step * (bound + 1)),
            ids: HashMap::with_capacity(per_step * (bound + 1)),
            bound,
            incremental,
        };

        for step in 0..=bound {
            if incremental {
                index.allocate(VarKey::Activation { step });
            }

            for (atom_id, atom) in symbols.iter() {
                match atom.is_boolean() {
                    true => index.allocate(VarKey::State {
                        atom: atom_id,
                        value: None,
                        step,
                    }),

                    false => {
                        for (value, _) in atom.values() {
                            index.allocate(VarKey::State {
                                atom: atom_id,
                                value: Some(value),
                                step,
                            });
                        }
                    }
                }
            }
        }

        log::info!(target: targets::INDEX, "{} variables over {} timesteps", index.nvars(), bound + 1);
        index
    }

    fn allocate(&mut self, key: VarKey) {
        self.keys.push(key);
        self.ids.insert(key, self.keys.len() as Var);
    }

    /// The variable of a key.
    pub fn lookup(&self, key: VarKey) -> Result<Var, err::IndexError> {
        match self.ids.get(&key) {
            Some(var) => Ok(*var),
            None => Err(err::IndexError::Unallocated(key)),
        }
    }

    /// The variable of an atom with an optional value at a timestep.
    pub fn state(
        &self,
        atom: AtomId,
        value: Option<ValueId>,
        step: usize,
    ) -> Result<Var, err::IndexError> {
        self.lookup(VarKey::State { atom, value, step })
    }

    /// The activation variable of a timestep.
    pub fn activation(&self, step: usize) -> Result<Var, err::IndexError> {
        self.lookup(VarKey::Activation { step })
    }

    /// The activation variables of each timestep, in order.
    /// Empty if the index is not incremental.
    pub fn activation_map(&self) -> Vec<Var> {
        (0..=self.bound)
            .filter_map(|step| self.ids.get(&VarKey::Activation { step }).copied())
            .collect()
    }

    /// The key of a variable.
    pub fn decode(&self, var: Var) -> Result<VarKey, err::IndexError> {
        match (var as usize).checked_sub(1).and_then(|i| self.keys.get(i)) {
            Some(key) => Ok(*key),
            None => Err(err::IndexError::UnknownVariable(var as IntLiteral)),
        }
    }

    /// The count of variables, which is also the largest variable.
    pub fn nvars(&self) -> usize {
        self.keys.len()
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    pub fn incremental(&self) -> bool {
        self.incremental
    }

    /// Variables paired with their keys, in order of allocation.
    pub fn iter(&self) -> impl Iterator<Item = (Var, &VarKey)> {
        self.keys
            .iter()
            .enumerate()
            .map(|(index, key)| (index as Var + 1, key))
    }
}
