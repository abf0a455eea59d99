/*!
Atoms, aka. state variables.

An atom is a symbol paired with a domain of values.

- A boolean atom has the fixed domain {false, true}.
- An enumerated atom has an explicit, ordered, list of values.

```rust
# use otter_bmc::structures::atom::{Atom, Domain};
let door_open = Atom::boolean("door_open");
let floor = Atom::enumerated("floor", ["0", "1", "2"]).unwrap();

assert_eq!(door_open.width(), 1);
assert_eq!(floor.width(), 3);
assert_eq!(floor.value_id("2"), Some(2));
assert_eq!(floor.value_name(1), Some("1"));
```

Atoms are immutable once created.
Within a [symbol table](crate::structures::symbols) an atom is identified by an [AtomId], and a value of an enumerated atom by a [ValueId], its index in the domain.
*/

use crate::types::err::{self};

/// The index of an atom in a symbol table.
pub type AtomId = u32;

/// The index of a value in the domain of an enumerated atom.
pub type ValueId = u32;

/// The domain of an atom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Domain {
    /// The pair {false, true}.
    Boolean,

    /// An ordered list of distinct values.
    Enumerated(Vec<String>),
}

/// A named state variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Atom {
    symbol: String,
    domain: Domain,
}

impl Atom {
    /// A boolean atom.
    pub fn boolean(symbol: impl Into<String>) -> Self {
        Atom {
            symbol: symbol.into(),
            domain: Domain::Boolean,
        }
    }

    /// An enumerated atom, so long as the given values are non-empty and distinct.
    pub fn enumerated<V: Into<String>>(
        symbol: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self, err::SpecError> {
        let symbol = symbol.into();
        let mut domain: Vec<String> = Vec::default();

        for value in values {
            let value = value.into();
            if domain.contains(&value) {
                return Err(err::SpecError::DuplicateValue {
                    atom: symbol,
                    value,
                });
            }
            domain.push(value);
        }

        if domain.is_empty() {
            return Err(err::SpecError::EmptyDomain(symbol));
        }

        Ok(Atom {
            symbol,
            domain: Domain::Enumerated(domain),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.domain, Domain::Boolean)
    }

    /// The count of variables required to represent the atom at a single timestep.
    pub fn width(&self) -> usize {
        match &self.domain {
            Domain::Boolean => 1,
            Domain::Enumerated(values) => values.len(),
        }
    }

    /// The index of a value in the domain of an enumerated atom.
    pub fn value_id(&self, value: &str) -> Option<ValueId> {
        match &self.domain {
            Domain::Boolean => None,
            Domain::Enumerated(values) => values
                .iter()
                .position(|v| v == value)
                .map(|index| index as ValueId),
        }
    }

    /// The value at some index of the domain of an enumerated atom.
    pub fn value_name(&self, value: ValueId) -> Option<&str> {
        match &self.domain {
            Domain::Boolean => None,
            Domain::Enumerated(values) => values.get(value as usize).map(|v| v.as_str()),
        }
    }

    /// The values of an enumerated atom, with their indicies.
    /// Empty for a boolean atom.
    pub fn values(&self) -> impl Iterator<Item = (ValueId, &str)> {
        let values: &[String] = match &self.domain {
            Domain::Boolean => &[],
            Domain::Enumerated(values) => values,
        };
        values
            .iter()
            .enumerate()
            .map(|(index, value)| (index as ValueId, value.as_str()))
    }
}
