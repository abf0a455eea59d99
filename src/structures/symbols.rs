/*!
The symbol table of a specification.

The table is built once, from the declared atoms, and is not mutated after.
Atoms keep their declaration order, which fixes the order in which [variables](crate::index) are allocated.

Resolution of a literal is always by the declared name of an atom.
So, an atom named `zone_1` is never confused with the value `1` of some atom named `zone`.

```rust
# use otter_bmc::structures::atom::Atom;
# use otter_bmc::structures::symbols::SymbolTable;
let table = SymbolTable::from_atoms([
    Atom::enumerated("zone", ["1", "2"]).unwrap(),
    Atom::boolean("zone_1"),
])
.unwrap();

let zone_is_one = table.literal("zone", Some("1"), true).unwrap();
let zone_1 = table.literal("zone_1", None, true).unwrap();

assert_eq!(zone_is_one.atom(), 0);
assert_eq!(zone_is_one.value(), Some(0));
assert_eq!(zone_1.atom(), 1);
assert_eq!(zone_1.value(), None);
```
*/

use std::collections::HashMap;

use crate::{
    structures::{
        atom::{Atom, AtomId},
        literal::Literal,
    },
    types::err::{self},
};

/// Atoms, in declaration order, with a map from symbols to atoms.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    atoms: Vec<Atom>,
    ids: HashMap<String, AtomId>,
}

impl SymbolTable {
    /// A table of the given atoms, so long as no symbol is repeated.
    pub fn from_atoms(atoms: impl IntoIterator<Item = Atom>) -> Result<Self, err::SpecError> {
        let mut table = SymbolTable::default();
        for atom in atoms {
            if table.ids.contains_key(atom.symbol()) {
                return Err(err::SpecError::DuplicateAtom(atom.symbol().to_owned()));
            }
            table
                .ids
                .insert(atom.symbol().to_owned(), table.atoms.len() as AtomId);
            table.atoms.push(atom);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn get(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id as usize)
    }

    pub fn id_of(&self, symbol: &str) -> Option<AtomId> {
        self.ids.get(symbol).copied()
    }

    /// The atoms of the table, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms
            .iter()
            .enumerate()
            .map(|(id, atom)| (id as AtomId, atom))
    }

    /// Resolves a symbol, an optional value, and a polarity to a literal.
    ///
    /// - A boolean atom may be given no value, or one of `true` and `false`.
    ///   The value `false` flips the polarity.
    /// - An enumerated atom must be given a value of its domain.
    pub fn literal(
        &self,
        symbol: &str,
        value: Option<&str>,
        polarity: bool,
    ) -> Result<Literal, err::SpecError> {
        let Some(id) = self.id_of(symbol) else {
            return Err(err::SpecError::UnknownAtom(symbol.to_owned()));
        };
        let atom = &self.atoms[id as usize];

        let mismatch = |value: &str| err::SpecError::DomainMismatch {
            atom: symbol.to_owned(),
            value: value.to_owned(),
        };

        match (atom.is_boolean(), value) {
            (true, None) | (true, Some("true")) => Ok(Literal::new(id, None, polarity)),
            (true, Some("false")) => Ok(Literal::new(id, None, !polarity)),
            (true, Some(other)) => Err(mismatch(other)),

            (false, None) => Err(err::SpecError::MissingValue(symbol.to_owned())),
            (false, Some(value)) => match atom.value_id(value) {
                Some(value_id) => Ok(Literal::new(id, Some(value_id), polarity)),
                None => Err(mismatch(value)),
            },
        }
    }

    /// The literal as text, e.g. `~door_open` or `floor=2`.
    pub fn render(&self, literal: &Literal) -> String {
        let Some(atom) = self.get(literal.atom()) else {
            return format!("?{}", literal.atom());
        };
        let sign = if literal.polarity() { "" } else { "~" };
        match literal.value().and_then(|v| atom.value_name(v)) {
            Some(value) => format!("{sign}{}={value}", atom.symbol()),
            None => format!("{sign}{}", atom.symbol()),
        }
    }
}
