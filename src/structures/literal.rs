//! Literals are atoms of a symbol table paired with a (boolean) polarity, and a value if the atom is enumerated.
//!
//! For a boolean atom *a* the literal (*a*, -, true) states *a* holds, and (*a*, -, false) states *a* does not hold.
//! For an enumerated atom *a* the literal (*a*, *v*, true) states *a* has value *v*, and (*a*, *v*, false) states *a* has some value other than *v*.
//!
//! Literals are only ever built by [resolution](crate::structures::symbols::SymbolTable::literal) against a symbol table, and carry the identity of the atom as a field.
//! So, the atom of a literal is never recovered from text.
//!
//! Within a transition rule a literal is [Framed], as the rule relates the current state to the next state.

use crate::structures::{
    atom::{AtomId, ValueId},
    symbols::SymbolTable,
};

/// Something which has a negation, and can be written with respect to a symbol table.
///
/// The [normalizer](crate::structures::cnf) is generic over anything which satisfies the trait.
pub trait Negatable: Clone + Eq {
    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The literal as text, with respect to some symbol table.
    fn render(&self, symbols: &SymbolTable) -> String;
}

/// A literal of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    atom: AtomId,
    value: Option<ValueId>,
    polarity: bool,
}

impl Literal {
    pub fn new(atom: AtomId, value: Option<ValueId>, polarity: bool) -> Self {
        Literal {
            atom,
            value,
            polarity,
        }
    }

    pub fn atom(&self) -> AtomId {
        self.atom
    }

    pub fn value(&self) -> Option<ValueId> {
        self.value
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    /// The literal in a frame.
    pub fn in_frame(self, frame: Frame) -> Framed {
        Framed {
            frame,
            literal: self,
        }
    }
}

impl Negatable for Literal {
    fn negate(&self) -> Self {
        Literal {
            polarity: !self.polarity,
            ..*self
        }
    }

    fn render(&self, symbols: &SymbolTable) -> String {
        symbols.render(self)
    }
}

/// The state a literal of a transition rule refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Frame {
    /// The state from which a transition is made.
    Now,

    /// The state to which a transition is made.
    Next,
}

/// A literal of a transition rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Framed {
    pub frame: Frame,
    pub literal: Literal,
}

impl Negatable for Framed {
    fn negate(&self) -> Self {
        Framed {
            frame: self.frame,
            literal: self.literal.negate(),
        }
    }

    /// As a literal, with a prime on the atom if in the next state, e.g. `~lamp'` or `floor'=2`.
    fn render(&self, symbols: &SymbolTable) -> String {
        let text = symbols.render(&self.literal);
        match self.frame {
            Frame::Now => text,
            Frame::Next => match text.find('=') {
                Some(split) => format!("{}'{}", &text[..split], &text[split..]),
                None => format!("{text}'"),
            },
        }
    }
}
