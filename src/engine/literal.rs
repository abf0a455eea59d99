//! Literals of an engine, as atoms paired with a (boolean) polarity.
//!
//! The atoms of an engine are the variables of the clauses given to it, and so an integer literal of a clause maps to an engine literal without translation.
//!
//! ```rust
//! # use otter_bmc::engine::literal::CLiteral;
//! let literal = CLiteral::from_int(-79).unwrap();
//!
//! assert_eq!(literal.atom(), 79);
//! assert!(!literal.polarity());
//! assert_eq!(literal.negate().as_int(), 79);
//!
//! assert!(CLiteral::from_int(0).is_err());
//! ```

use crate::{
    structures::clause::{IntLiteral, Var},
    types::err::{self},
};

/// An atom of an engine.
pub type EngineAtom = Var;

/// The canonical literal of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CLiteral {
    atom: EngineAtom,
    polarity: bool,
}

impl CLiteral {
    pub fn new(atom: EngineAtom, polarity: bool) -> Self {
        CLiteral { atom, polarity }
    }

    /// The literal of a non-zero integer.
    pub fn from_int(literal: IntLiteral) -> Result<Self, err::EngineError> {
        match literal {
            0 => Err(err::EngineError::ZeroLiteral),
            _ => Ok(CLiteral {
                atom: literal.unsigned_abs(),
                polarity: literal.is_positive(),
            }),
        }
    }

    pub fn atom(&self) -> EngineAtom {
        self.atom
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    pub fn negate(&self) -> Self {
        CLiteral {
            atom: self.atom,
            polarity: !self.polarity,
        }
    }

    /// A dense index of the literal, used for watch lists.
    pub fn index(&self) -> usize {
        2 * self.atom as usize + self.polarity as usize
    }

    pub fn as_int(&self) -> IntLiteral {
        match self.polarity {
            true => self.atom as IntLiteral,
            false => -(self.atom as IntLiteral),
        }
    }
}

impl std::fmt::Display for CLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_int())
    }
}
