//! Structures used to describe a transition system and its encoding.
//!
//! - [atom]s and the [symbol table](symbols) which holds them.
//! - [literal]s over a symbol table, and [formula]s over literals.
//! - [cnf], the normal form of a formula.
//! - [clause]s of integers, as given to an engine.

pub mod atom;
pub mod clause;
pub mod cnf;
pub mod formula;
pub mod literal;
pub mod symbols;
