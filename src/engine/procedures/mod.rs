//! Procedures of the default engine, each as methods on a [context](crate::engine::Context).
//!
//! - [bcp], boolean constraint propagation over watched literals.
//! - [analysis], derivation of an asserting clause from a conflict, and of the assumptions used to derive unsatisfiability.
//! - [backjump], recovery from a conflict.
//! - [decision], choosing a value for some atom.
//! - [solve], the loop combining the others.

pub mod analysis;
pub mod backjump;
pub mod bcp;
pub mod decision;
pub mod solve;
