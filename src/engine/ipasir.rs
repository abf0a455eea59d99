//! The default engine, through the IPASIR shaped [Engine] trait.
//!
//! The API uses a 'transparent' representation of literals, so if the literal -83 is added all internal structures grow to allow for 83 atoms.

use crate::{
    engine::{
        context::{Context, ContextState},
        literal::CLiteral,
        Engine, Stop,
    },
    misc::log::targets::{self},
    structures::clause::IntLiteral,
    types::err::{self},
};

/// The signature of the default engine.
pub const IPASIR_SIGNATURE: &str = concat!("otter_bmc ", env!("CARGO_PKG_VERSION"));

impl Engine for Context {
    fn signature(&self) -> &'static str {
        IPASIR_SIGNATURE
    }

    fn add_clause(&mut self, clause: &[IntLiteral]) -> Result<(), err::EngineError> {
        self.check_released()?;
        let mut literals = Vec::with_capacity(clause.len());
        for literal in clause {
            literals.push(CLiteral::from_int(*literal)?);
        }
        self.add_literals(literals);
        Ok(())
    }

    fn assume(&mut self, literal: IntLiteral) -> Result<(), err::EngineError> {
        self.check_released()?;
        let assumption = CLiteral::from_int(literal)?;
        self.ensure_atom(assumption.atom());
        self.assumptions.push(assumption);
        Ok(())
    }

    fn solve(&mut self, stop: &Stop) -> Result<i32, err::EngineError> {
        Ok(self.solve_given(stop)?.code())
    }

    fn value_of(&self, literal: IntLiteral) -> Option<bool> {
        let literal = CLiteral::from_int(literal).ok()?;
        self.model_value(literal.atom())
            .map(|value| value == literal.polarity())
    }

    fn failed(&self, literal: IntLiteral) -> bool {
        match (self.state, CLiteral::from_int(literal)) {
            (ContextState::Unsatisfiable, Ok(literal)) => self.failed.contains(&literal),
            _ => false,
        }
    }

    fn release(&mut self) {
        if self.state == ContextState::Released {
            return;
        }
        log::trace!(target: targets::ENGINE, "Releasing context with {} clauses", self.clause_count());
        self.state = ContextState::Released;
        self.clauses = Vec::default();
        self.watches = Vec::default();
        self.units = Vec::default();
        self.assumptions = Vec::default();
    }
}
