//! Propositional formulas over some type of literal.
//!
//! Formulas are generic over the literal, as the same connectives are used for formulas over a single state (init, safety) and formulas over a pair of states (transition rules).
//!
//! Formulas are built by the [parser](crate::parse) or through the constructors below, and normalized to [cnf](crate::structures::cnf).
//! The constructors flatten trivial cases, so the conjunction of no formulas is [Top](Formula::Top), and the conjunction of a single formula is that formula.

/// A propositional formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Formula<L> {
    /// Verum.
    Top,

    /// Falsum.
    Bottom,

    Literal(L),

    Not(Box<Formula<L>>),

    And(Vec<Formula<L>>),

    Or(Vec<Formula<L>>),

    Implies(Box<Formula<L>>, Box<Formula<L>>),

    Iff(Box<Formula<L>>, Box<Formula<L>>),
}

impl<L> Formula<L> {
    pub fn conjunction(mut formulas: Vec<Formula<L>>) -> Self {
        match formulas.len() {
            0 => Formula::Top,
            1 => formulas.remove(0),
            _ => Formula::And(formulas),
        }
    }

    pub fn disjunction(mut formulas: Vec<Formula<L>>) -> Self {
        match formulas.len() {
            0 => Formula::Bottom,
            1 => formulas.remove(0),
            _ => Formula::Or(formulas),
        }
    }

    pub fn negation(formula: Formula<L>) -> Self {
        Formula::Not(Box::new(formula))
    }

    pub fn implies(antecedent: Formula<L>, consequent: Formula<L>) -> Self {
        Formula::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn iff(left: Formula<L>, right: Formula<L>) -> Self {
        Formula::Iff(Box::new(left), Box::new(right))
    }

    /// The same formula, with each literal transformed.
    pub fn map<M>(self, f: &mut impl FnMut(L) -> M) -> Formula<M> {
        match self {
            Formula::Top => Formula::Top,
            Formula::Bottom => Formula::Bottom,
            Formula::Literal(literal) => Formula::Literal(f(literal)),
            Formula::Not(inner) => Formula::negation(inner.map(f)),
            Formula::And(parts) => Formula::And(parts.into_iter().map(|p| p.map(f)).collect()),
            Formula::Or(parts) => Formula::Or(parts.into_iter().map(|p| p.map(f)).collect()),
            Formula::Implies(a, c) => Formula::implies(a.map(f), c.map(f)),
            Formula::Iff(l, r) => Formula::iff(l.map(f), r.map(f)),
        }
    }

    /// The literals of the formula, in order of occurrence.
    pub fn literals(&self) -> Vec<&L> {
        let mut found = Vec::default();
        let mut stack = vec![self];
        while let Some(formula) = stack.pop() {
            match formula {
                Formula::Top | Formula::Bottom => {}
                Formula::Literal(literal) => found.push(literal),
                Formula::Not(inner) => stack.push(inner),
                Formula::And(parts) | Formula::Or(parts) => stack.extend(parts.iter().rev()),
                Formula::Implies(l, r) | Formula::Iff(l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
            }
        }
        found
    }
}
