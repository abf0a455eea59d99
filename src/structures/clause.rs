//! Clauses of signed integers, as given to an engine and written to DIMACS.
//!
//! The variable of an integer literal is the absolute value of the integer, and the polarity of the literal the sign.
//! The integer 0 is never a literal, as in DIMACS it terminates a clause.

/// A variable, as a positive integer.
pub type Var = u32;

/// The representation of a literal as a signed integer.
pub type IntLiteral = i32;

/// A clause of integer literals.
pub type IntClause = Vec<IntLiteral>;

/// The literal of a variable with a polarity.
pub fn int_literal(variable: Var, polarity: bool) -> IntLiteral {
    match polarity {
        true => variable as IntLiteral,
        false => -(variable as IntLiteral),
    }
}

/// A clause as a line of DIMACS, e.g. `-1 2 3 0`.
pub fn as_dimacs(clause: &[IntLiteral]) -> String {
    let mut line = String::default();
    for literal in clause {
        line.push_str(&literal.to_string());
        line.push(' ');
    }
    line.push('0');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs_line() {
        assert_eq!(as_dimacs(&[int_literal(1, false), 2, 3]), "-1 2 3 0");
        assert_eq!(as_dimacs(&[]), "0");
    }
}
