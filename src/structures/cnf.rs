/*!
Normalization of formulas to conjunctive normal form.

The normalization is the textbook procedure:
1. Implications and equivalences are eliminated, and negations are pushed to literals, giving negation normal form.
2. Disjunction is distributed over conjunction.

Along the way constants are folded, clauses with a complementary pair of literals are dropped, and repeated literals are removed from a clause.
No further simplification is made, and in particular distribution may produce a formula exponentially larger than the original.

```rust
# use otter_bmc::structures::atom::Atom;
# use otter_bmc::structures::cnf::Cnf;
# use otter_bmc::structures::symbols::SymbolTable;
# use otter_bmc::parse;
let table = SymbolTable::from_atoms([Atom::boolean("p"), Atom::boolean("q"), Atom::boolean("r")]).unwrap();

let formula = parse::formula("p | (q & ~r)", &table).unwrap();
let cnf = Cnf::from_formula(&formula);

assert_eq!(cnf.to_text(&table), "p | q & p | ~r");
```

An empty CNF (no clauses) is verum, and a CNF containing the empty clause is falsum.
*/

use crate::structures::{formula::Formula, literal::Negatable, symbols::SymbolTable};

/// A formula in conjunctive normal form: a conjunction of clauses, each a disjunction of literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cnf<L> {
    clauses: Vec<Vec<L>>,
}

impl<L> Default for Cnf<L> {
    fn default() -> Self {
        Cnf {
            clauses: Vec::default(),
        }
    }
}

/// A formula in negation normal form.
enum Nnf<L> {
    Top,
    Bottom,
    Literal(L),
    And(Vec<Nnf<L>>),
    Or(Vec<Nnf<L>>),
}

impl<L: Negatable> Cnf<L> {
    /// The CNF of a formula.
    pub fn from_formula(formula: &Formula<L>) -> Self {
        let nnf = negation_normal_form(formula, true);
        let mut cnf = Cnf::default();
        for clause in distribute(nnf) {
            cnf.push(clause);
        }
        cnf
    }

    /// A CNF from clauses, with the usual cleanup applied to each clause.
    pub fn from_clauses(clauses: impl IntoIterator<Item = Vec<L>>) -> Self {
        let mut cnf = Cnf::default();
        for clause in clauses {
            cnf.push(clause);
        }
        cnf
    }

    /// Falsum, as a single empty clause.
    pub fn falsum() -> Self {
        Cnf {
            clauses: vec![Vec::default()],
        }
    }

    pub fn clauses(&self) -> &[Vec<L>] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Conjoins the clauses of another CNF.
    pub fn extend(&mut self, other: Cnf<L>) {
        for clause in other.clauses {
            self.push(clause);
        }
    }

    /// The flat text of the CNF, with clauses joined by `&` and literals by `|`.
    pub fn to_text(&self, symbols: &SymbolTable) -> String {
        self.clauses
            .iter()
            .map(|clause| match clause.is_empty() {
                true => "false".to_owned(),
                false => clause
                    .iter()
                    .map(|literal| literal.render(symbols))
                    .collect::<Vec<_>>()
                    .join(" | "),
            })
            .collect::<Vec<_>>()
            .join(" & ")
    }

    /// Adds a clause, unless it is tautological or already present, after removing repeated literals.
    fn push(&mut self, clause: Vec<L>) {
        let mut cleaned: Vec<L> = Vec::with_capacity(clause.len());
        for literal in clause {
            if cleaned.contains(&literal.negate()) {
                return;
            }
            if !cleaned.contains(&literal) {
                cleaned.push(literal);
            }
        }
        if !self.clauses.contains(&cleaned) {
            self.clauses.push(cleaned);
        }
    }
}

/// The negation normal form of a formula, or of its negation if `positive` is false.
fn negation_normal_form<L: Negatable>(formula: &Formula<L>, positive: bool) -> Nnf<L> {
    match formula {
        Formula::Top => match positive {
            true => Nnf::Top,
            false => Nnf::Bottom,
        },

        Formula::Bottom => match positive {
            true => Nnf::Bottom,
            false => Nnf::Top,
        },

        Formula::Literal(literal) => match positive {
            true => Nnf::Literal(literal.clone()),
            false => Nnf::Literal(literal.negate()),
        },

        Formula::Not(inner) => negation_normal_form(inner, !positive),

        Formula::And(parts) => {
            let parts = parts
                .iter()
                .map(|part| negation_normal_form(part, positive))
                .collect();
            match positive {
                true => Nnf::And(parts),
                false => Nnf::Or(parts),
            }
        }

        Formula::Or(parts) => {
            let parts = parts
                .iter()
                .map(|part| negation_normal_form(part, positive))
                .collect();
            match positive {
                true => Nnf::Or(parts),
                false => Nnf::And(parts),
            }
        }

        // a → c is ¬a ∨ c, and ¬(a → c) is a ∧ ¬c.
        Formula::Implies(antecedent, consequent) => {
            let antecedent = negation_normal_form(antecedent, !positive);
            let consequent = negation_normal_form(consequent, positive);
            match positive {
                true => Nnf::Or(vec![antecedent, consequent]),
                false => Nnf::And(vec![antecedent, consequent]),
            }
        }

        // l ↔ r is (¬l ∨ r) ∧ (l ∨ ¬r), and ¬(l ↔ r) is (l ∨ r) ∧ (¬l ∨ ¬r).
        Formula::Iff(left, right) => {
            let (first, second) = match positive {
                true => (
                    Nnf::Or(vec![
                        negation_normal_form(left, false),
                        negation_normal_form(right, true),
                    ]),
                    Nnf::Or(vec![
                        negation_normal_form(left, true),
                        negation_normal_form(right, false),
                    ]),
                ),
                false => (
                    Nnf::Or(vec![
                        negation_normal_form(left, true),
                        negation_normal_form(right, true),
                    ]),
                    Nnf::Or(vec![
                        negation_normal_form(left, false),
                        negation_normal_form(right, false),
                    ]),
                ),
            };
            Nnf::And(vec![first, second])
        }
    }
}

/// The clauses of a formula in negation normal form.
fn distribute<L: Negatable>(nnf: Nnf<L>) -> Vec<Vec<L>> {
    match nnf {
        Nnf::Top => Vec::default(),

        Nnf::Bottom => vec![Vec::default()],

        Nnf::Literal(literal) => vec![vec![literal]],

        Nnf::And(parts) => parts.into_iter().flat_map(distribute).collect(),

        Nnf::Or(parts) => {
            let mut product: Vec<Vec<L>> = vec![Vec::default()];
            for part in parts {
                let part_clauses = distribute(part);
                let mut next = Vec::with_capacity(product.len() * part_clauses.len());
                for left in &product {
                    for right in &part_clauses {
                        let mut clause = left.clone();
                        clause.extend(right.iter().cloned());
                        next.push(clause);
                    }
                }
                product = next;
                if product.is_empty() {
                    break;
                }
            }
            product
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{atom::Atom, literal::Literal};

    fn table() -> SymbolTable {
        SymbolTable::from_atoms([
            Atom::boolean("p"),
            Atom::boolean("q"),
            Atom::enumerated("floor", ["0", "1", "2"]).unwrap(),
        ])
        .unwrap()
    }

    fn lit(table: &SymbolTable, symbol: &str, value: Option<&str>, polarity: bool) -> Formula<Literal> {
        Formula::Literal(table.literal(symbol, value, polarity).unwrap())
    }

    #[test]
    fn implication() {
        let table = table();
        let formula = Formula::implies(lit(&table, "p", None, true), lit(&table, "q", None, true));
        assert_eq!(Cnf::from_formula(&formula).to_text(&table), "~p | q");
    }

    #[test]
    fn negated_disjunction() {
        let table = table();
        let formula = Formula::negation(Formula::Or(vec![
            lit(&table, "floor", Some("0"), true),
            lit(&table, "floor", Some("1"), true),
        ]));
        assert_eq!(
            Cnf::from_formula(&formula).to_text(&table),
            "~floor=0 & ~floor=1"
        );
    }

    #[test]
    fn constants_fold() {
        let table = table();
        let verum = Formula::Or(vec![lit(&table, "p", None, true), Formula::Top]);
        assert!(Cnf::from_formula(&verum).is_empty());

        let falsum = Formula::And(vec![lit(&table, "p", None, true), Formula::Bottom]);
        let cnf = Cnf::from_formula(&falsum);
        assert!(cnf.clauses().iter().any(|clause| clause.is_empty()));

        let shortened = Formula::Or(vec![lit(&table, "p", None, true), Formula::Bottom]);
        assert_eq!(Cnf::from_formula(&shortened).to_text(&table), "p");
    }

    #[test]
    fn tautologies_dropped() {
        let table = table();
        let formula = Formula::Or(vec![lit(&table, "p", None, true), lit(&table, "p", None, false)]);
        assert!(Cnf::from_formula(&formula).is_empty());
    }

    #[test]
    fn equivalence() {
        let table = table();
        let formula = Formula::iff(lit(&table, "p", None, true), lit(&table, "q", None, true));
        assert_eq!(Cnf::from_formula(&formula).to_text(&table), "~p | q & p | ~q");

        let negated = Formula::negation(formula);
        assert_eq!(Cnf::from_formula(&negated).to_text(&table), "p | q & ~p | ~q");
    }
}
