/*!
A transition system, resolved against a symbol table and normalized.

A [Specification] is built once from a [Source] and is immutable after.
Construction either succeeds in full or fails with the first [error](err::SpecError) found, and so no partially built specification is ever seen.

Construction produces, in order:
1. A [symbol table](SymbolTable) of the declared atoms, and in incremental mode a synthetic activation atom kept apart from the table.
2. The CNF of the initial constraint.
3. For each rule, the CNF of `preconditions ⇒ effects'`, with preconditions over the current state and effects over the next state.
4. The CNF of the inertia (frame) axioms, if enabled.
5. The CNF of the domain constraints, requiring each enumerated atom to take exactly one value.
6. For each safety property *P* the CNF of ¬*P*, and the CNF of the negation of the conjunction of every property.

# Inertia

A rule only says what holds after it fires, and so without further constraint any atom not mentioned by the effects of a rule is free to take any value in the next state.
Inertia clauses keep an atom at its value unless some rule whose effects mention the atom is enabled:

```none
en(r₁) ∨ … ∨ en(rₘ) ∨ (a' ⇔ a)
```

For an enumerated atom there is one such formula per value.
If one of the rules is always enabled the formula is trivially true, and no clause is made.

The formula is normalized by distribution, and so if *m* rules with preconditions of *k* literals affect an atom, each value of the atom has some *2kᵐ* inertia clauses.
Atoms affected by many rules with long preconditions may then dominate the encoding.

# Rules

Each rule is an implication which must hold at every transition, and so any number of rules may fire together.
If the effects of two enabled rules conflict there is no successor state.

```rust
# use otter_bmc::specification::{Options, Source, Specification};
let source = Source::default()
    .boolean("lamp")
    .init("~lamp")
    .rule("toggle_on", ["~lamp"], ["lamp"])
    .rule("toggle_off", ["lamp"], ["~lamp"])
    .safety("~lamp");

let spec = Specification::build(&source, Options::default()).unwrap();

assert_eq!(spec.rules()[0].cnf.to_text(spec.symbols()), "lamp | lamp'");
assert_eq!(spec.violation().to_text(spec.symbols()), "lamp");
assert!(spec.inertia().is_empty());
```
*/

mod source;
pub use source::{Declaration, RuleSource, Source};

use crate::{
    misc::log::targets::{self},
    parse,
    structures::{
        atom::{Atom, AtomId},
        cnf::Cnf,
        formula::Formula,
        literal::{Frame, Framed, Literal},
        symbols::SymbolTable,
    },
    types::err::{self},
};

/// The symbol of the activation atom, which is never part of a symbol table.
pub const ACTIVATION_SYMBOL: &str = "activation";

/// Options which change the form of a specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Include an activation atom.
    pub incremental: bool,

    /// Include inertia clauses.
    pub inertia: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            incremental: true,
            inertia: true,
        }
    }
}

/// A transition rule.
#[derive(Clone, Debug)]
pub struct Rule {
    pub name: String,

    /// The conjunction of the preconditions of the rule.
    pub enabled: Formula<Literal>,

    /// Whether the preconditions of the rule are trivially true.
    pub always_enabled: bool,

    /// The atoms mentioned by the effects of the rule, without repetition.
    pub affects: Vec<AtomId>,

    /// The clauses of `preconditions ⇒ effects'`.
    pub cnf: Cnf<Framed>,
}

/// A safety property.
#[derive(Clone, Debug)]
pub struct Property {
    /// The property, as given.
    pub text: String,

    /// The clauses of the negation of the property.
    pub violation: Cnf<Literal>,
}

/// A transition system, resolved and normalized.
#[derive(Clone, Debug)]
pub struct Specification {
    symbols: SymbolTable,

    activation: Option<Atom>,

    init: Cnf<Literal>,

    rules: Vec<Rule>,

    inertia: Cnf<Framed>,

    domain: Cnf<Literal>,

    properties: Vec<Property>,

    violation: Cnf<Literal>,

    options: Options,
}

impl Specification {
    /// Builds a specification from a source.
    pub fn build(source: &Source, options: Options) -> Result<Self, err::SpecError> {
        let mut atoms = Vec::with_capacity(source.states.len());
        for declaration in &source.states {
            let atom = match &declaration.domain {
                None => Atom::boolean(declaration.name.as_str()),
                Some(values) => Atom::enumerated(declaration.name.as_str(), values)?,
            };
            atoms.push(atom);
        }
        let symbols = SymbolTable::from_atoms(atoms)?;

        let activation = match options.incremental {
            true => Some(Atom::boolean(ACTIVATION_SYMBOL)),
            false => None,
        };

        let init = {
            let mut parts = Vec::with_capacity(source.init.len());
            for text in &source.init {
                parts.push(parse::formula(text, &symbols)?);
            }
            Cnf::from_formula(&Formula::conjunction(parts))
        };

        let mut rules = Vec::with_capacity(source.rules.len());
        for rule in &source.rules {
            rules.push(Self::build_rule(rule, &symbols)?);
        }

        let inertia = match options.inertia {
            true => inertia_clauses(&symbols, &rules),
            false => Cnf::default(),
        };

        let domain = domain_clauses(&symbols);

        let mut properties = Vec::with_capacity(source.safety.len());
        let mut property_formulas = Vec::with_capacity(source.safety.len());
        for text in &source.safety {
            let formula = parse::formula(text, &symbols)?;
            properties.push(Property {
                text: text.to_owned(),
                violation: Cnf::from_formula(&Formula::negation(formula.clone())),
            });
            property_formulas.push(formula);
        }
        let violation = match property_formulas.is_empty() {
            true => Cnf::falsum(),
            false => Cnf::from_formula(&Formula::negation(Formula::conjunction(property_formulas))),
        };

        log::info!(target: targets::SPEC, "Atoms: {}", symbols.len());
        log::info!(target: targets::SPEC, "Init: {}", init.to_text(&symbols));
        for rule in &rules {
            log::info!(target: targets::SPEC, "Rule {}: {}", rule.name, rule.cnf.to_text(&symbols));
        }
        log::info!(target: targets::SPEC, "Inertia clauses: {}", inertia.len());
        log::info!(target: targets::SPEC, "Violation: {}", violation.to_text(&symbols));

        Ok(Specification {
            symbols,
            activation,
            init,
            rules,
            inertia,
            domain,
            properties,
            violation,
            options,
        })
    }

    fn build_rule(rule: &RuleSource, symbols: &SymbolTable) -> Result<Rule, err::SpecError> {
        let mut preconditions = Vec::with_capacity(rule.preconditions.len());
        for text in &rule.preconditions {
            preconditions.push(parse::formula(text, symbols)?);
        }
        let enabled = Formula::conjunction(preconditions);
        let always_enabled = Cnf::from_formula(&enabled).is_empty();

        let mut effects = Vec::with_capacity(rule.effects.len());
        for text in &rule.effects {
            effects.push(parse::formula(text, symbols)?);
        }
        let effects = Formula::conjunction(effects);

        let mut affects: Vec<AtomId> = Vec::default();
        for literal in effects.literals() {
            if !affects.contains(&literal.atom()) {
                affects.push(literal.atom());
            }
        }

        let transition = Formula::implies(
            enabled.clone().map(&mut |l: Literal| l.in_frame(Frame::Now)),
            effects.map(&mut |l: Literal| l.in_frame(Frame::Next)),
        );

        Ok(Rule {
            name: rule.name.to_owned(),
            enabled,
            always_enabled,
            affects,
            cnf: Cnf::from_formula(&transition),
        })
    }

    /// A copy of the specification which checks only the property at the given index.
    pub fn restrict(&self, property: usize) -> Option<Specification> {
        let kept = self.properties.get(property)?.clone();
        let mut restricted = self.clone();
        restricted.violation = kept.violation.clone();
        restricted.properties = vec![kept];
        Some(restricted)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The activation atom, present only in incremental mode.
    pub fn activation(&self) -> Option<&Atom> {
        self.activation.as_ref()
    }

    pub fn incremental(&self) -> bool {
        self.options.incremental
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn init(&self) -> &Cnf<Literal> {
        &self.init
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn inertia(&self) -> &Cnf<Framed> {
        &self.inertia
    }

    pub fn domain(&self) -> &Cnf<Literal> {
        &self.domain
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// The clauses of the negation of the conjunction of every property.
    pub fn violation(&self) -> &Cnf<Literal> {
        &self.violation
    }
}

/// Clauses requiring each enumerated atom to take exactly one value.
fn domain_clauses(symbols: &SymbolTable) -> Cnf<Literal> {
    let mut clauses = Vec::default();
    for (id, atom) in symbols.iter() {
        let values = atom.values().map(|(value, _)| value).collect::<Vec<_>>();
        if values.is_empty() {
            continue;
        }

        clauses.push(
            values
                .iter()
                .map(|value| Literal::new(id, Some(*value), true))
                .collect(),
        );

        for (index, first) in values.iter().enumerate() {
            for second in &values[index + 1..] {
                clauses.push(vec![
                    Literal::new(id, Some(*first), false),
                    Literal::new(id, Some(*second), false),
                ]);
            }
        }
    }
    Cnf::from_clauses(clauses)
}

/// Clauses keeping each atom at its value, unless a rule which affects the atom is enabled.
fn inertia_clauses(symbols: &SymbolTable, rules: &[Rule]) -> Cnf<Framed> {
    let mut cnf = Cnf::default();

    for (id, atom) in symbols.iter() {
        let affecting = rules
            .iter()
            .filter(|rule| rule.affects.contains(&id))
            .collect::<Vec<_>>();

        if affecting.iter().any(|rule| rule.always_enabled) {
            log::trace!(target: targets::SPEC, "No inertia for {}", atom.symbol());
            continue;
        }

        let enabled = affecting
            .iter()
            .map(|rule| rule.enabled.clone().map(&mut |l: Literal| l.in_frame(Frame::Now)))
            .collect::<Vec<_>>();

        let kept = match atom.is_boolean() {
            true => vec![Literal::new(id, None, true)],
            false => atom
                .values()
                .map(|(value, _)| Literal::new(id, Some(value), true))
                .collect(),
        };

        for literal in kept {
            let unchanged = Formula::iff(
                Formula::Literal(literal.in_frame(Frame::Next)),
                Formula::Literal(literal.in_frame(Frame::Now)),
            );
            let mut parts = enabled.clone();
            parts.push(unchanged);
            cnf.extend(Cnf::from_formula(&Formula::disjunction(parts)));
        }
    }

    cnf
}

