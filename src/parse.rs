/*!
Parsing formulas from text.

The grammar, from loosest to tightest binding, is:

```none
formula  := iff
iff      := implies (("<->" | "<=>") implies)*
implies  := or (("->" | "=>" | ">>") implies)?
or       := and ("|" and)*
and      := unary ("&" unary)*
unary    := ("~" | "!") unary | "(" formula ")" | "true" | "false" | atomic
atomic   := NAME [ "'" ] [ ("=" | "!=") VALUE ]
```

Whitespace is insignificant, and implication associates to the right.

Every atomic formula is resolved against a [symbol table](SymbolTable) as it is read, and so parsing fails on an unknown atom or a value outside of the domain of an atom.

A prime on an atom places the literal in the [next](Frame::Next) state, and is only permitted when parsing the flat text of clauses over a transition.

```rust
# use otter_bmc::structures::atom::Atom;
# use otter_bmc::structures::symbols::SymbolTable;
# use otter_bmc::parse;
let table = SymbolTable::from_atoms([
    Atom::boolean("door_open"),
    Atom::enumerated("floor", ["0", "1", "2"]).unwrap(),
])
.unwrap();

assert!(parse::formula("door_open -> floor=0", &table).is_ok());
assert!(parse::formula("floor", &table).is_err());
assert!(parse::formula("floor=3", &table).is_err());
assert!(parse::formula("door_open'", &table).is_err());

let cnf = parse::cnf_text("~door_open | door_open' & floor'!=2", &table).unwrap();
assert_eq!(cnf.to_text(&table), "~door_open | door_open' & ~floor'=2");
```
*/

use crate::{
    structures::{
        cnf::Cnf,
        formula::Formula,
        literal::{Frame, Framed, Literal, Negatable},
        symbols::SymbolTable,
    },
    types::err::{self},
};

/// Parses a formula over a single state.
pub fn formula(text: &str, symbols: &SymbolTable) -> Result<Formula<Literal>, err::SpecError> {
    let mut parser = Parser::new(text, symbols, false);
    let framed = parser.complete()?;
    Ok(framed.map(&mut |framed: Framed| framed.literal))
}

/// Parses the flat text of a CNF over a transition, e.g. `~a | b' & c=1`.
///
/// In flat text `&` separates clauses and `|` separates the literals of a clause, so `|` binds tighter than `&`.
/// This is the reverse of the formula grammar, and matches the text given by [Cnf::to_text].
pub fn cnf_text(text: &str, symbols: &SymbolTable) -> Result<Cnf<Framed>, err::SpecError> {
    let mut parser = Parser::new(text, symbols, true);
    let clauses = parser.flat()?;
    Ok(Cnf::from_clauses(clauses))
}

/// A recursive descent parser over some text.
struct Parser<'t, 's> {
    text: &'t str,
    position: usize,
    symbols: &'s SymbolTable,
    primes: bool,
}

impl<'t, 's> Parser<'t, 's> {
    fn new(text: &'t str, symbols: &'s SymbolTable, primes: bool) -> Self {
        Parser {
            text,
            position: 0,
            symbols,
            primes,
        }
    }

    /// Parses the whole of the text as a formula.
    fn complete(&mut self) -> Result<Formula<Framed>, err::SpecError> {
        let formula = self.iff()?;
        self.skip_whitespace();
        match self.rest().is_empty() {
            true => Ok(formula),
            false => Err(self.error("unexpected text after formula")),
        }
    }

    /// Parses the whole of the text as flat clauses.
    fn flat(&mut self) -> Result<Vec<Vec<Framed>>, err::SpecError> {
        let mut clauses = Vec::default();
        loop {
            let mut clause = Vec::default();
            let mut satisfied = false;
            loop {
                let mut polarity = true;
                while self.eat("~") || self.eat("!") {
                    polarity = !polarity;
                }
                match (self.atomic()?, polarity) {
                    (Formula::Literal(literal), true) => clause.push(literal),
                    (Formula::Literal(literal), false) => clause.push(literal.negate()),
                    (Formula::Top, true) | (Formula::Bottom, false) => satisfied = true,
                    _ => {}
                }
                if !self.eat("|") {
                    break;
                }
            }
            if !satisfied {
                clauses.push(clause);
            }
            if !self.eat("&") {
                break;
            }
        }

        self.skip_whitespace();
        match self.rest().is_empty() {
            true => Ok(clauses),
            false => Err(self.error("unexpected text after clauses")),
        }
    }

    fn rest(&self) -> &'t str {
        &self.text[self.position..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.position += rest.len() - rest.trim_start().len();
    }

    /// Consumes the given token, if it is next, ignoring whitespace.
    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        match self.rest().starts_with(token) {
            true => {
                self.position += token.len();
                true
            }
            false => false,
        }
    }

    fn error(&self, reason: &'static str) -> err::SpecError {
        err::SpecError::FormulaSyntax(err::ParseError {
            text: self.text.to_owned(),
            position: self.position,
            reason,
        })
    }

    fn iff(&mut self) -> Result<Formula<Framed>, err::SpecError> {
        let mut left = self.implies()?;
        while self.eat("<->") || self.eat("<=>") {
            let right = self.implies()?;
            left = Formula::iff(left, right);
        }
        Ok(left)
    }

    fn implies(&mut self) -> Result<Formula<Framed>, err::SpecError> {
        let antecedent = self.or()?;
        match self.eat("->") || self.eat("=>") || self.eat(">>") {
            true => Ok(Formula::implies(antecedent, self.implies()?)),
            false => Ok(antecedent),
        }
    }

    fn or(&mut self) -> Result<Formula<Framed>, err::SpecError> {
        let mut parts = vec![self.and()?];
        while self.eat("|") {
            parts.push(self.and()?);
        }
        Ok(Formula::disjunction(parts))
    }

    fn and(&mut self) -> Result<Formula<Framed>, err::SpecError> {
        let mut parts = vec![self.unary()?];
        while self.eat("&") {
            parts.push(self.unary()?);
        }
        Ok(Formula::conjunction(parts))
    }

    fn unary(&mut self) -> Result<Formula<Framed>, err::SpecError> {
        if self.eat("~") || self.eat("!") {
            return Ok(Formula::negation(self.unary()?));
        }

        if self.eat("(") {
            let inner = self.iff()?;
            return match self.eat(")") {
                true => Ok(inner),
                false => Err(self.error("expected ')'")),
            };
        }

        self.atomic()
    }

    /// Scans characters while the predicate holds, returning the scanned text.
    fn scan(&mut self, predicate: impl Fn(char, Option<char>) -> bool) -> &'t str {
        let start = self.position;
        let rest = self.rest();
        let mut chars = rest.char_indices().peekable();
        let mut end = rest.len();
        while let Some((index, c)) = chars.next() {
            let following = chars.peek().map(|(_, c)| *c);
            if !predicate(c, following) {
                end = index;
                break;
            }
        }
        self.position += end;
        &self.text[start..start + end]
    }

    fn atomic(&mut self) -> Result<Formula<Framed>, err::SpecError> {
        self.skip_whitespace();

        let name_start = self.position;
        let name = self.scan(|c, _| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        match name.chars().next() {
            None => return Err(self.error("expected an atom")),
            Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
                self.position = name_start;
                return Err(self.error("an atom must begin with a letter or '_'"));
            }
            Some(_) => {}
        }

        let primed = self.rest().starts_with('\'');
        if primed {
            if !self.primes {
                return Err(self.error("a primed atom is only permitted in transition clauses"));
            }
            self.position += 1;
        }

        // A comparison, taking care to not read an implication as one.
        let comparison = if self.eat("!=") {
            Some(false)
        } else {
            self.skip_whitespace();
            match self.rest().starts_with('=') && !self.rest().starts_with("=>") {
                true => {
                    self.position += 1;
                    Some(true)
                }
                false => None,
            }
        };

        let (value, polarity) = match comparison {
            None => {
                match (primed, name) {
                    (false, "true") => return Ok(Formula::Top),
                    (false, "false") => return Ok(Formula::Bottom),
                    _ => {}
                }
                (None, true)
            }

            Some(polarity) => {
                self.skip_whitespace();
                let value = self.scan(|c, following| {
                    c.is_ascii_alphanumeric()
                        || c == '_'
                        || c == '.'
                        || (c == '-' && following != Some('>'))
                });
                if value.is_empty() {
                    return Err(self.error("expected a value"));
                }
                (Some(value), polarity)
            }
        };

        let literal = self.symbols.literal(name, value, polarity)?;
        let frame = match primed {
            true => Frame::Next,
            false => Frame::Now,
        };
        Ok(Formula::Literal(literal.in_frame(frame)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::atom::Atom;

    fn table() -> SymbolTable {
        SymbolTable::from_atoms([
            Atom::boolean("lamp"),
            Atom::boolean("door"),
            Atom::enumerated("floor", ["0", "1", "2"]).unwrap(),
            Atom::enumerated("zone", ["1", "2"]).unwrap(),
            Atom::boolean("zone_1"),
        ])
        .unwrap()
    }

    fn cnf(text: &str) -> String {
        let table = table();
        Cnf::from_formula(&formula(text, &table).unwrap()).to_text(&table)
    }

    #[test]
    fn precedence() {
        assert_eq!(cnf("lamp | door & floor=1"), "lamp | door & lamp | floor=1");
        assert_eq!(cnf("(lamp | door) & floor=1"), "lamp | door & floor=1");
        assert_eq!(cnf("lamp -> door -> floor=1"), "~lamp | ~door | floor=1");
        assert_eq!(cnf("~~lamp"), "lamp");
    }

    #[test]
    fn comparisons() {
        assert_eq!(cnf("lamp=false"), "~lamp");
        assert_eq!(cnf("lamp != false"), "lamp");
        assert_eq!(cnf("floor!=0"), "~floor=0");
        assert_eq!(cnf("floor=2=>lamp"), "~floor=2 | lamp");
        assert_eq!(cnf("floor=1->lamp"), "~floor=1 | lamp");
    }

    #[test]
    fn names_are_not_split() {
        assert_eq!(cnf("zone_1 & zone=1"), "zone_1 & zone=1");
    }

    #[test]
    fn constants() {
        assert_eq!(cnf("true"), "");
        assert_eq!(cnf("false | lamp"), "lamp");
    }

    #[test]
    fn errors() {
        let table = table();

        let Err(err::SpecError::FormulaSyntax(e)) = formula("lamp &", &table) else {
            panic!("incomplete conjunction");
        };
        assert_eq!(e.position, 6);

        assert!(matches!(
            formula("(lamp | door", &table),
            Err(err::SpecError::FormulaSyntax(_))
        ));

        assert_eq!(
            formula("ladder", &table),
            Err(err::SpecError::UnknownAtom("ladder".to_owned()))
        );

        assert_eq!(
            formula("floor", &table),
            Err(err::SpecError::MissingValue("floor".to_owned()))
        );

        assert_eq!(
            formula("floor=9", &table),
            Err(err::SpecError::DomainMismatch {
                atom: "floor".to_owned(),
                value: "9".to_owned()
            })
        );

        assert!(matches!(
            formula("lamp'", &table),
            Err(err::SpecError::FormulaSyntax(_))
        ));
    }

    #[test]
    fn frames() {
        let table = table();
        let text = cnf_text("~lamp | lamp' & floor'=1", &table).unwrap();
        assert_eq!(text.to_text(&table), "~lamp | lamp' & floor'=1");

        let flat = cnf_text("lamp | door & false | floor=1 & true | door", &table).unwrap();
        assert_eq!(flat.to_text(&table), "lamp | door & floor=1");

        let frames = text
            .clauses()
            .iter()
            .flatten()
            .map(|framed| framed.frame)
            .collect::<Vec<_>>();
        assert_eq!(frames, vec![Frame::Now, Frame::Next, Frame::Next]);
    }
}
