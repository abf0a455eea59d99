/*!
Translation of the typed clauses of a specification to clauses of integers.

A [ClauseBuilder] pairs a specification with a variable index, and each literal of a clause is mapped through the index at some timestep.
As literals carry the identity of their atom, no text is re-read during translation, though [translate_text](ClauseBuilder::translate_text) offers a thin parser over flat clause text.

# Guards

In incremental mode each clause required at timestep *t* is guarded by the activation variable of *t*, so the clause is inert until the activation variable is assumed.

- Init, domain, and transition clauses for *t* have `-activation_t` prepended.
- Violation clauses are first timestamped, and then guarded by the activation variable of the timestep of their literals.
  Further, a violation clause at *t* < *K* carries `+activation_{t+1}`, and so is released when the next bound is activated.

```rust
# use otter_bmc::clauses::ClauseBuilder;
# use otter_bmc::index::Indexer;
# use otter_bmc::specification::{Options, Source, Specification};
let source = Source::default()
    .boolean("lamp")
    .init("~lamp")
    .rule("toggle_on", ["~lamp"], ["lamp"])
    .safety("~lamp");
let spec = Specification::build(&source, Options::default()).unwrap();
let index = Indexer::build(&spec, 2);
let builder = ClauseBuilder::new(&spec, &index);

// activation_0 = 1, lamp_0 = 2, activation_1 = 3, lamp_1 = 4, …
assert_eq!(builder.init_clauses().unwrap(), vec![vec![-1, -2]]);

// The rule, and inertia keeping the lamp lit.
assert_eq!(
    builder.transition_clauses(1).unwrap(),
    vec![vec![-3, 2, 4], vec![-3, -2, 4]]
);
assert_eq!(builder.violation_clauses(1).unwrap(), vec![vec![-3, 4, 5]]);
assert_eq!(builder.violation_clauses(2).unwrap(), vec![vec![-5, 6]]);
```
*/

use crate::{
    index::{Indexer, VarKey},
    misc::log::targets::{self},
    parse,
    specification::Specification,
    structures::{
        clause::{int_literal, IntClause, IntLiteral},
        cnf::Cnf,
        literal::{Frame, Framed, Literal},
    },
    types::err::{self, ErrorKind},
};

/// A literal at a timestep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedLiteral {
    pub literal: Literal,
    pub step: usize,
}

/// Translates the clauses of a specification through a variable index.
pub struct ClauseBuilder<'a> {
    spec: &'a Specification,
    index: &'a Indexer,
}

impl<'a> ClauseBuilder<'a> {
    pub fn new(spec: &'a Specification, index: &'a Indexer) -> Self {
        ClauseBuilder { spec, index }
    }

    /// The integer literal of a literal at a timestep.
    pub fn literal(&self, literal: &Literal, step: usize) -> Result<IntLiteral, err::IndexError> {
        let var = self.index.state(literal.atom(), literal.value(), step)?;
        Ok(int_literal(var, literal.polarity()))
    }

    /// The key of the variable of an integer literal, paired with the polarity of the literal.
    pub fn decode(&self, literal: IntLiteral) -> Result<(VarKey, bool), err::IndexError> {
        let key = self.index.decode(literal.unsigned_abs())?;
        Ok((key, literal.is_positive()))
    }

    /// The literal at a timestep of an integer literal, if the variable of the integer is a state variable.
    pub fn timed(&self, literal: IntLiteral) -> Result<Option<TimedLiteral>, err::IndexError> {
        match self.decode(literal)? {
            (VarKey::State { atom, value, step }, polarity) => Ok(Some(TimedLiteral {
                literal: Literal::new(atom, value, polarity),
                step,
            })),
            (VarKey::Activation { .. }, _) => Ok(None),
        }
    }

    /// The clauses of a CNF at a timestep.
    pub fn translate(
        &self,
        cnf: &Cnf<Literal>,
        step: usize,
    ) -> Result<Vec<IntClause>, err::IndexError> {
        let mut clauses = Vec::with_capacity(cnf.len());
        for clause in cnf.clauses() {
            let mut translated = Vec::with_capacity(clause.len());
            for literal in clause {
                translated.push(self.literal(literal, step)?);
            }
            clauses.push(translated);
        }
        Ok(clauses)
    }

    /// The clauses of a CNF over a transition from the given timestep to the next.
    pub fn translate_framed(
        &self,
        cnf: &Cnf<Framed>,
        from: usize,
    ) -> Result<Vec<IntClause>, err::IndexError> {
        let mut clauses = Vec::with_capacity(cnf.len());
        for clause in cnf.clauses() {
            let mut translated = Vec::with_capacity(clause.len());
            for framed in clause {
                let step = match framed.frame {
                    Frame::Now => from,
                    Frame::Next => from + 1,
                };
                translated.push(self.literal(&framed.literal, step)?);
            }
            clauses.push(translated);
        }
        Ok(clauses)
    }

    /// The clauses of flat clause text, with unprimed atoms at the given timestep and primed atoms at the next.
    ///
    /// ```rust
    /// # use otter_bmc::clauses::ClauseBuilder;
    /// # use otter_bmc::index::Indexer;
    /// # use otter_bmc::specification::{Options, Source, Specification};
    /// let source = Source::default().enumerated("floor", ["0", "1"]);
    /// let options = Options { incremental: false, inertia: true };
    /// let spec = Specification::build(&source, options).unwrap();
    /// let index = Indexer::build(&spec, 1);
    /// let builder = ClauseBuilder::new(&spec, &index);
    ///
    /// assert_eq!(builder.translate_text("~floor=0 | floor'=1", 0).unwrap(), vec![vec![-1, 4]]);
    /// ```
    pub fn translate_text(&self, text: &str, step: usize) -> Result<Vec<IntClause>, ErrorKind> {
        let cnf = parse::cnf_text(text, self.spec.symbols())?;
        Ok(self.translate_framed(&cnf, step)?)
    }

    /// Prepends the negation of the activation variable of the timestep to each clause, in incremental mode.
    fn guard(&self, mut clauses: Vec<IntClause>, step: usize) -> Result<Vec<IntClause>, err::IndexError> {
        if self.index.incremental() {
            let guard = -(self.index.activation(step)? as IntLiteral);
            for clause in &mut clauses {
                clause.insert(0, guard);
            }
        }
        Ok(clauses)
    }

    /// The clauses of the initial constraint, at timestep 0.
    pub fn init_clauses(&self) -> Result<Vec<IntClause>, err::IndexError> {
        let clauses = self.translate(self.spec.init(), 0)?;
        self.guard(clauses, 0)
    }

    /// The clauses requiring each enumerated atom to take exactly one value at a timestep.
    pub fn domain_clauses(&self, step: usize) -> Result<Vec<IntClause>, err::IndexError> {
        let clauses = self.translate(self.spec.domain(), step)?;
        self.guard(clauses, step)
    }

    /// The clauses of each rule and of inertia, for the transition to the given timestep from the previous.
    ///
    /// There is no transition to timestep 0.
    pub fn transition_clauses(&self, step: usize) -> Result<Vec<IntClause>, err::IndexError> {
        let Some(from) = step.checked_sub(1) else {
            return Ok(Vec::default());
        };

        let mut clauses = Vec::default();
        for rule in self.spec.rules() {
            clauses.extend(self.translate_framed(&rule.cnf, from)?);
        }
        clauses.extend(self.translate_framed(self.spec.inertia(), from)?);

        log::trace!(target: targets::CLAUSES, "{} transition clauses to {step}", clauses.len());
        self.guard(clauses, step)
    }

    /// The clauses of a violation of some property at a timestep.
    pub fn violation_clauses(&self, step: usize) -> Result<Vec<IntClause>, err::IndexError> {
        let timed = self
            .spec
            .violation()
            .clauses()
            .iter()
            .map(|clause| {
                clause
                    .iter()
                    .map(|literal| TimedLiteral {
                        literal: *literal,
                        step,
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let mut clauses = Vec::with_capacity(timed.len());
        for clause in timed {
            let guard_step = clause.first().map_or(step, |literal| literal.step);

            let mut translated = Vec::with_capacity(clause.len() + 2);
            if self.index.incremental() {
                translated.push(-(self.index.activation(guard_step)? as IntLiteral));
            }
            for timed in &clause {
                translated.push(self.literal(&timed.literal, timed.step)?);
            }
            if self.index.incremental() && guard_step < self.index.bound() {
                translated.push(self.index.activation(guard_step + 1)? as IntLiteral);
            }
            clauses.push(translated);
        }

        Ok(clauses)
    }
}
