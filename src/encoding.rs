/*!
The clauses of a bounded encoding, grouped by the timestep at which they are first required.

In incremental mode each group is added to an engine once, when the driver reaches its timestep, and the encoding as a whole is the CNF written to the DIMACS artifact.
In monolithic mode the encoding is of the bound-*K* instance alone: violation clauses are present only at *K*, and no clause is guarded.

# Artifacts

- [write_dimacs](Encoding::write_dimacs) writes `p cnf <nvars> <nclauses>` followed by one clause per line, each terminated by `0`.
  In incremental mode the header is preceded by a comment line stating the assumptions of each step.
- [write_activation_map](Encoding::write_activation_map) writes the activation variable of each timestep, in order, comma separated on a single line.
  The map is empty in monolithic mode.

The assumptions of step *t* are the activation variables of steps 0..=*t*, together with the negated activation variable of step *t + 1* when *t < K*.
Without the negated variable of step *t + 1* the violation clauses of step *t* are satisfied by activating step *t + 1*, and so a consumer of the artifacts must assume it too.

```rust
# use otter_bmc::encoding::Encoding;
# use otter_bmc::index::Indexer;
# use otter_bmc::specification::{Options, Source, Specification};
let source = Source::default()
    .boolean("door_open")
    .init("door_open=false")
    .safety("~door_open");
let spec = Specification::build(&source, Options::default()).unwrap();
let index = Indexer::build(&spec, 1);
let encoding = Encoding::build(&spec, &index).unwrap();

// With no rules, inertia keeps the door as it was.
let mut dimacs = vec![];
encoding.write_dimacs(&mut dimacs).unwrap();
assert_eq!(
    String::from_utf8(dimacs).unwrap(),
    "c step t assumes activation map entries 0..=t, and the negation of entry t + 1 when t < 1\np cnf 4 5\n-1 -2 0\n-1 2 3 0\n-3 -4 2 0\n-3 4 -2 0\n-3 4 0\n"
);

let mut map = vec![];
encoding.write_activation_map(&mut map).unwrap();
assert_eq!(String::from_utf8(map).unwrap(), "1,3\n");
```
*/

use std::io::Write;

use crate::{
    clauses::ClauseBuilder,
    index::Indexer,
    misc::log::targets::{self},
    specification::Specification,
    structures::clause::{as_dimacs, IntClause, Var},
    types::err::{self},
};

/// The clauses first required at some timestep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepClauses {
    pub step: usize,

    /// Clauses of the initial constraint, only present at timestep 0.
    pub init: Vec<IntClause>,

    pub domain: Vec<IntClause>,

    /// Clauses of the transition to the timestep, empty at timestep 0.
    pub transition: Vec<IntClause>,

    pub violation: Vec<IntClause>,
}

impl StepClauses {
    /// Every clause of the step, in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &IntClause> {
        self.init
            .iter()
            .chain(self.domain.iter())
            .chain(self.transition.iter())
            .chain(self.violation.iter())
    }

    pub fn len(&self) -> usize {
        self.init.len() + self.domain.len() + self.transition.len() + self.violation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The clauses of a bounded encoding.
#[derive(Clone, Debug)]
pub struct Encoding {
    nvars: usize,

    bound: usize,

    steps: Vec<StepClauses>,

    activations: Vec<Var>,
}

impl Encoding {
    /// The encoding of a specification, up to the bound of the index.
    pub fn build(spec: &Specification, index: &Indexer) -> Result<Self, err::IndexError> {
        let builder = ClauseBuilder::new(spec, index);
        let bound = index.bound();

        let mut steps = Vec::with_capacity(bound + 1);
        for step in 0..=bound {
            let init = match step {
                0 => builder.init_clauses()?,
                _ => Vec::default(),
            };

            let violation = match index.incremental() || step == bound {
                true => builder.violation_clauses(step)?,
                false => Vec::default(),
            };

            steps.push(StepClauses {
                step,
                init,
                domain: builder.domain_clauses(step)?,
                transition: builder.transition_clauses(step)?,
                violation,
            });
        }

        let encoding = Encoding {
            nvars: index.nvars(),
            bound,
            steps,
            activations: index.activation_map(),
        };

        log::info!(target: targets::ENCODING, "{} variables and {} clauses", encoding.nvars, encoding.clause_count());
        Ok(encoding)
    }

    pub fn nvars(&self) -> usize {
        self.nvars
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    pub fn steps(&self) -> &[StepClauses] {
        &self.steps
    }

    /// The activation variable of each timestep.
    pub fn activations(&self) -> &[Var] {
        &self.activations
    }

    pub fn clause_count(&self) -> usize {
        self.steps.iter().map(|step| step.len()).sum()
    }

    /// Every clause, grouped by timestep.
    pub fn clauses(&self) -> impl Iterator<Item = &IntClause> {
        self.steps.iter().flat_map(|step| step.iter())
    }

    /// Writes the encoding in DIMACS form.
    pub fn write_dimacs(&self, mut writer: impl Write) -> std::io::Result<()> {
        if !self.activations.is_empty() {
            writeln!(
                writer,
                "c step t assumes activation map entries 0..=t, and the negation of entry t + 1 when t < {}",
                self.bound
            )?;
        }
        writeln!(writer, "p cnf {} {}", self.nvars, self.clause_count())?;
        for clause in self.clauses() {
            writeln!(writer, "{}", as_dimacs(clause))?;
        }
        writer.flush()
    }

    /// Writes the activation variables, comma separated on a single line.
    ///
    /// The map alone does not give the assumptions of a step, as each step *t < K* also assumes the negation of the activation variable of step *t + 1*.
    pub fn write_activation_map(&self, mut writer: impl Write) -> std::io::Result<()> {
        let map = self
            .activations
            .iter()
            .map(|var| var.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{map}")?;
        writer.flush()
    }
}
