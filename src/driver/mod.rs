/*!
The bmc loop.

A [Driver] checks a [Specification] for counterexamples of each length 0, 1, …, *K* in turn, stopping at the first step with a result other than unsatisfiable.

# Incremental mode

A single engine [session](Session) is acquired for the run.
At each step *t*:
1. The clauses first required at *t* are added, once.
2. The activation literals of steps 0..=*t* are assumed, together with the negated activation literal of step *t + 1* when *t < K*.
3. The engine is asked to solve.

The activation assumptions grow by one literal each step, and are never retracted.
The negated activation literal of the next step, the *frontier*, keeps the violation clauses of step *t* active: each such clause carries the activation literal of step *t + 1*, and so is satisfied trivially once step *t + 1* is activated.

# Monolithic mode

The bound-*t* instance is encoded afresh for each step *t*, and solved in a freshly acquired session without assumptions.
The session is released before the next step.

# Outcomes

- Satisfiable at *t*: the valuation is decoded to a [Counterexample] of *t* transitions, and the run ends.
- Unsatisfiable at *t*: the run continues to *t + 1*, or ends [safe](Outcome::SafeUpTo) if *t = K*.
- Unknown at *t*: the run ends [inconclusive](Outcome::Inconclusive), without retry.

In every case, and on every error, the session is released as it is dropped.

[run](Driver::run) builds the index and encoding of each bound itself, while [run_with](Driver::run_with) takes those of the bound *K* from a caller which has already built them, e.g. to write artifacts.
*/

mod trace;
pub use trace::{Assignment, Counterexample, State};

use crossbeam::channel::unbounded;

use crate::{
    encoding::Encoding,
    engine::{Engine, Session, Status, Stop},
    index::Indexer,
    misc::log::targets::{self},
    specification::Specification,
    structures::clause::{int_literal, IntLiteral},
    types::err::{self, ErrorKind},
};

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No counterexample of at most the given number of steps exists.
    SafeUpTo(usize),

    /// A counterexample was found.
    Counterexample(Counterexample),

    /// The engine returned unknown at the given step.
    Inconclusive(usize),
}

/// The result of a single step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub step: usize,

    pub status: Status,

    /// The count of clauses given to the engine, up to and including the step.
    pub clauses: usize,

    /// The assumptions of the solve.
    pub assumptions: Vec<IntLiteral>,
}

/// A report of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub steps: Vec<StepReport>,

    pub outcome: Outcome,
}

/// Checks a specification up to a bound.
pub struct Driver<'s> {
    spec: &'s Specification,

    bound: usize,

    stop: Stop,
}

impl<'s> Driver<'s> {
    pub fn new(spec: &'s Specification, bound: usize) -> Self {
        Driver {
            spec,
            bound,
            stop: Stop::default(),
        }
    }

    /// Replaces the stop signal given to each solve.
    pub fn with_stop(mut self, stop: Stop) -> Self {
        self.stop = stop;
        self
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    /// The assumptions of step `step` in incremental mode.
    pub fn assumptions(&self, index: &Indexer, step: usize) -> Result<Vec<IntLiteral>, err::IndexError> {
        let mut assumptions = Vec::with_capacity(step + 2);
        for t in 0..=step {
            assumptions.push(int_literal(index.activation(t)?, true));
        }
        if step < self.bound {
            assumptions.push(int_literal(index.activation(step + 1)?, false));
        }
        Ok(assumptions)
    }

    /// Runs the bmc loop, with engines from the factory.
    ///
    /// The observer is called with the report of each step, as the step completes.
    pub fn run<E, F, O>(&self, mut factory: F, mut observer: O) -> Result<Report, ErrorKind>
    where
        E: Engine,
        F: FnMut() -> Result<E, err::EngineError>,
        O: FnMut(&StepReport),
    {
        log::info!(target: targets::DRIVER, "Checking {} properties up to step {}", self.spec.properties().len(), self.bound);

        match self.spec.incremental() {
            true => {
                let index = Indexer::build(self.spec, self.bound);
                let encoding = Encoding::build(self.spec, &index)?;
                self.run_incremental(&index, &encoding, &mut factory, &mut observer)
            }
            false => self.run_monolithic(None, &mut factory, &mut observer),
        }
    }

    /// As [run](Driver::run), though with the index and encoding of the bound of the driver already built.
    ///
    /// In monolithic mode the encoding is used for the final bound only, and each lesser bound is encoded afresh.
    pub fn run_with<E, F, O>(
        &self,
        index: &Indexer,
        encoding: &Encoding,
        mut factory: F,
        mut observer: O,
    ) -> Result<Report, ErrorKind>
    where
        E: Engine,
        F: FnMut() -> Result<E, err::EngineError>,
        O: FnMut(&StepReport),
    {
        for found in [index.bound(), encoding.bound()] {
            if found != self.bound {
                return Err(ErrorKind::from(err::IndexError::Bound {
                    expected: self.bound,
                    found,
                }));
            }
        }

        log::info!(target: targets::DRIVER, "Checking {} properties up to step {}", self.spec.properties().len(), self.bound);

        match self.spec.incremental() {
            true => self.run_incremental(index, encoding, &mut factory, &mut observer),
            false => self.run_monolithic(Some((index, encoding)), &mut factory, &mut observer),
        }
    }

    fn run_incremental<E, F, O>(
        &self,
        index: &Indexer,
        encoding: &Encoding,
        factory: &mut F,
        observer: &mut O,
    ) -> Result<Report, ErrorKind>
    where
        E: Engine,
        F: FnMut() -> Result<E, err::EngineError>,
        O: FnMut(&StepReport),
    {
        let mut session = Session::acquire(|| factory())?;
        let mut steps = Vec::with_capacity(self.bound + 1);
        let mut clauses = 0;

        for step_clauses in encoding.steps() {
            let step = step_clauses.step;

            for clause in step_clauses.iter() {
                session.add_clause(clause)?;
            }
            clauses += step_clauses.len();
            log::debug!(target: targets::DRIVER, "Step {step}: {} new clauses", step_clauses.len());

            let assumptions = self.assumptions(index, step)?;
            for assumption in &assumptions {
                session.assume(*assumption)?;
            }

            let status = Status::from_code(session.solve(&self.stop)?)?;
            log::info!(target: targets::DRIVER, "Step {step}: {status}");

            let report = StepReport {
                step,
                status,
                clauses,
                assumptions,
            };
            observer(&report);
            steps.push(report);

            match status {
                Status::Unsatisfiable => continue,

                Status::Satisfiable => {
                    let trace = Counterexample::decode(&*session, self.spec, index, step)?;
                    return Ok(Report {
                        steps,
                        outcome: Outcome::Counterexample(trace),
                    });
                }

                Status::Unknown => {
                    return Ok(Report {
                        steps,
                        outcome: Outcome::Inconclusive(step),
                    })
                }
            }
        }

        Ok(Report {
            steps,
            outcome: Outcome::SafeUpTo(self.bound),
        })
    }

    fn run_monolithic<E, F, O>(
        &self,
        last: Option<(&Indexer, &Encoding)>,
        factory: &mut F,
        observer: &mut O,
    ) -> Result<Report, ErrorKind>
    where
        E: Engine,
        F: FnMut() -> Result<E, err::EngineError>,
        O: FnMut(&StepReport),
    {
        let mut steps = Vec::with_capacity(self.bound + 1);

        for step in 0..=self.bound {
            let built;
            let (index, encoding) = match last {
                Some(given) if step == self.bound => given,
                _ => {
                    let index = Indexer::build(self.spec, step);
                    let encoding = Encoding::build(self.spec, &index)?;
                    built = (index, encoding);
                    (&built.0, &built.1)
                }
            };

            let mut session = Session::acquire(|| factory())?;
            for clause in encoding.clauses() {
                session.add_clause(clause)?;
            }

            let status = Status::from_code(session.solve(&self.stop)?)?;
            log::info!(target: targets::DRIVER, "Bound {step}: {status}");

            let report = StepReport {
                step,
                status,
                clauses: encoding.clause_count(),
                assumptions: Vec::default(),
            };
            observer(&report);
            steps.push(report);

            match status {
                Status::Unsatisfiable => continue,

                Status::Satisfiable => {
                    let trace = Counterexample::decode(&*session, self.spec, index, step)?;
                    return Ok(Report {
                        steps,
                        outcome: Outcome::Counterexample(trace),
                    });
                }

                Status::Unknown => {
                    return Ok(Report {
                        steps,
                        outcome: Outcome::Inconclusive(step),
                    })
                }
            }
        }

        Ok(Report {
            steps,
            outcome: Outcome::SafeUpTo(self.bound),
        })
    }
}

/// Checks each property of a specification on its own, in parallel, with an engine from the factory for each.
///
/// Reports are returned in the order of the properties, each paired with the text of the property.
pub fn check_each_property<E, F>(
    spec: &Specification,
    bound: usize,
    factory: F,
    stop: &Stop,
) -> Result<Vec<(String, Report)>, ErrorKind>
where
    E: Engine,
    F: Fn() -> Result<E, err::EngineError> + Sync,
{
    let restricted: Vec<Specification> = (0..spec.properties().len())
        .filter_map(|property| spec.restrict(property))
        .collect();

    let (tx, rx) = unbounded::<(usize, Result<Report, ErrorKind>)>();
    let factory = &factory;

    let scoped = crossbeam::scope(|scope| {
        for (property, spec) in restricted.iter().enumerate() {
            let tx = tx.clone();
            let stop = stop.clone();
            scope.spawn(move |_| {
                log::debug!(target: targets::DRIVER, "Checking property {property}");
                let result = Driver::new(spec, bound)
                    .with_stop(stop)
                    .run(factory, |_| {});
                let _ = tx.send((property, result));
            });
        }
    });
    drop(tx);

    if scoped.is_err() {
        return Err(ErrorKind::from(err::EngineError::Panicked));
    }

    let mut results: Vec<Option<Report>> = vec![None; restricted.len()];
    for (property, result) in rx {
        results[property] = Some(result?);
    }

    let mut reports = Vec::with_capacity(restricted.len());
    for (property, report) in restricted.iter().zip(results) {
        let Some(report) = report else {
            return Err(ErrorKind::from(err::EngineError::Panicked));
        };
        let text = property
            .properties()
            .first()
            .map(|p| p.text.clone())
            .unwrap_or_default();
        reports.push((text, report));
    }

    Ok(reports)
}
