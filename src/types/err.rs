//! Error types used in the library.
//!
//! - Specification errors are fatal for a run: no artifact is written and no solve is attempted.
//! - Index errors highlight a clause referring to a variable which was never allocated.
//!   This is an internal invariant violation, and is always propagated.
//! - Engine errors are fatal, though the engine is still released by the [session](crate::engine::Session) which owns it.
//!
//! Names of the error enums --- for the most part --- overlap with the structures they relate to.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::{index::VarKey, structures::clause::IntLiteral};

/// The union of the errors in this module.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Config(ConfigError),
    Engine(EngineError),
    Index(IndexError),
    Input(InputError),
    Spec(SpecError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Engine(e) => write!(f, "engine: {e}"),
            Self::Index(e) => write!(f, "index: {e}"),
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Spec(e) => write!(f, "specification: {e}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors when configuring a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// Some option was given a value outside of its range.
    OutOfRange { name: &'static str, value: String },
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { name, value } => write!(f, "{value} is out of range for {name}"),
        }
    }
}

/// Errors from an engine, or from the interaction with an engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// The engine could not be initialised.
    Init(String),

    /// The engine returned a status code outside of the IPASIR codes.
    UnexpectedStatus(i32),

    /// The literal 0 was given as part of a clause or as an assumption.
    ZeroLiteral,

    /// The engine was used after being released.
    Released,

    /// Conflict analysis failed.
    /// This is unexpected, and most likely corruption of the trail.
    Analysis(AnalysisError),

    /// A thread checking some property panicked.
    Panicked,
}

impl From<EngineError> for ErrorKind {
    fn from(e: EngineError) -> Self {
        ErrorKind::Engine(e)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init(reason) => write!(f, "failed to initialise: {reason}"),
            Self::UnexpectedStatus(code) => write!(f, "unexpected status code {code}"),
            Self::ZeroLiteral => write!(f, "0 is not a literal"),
            Self::Released => write!(f, "used after release"),
            Self::Analysis(e) => write!(f, "analysis failed: {e:?}"),
            Self::Panicked => write!(f, "a checking thread panicked"),
        }
    }
}

/// Noted errors during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// A literal on the trail at the conflict level had no reason, though it was not the decision of the level.
    MissingReason,

    /// The trail was exhausted before a unique implication point was found.
    NoAssertion,
}

impl From<AnalysisError> for EngineError {
    fn from(e: AnalysisError) -> Self {
        EngineError::Analysis(e)
    }
}

/// Errors from the variable index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexError {
    /// Some key was never allocated a variable.
    Unallocated(VarKey),

    /// Some integer is not a variable of the index.
    UnknownVariable(IntLiteral),

    /// An index or encoding was built for a bound other than the one expected.
    Bound { expected: usize, found: usize },
}

impl From<IndexError> for ErrorKind {
    fn from(e: IndexError) -> Self {
        ErrorKind::Index(e)
    }
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unallocated(key) => write!(f, "no variable was allocated for {key:?}"),
            Self::UnknownVariable(literal) => write!(f, "{literal} is not an indexed variable"),
            Self::Bound { expected, found } => write!(f, "expected bound {expected}, found bound {found}"),
        }
    }
}

/// Errors when reading an input document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputError {
    /// The document could not be read.
    Io(String),

    /// The document is not valid JSON, or not of the expected form.
    Json(String),

    /// Some part of the document has an unexpected shape.
    Shape(String),
}

impl From<InputError> for ErrorKind {
    fn from(e: InputError) -> Self {
        ErrorKind::Input(e)
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "{e}"),
            Self::Shape(e) => write!(f, "{e}"),
        }
    }
}

/// Errors when parsing the text of a formula.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    /// The text being parsed.
    pub text: String,

    /// The byte offset at which the parse failed.
    pub position: usize,

    /// What was expected, roughly.
    pub reason: &'static str,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at offset {} of \"{}\"",
            self.reason, self.position, self.text
        )
    }
}

/// Errors when building a specification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SpecError {
    /// Malformed formula text.
    FormulaSyntax(ParseError),

    /// A formula refers to an atom which was not declared.
    UnknownAtom(String),

    /// A literal compares an atom with a value outside of the domain of the atom.
    DomainMismatch { atom: String, value: String },

    /// An enumerated atom was used without a value.
    MissingValue(String),

    /// Some atom was declared more than once.
    DuplicateAtom(String),

    /// An enumerated atom was declared with no values.
    EmptyDomain(String),

    /// An enumerated atom was declared with some value more than once.
    DuplicateValue { atom: String, value: String },
}

impl From<SpecError> for ErrorKind {
    fn from(e: SpecError) -> Self {
        ErrorKind::Spec(e)
    }
}

impl From<ParseError> for SpecError {
    fn from(e: ParseError) -> Self {
        SpecError::FormulaSyntax(e)
    }
}

impl std::fmt::Display for SpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FormulaSyntax(e) => write!(f, "syntax error, {e}"),
            Self::UnknownAtom(atom) => write!(f, "unknown atom '{atom}'"),
            Self::DomainMismatch { atom, value } => {
                write!(f, "'{value}' is not in the domain of '{atom}'")
            }
            Self::MissingValue(atom) => write!(f, "'{atom}' is enumerated and requires a value"),
            Self::DuplicateAtom(atom) => write!(f, "'{atom}' is declared more than once"),
            Self::EmptyDomain(atom) => write!(f, "'{atom}' has an empty domain"),
            Self::DuplicateValue { atom, value } => {
                write!(f, "'{value}' appears more than once in the domain of '{atom}'")
            }
        }
    }
}
