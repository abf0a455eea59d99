//! The textual description of a transition system, before resolution against a symbol table.
//!
//! A source is usually [read from JSON](crate::input), though may also be built directly:
//!
//! ```rust
//! # use otter_bmc::specification::Source;
//! let source = Source::default()
//!     .enumerated("floor", ["0", "1", "2"])
//!     .init("floor=0")
//!     .rule("up_one", ["floor=0"], ["floor=1"])
//!     .rule("up_two", ["floor=1"], ["floor=2"])
//!     .safety("floor!=2 | floor=2");
//!
//! assert_eq!(source.states.len(), 1);
//! assert_eq!(source.rules[1].preconditions, vec!["floor=1"]);
//! ```

/// A declared state variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,

    /// The values of an enumerated variable, or none for a boolean variable.
    pub domain: Option<Vec<String>>,
}

/// A named transition rule, as lists of formulas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSource {
    pub name: String,

    /// Formulas over the current state, conjoined.
    /// If there are no preconditions the rule is always enabled.
    pub preconditions: Vec<String>,

    /// Formulas over the next state, conjoined.
    pub effects: Vec<String>,
}

/// A transition system, as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Source {
    /// Declared state variables, in declaration order.
    pub states: Vec<Declaration>,

    /// Formulas constraining the initial state, conjoined.
    pub init: Vec<String>,

    pub rules: Vec<RuleSource>,

    /// Invariants, each of which should hold in every reachable state.
    pub safety: Vec<String>,
}

impl Source {
    pub fn boolean(mut self, name: impl Into<String>) -> Self {
        self.states.push(Declaration {
            name: name.into(),
            domain: None,
        });
        self
    }

    pub fn enumerated<V: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.states.push(Declaration {
            name: name.into(),
            domain: Some(values.into_iter().map(|value| value.into()).collect()),
        });
        self
    }

    pub fn init(mut self, formula: impl Into<String>) -> Self {
        self.init.push(formula.into());
        self
    }

    pub fn rule<P, E>(mut self, name: impl Into<String>, preconditions: P, effects: E) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        self.rules.push(RuleSource {
            name: name.into(),
            preconditions: preconditions.into_iter().map(|p| p.into()).collect(),
            effects: effects.into_iter().map(|e| e.into()).collect(),
        });
        self
    }

    pub fn safety(mut self, formula: impl Into<String>) -> Self {
        self.safety.push(formula.into());
        self
    }
}
