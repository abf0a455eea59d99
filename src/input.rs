/*!
Reading a [Source] from a JSON document.

A document has four fields, each optional:

- `states`, a map from a type name to a map from atom names to domains.
  Atoms of the reserved type `boolean` are boolean, and any domain given is ignored.
  Atoms of any other type are enumerated over the given list of values, with numbers and booleans read as text.
- `init`, the initial constraint, as either a comma separated string of formulas, a list of formulas, or a map from atoms to values.
- `transitions`, a map from rule names to an object with `preconditions` and `effects`, each a list of formulas or a map from atoms to values.
- `safety`, a list of formulas.

Declaration order in the document is kept, and so variable allocation follows the order in which atoms are written.

```rust
# use otter_bmc::input::source_from_str;
let source = source_from_str(r#"{
    "states": {
        "boolean": { "door_open": [] },
        "int": { "floor": [0, 1, 2] }
    },
    "init": "door_open=false, floor=0",
    "transitions": {
        "up": { "preconditions": ["floor=0"], "effects": { "floor": 1 } }
    },
    "safety": ["~door_open"]
}"#).unwrap();

assert_eq!(source.states[1].domain, Some(vec!["0".to_string(), "1".to_string(), "2".to_string()]));
assert_eq!(source.init, vec!["door_open=false", "floor=0"]);
assert_eq!(source.rules[0].effects, vec!["floor=1"]);
```
*/

use std::{fs::File, io::BufReader, io::Read, path::Path};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    misc::log::targets::{self},
    specification::{Declaration, RuleSource, Source},
    types::err::{self},
};

/// The reserved type name of boolean atoms.
pub const BOOLEAN_TYPE: &str = "boolean";

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    states: Map<String, Value>,

    #[serde(default)]
    init: Option<Formulas>,

    #[serde(default)]
    transitions: Map<String, Value>,

    #[serde(default)]
    safety: Vec<String>,
}

/// The ways a collection of formulas may be written.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Formulas {
    Text(String),
    List(Vec<String>),
    Assignment(Map<String, Value>),
}

#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    preconditions: Option<Formulas>,

    #[serde(default)]
    effects: Option<Formulas>,
}

/// Reads a source from a reader of a JSON document.
pub fn read_source(reader: impl Read) -> Result<Source, err::InputError> {
    let document: Document = match serde_json::from_reader(reader) {
        Ok(document) => document,
        Err(e) => return Err(err::InputError::Json(e.to_string())),
    };
    source_from_document(document)
}

/// Reads a source from the text of a JSON document.
pub fn source_from_str(text: &str) -> Result<Source, err::InputError> {
    let document: Document = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(e) => return Err(err::InputError::Json(e.to_string())),
    };
    source_from_document(document)
}

/// Reads a source from the JSON document at the given path.
pub fn load(path: impl AsRef<Path>) -> Result<Source, err::InputError> {
    let path = path.as_ref();
    log::info!(target: targets::SPEC, "Reading {}", path.display());
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return Err(err::InputError::Io(format!("{}: {e}", path.display()))),
    };
    read_source(BufReader::new(file))
}

fn source_from_document(document: Document) -> Result<Source, err::InputError> {
    let mut source = Source::default();

    for (type_name, atoms) in document.states {
        let Value::Object(atoms) = atoms else {
            return Err(shape(format!("the atoms of type '{type_name}' are not a map")));
        };

        for (name, domain) in atoms {
            let domain = match type_name.as_str() {
                BOOLEAN_TYPE => None,
                _ => {
                    let Value::Array(values) = domain else {
                        return Err(shape(format!("the domain of '{name}' is not a list")));
                    };
                    let mut texts = Vec::with_capacity(values.len());
                    for value in &values {
                        texts.push(value_text(value, &name)?);
                    }
                    Some(texts)
                }
            };
            source.states.push(Declaration { name, domain });
        }
    }

    if let Some(init) = document.init {
        source.init = formulas(init, true)?;
    }

    for (name, body) in document.transitions {
        let rule: RuleDocument = match serde_json::from_value(body) {
            Ok(rule) => rule,
            Err(e) => return Err(shape(format!("the rule '{name}' is malformed: {e}"))),
        };

        let preconditions = match rule.preconditions {
            Some(preconditions) => formulas(preconditions, false)?,
            None => Vec::default(),
        };
        let effects = match rule.effects {
            Some(effects) => formulas(effects, false)?,
            None => Vec::default(),
        };

        source.rules.push(RuleSource {
            name,
            preconditions,
            effects,
        });
    }

    source.safety = document.safety;

    log::debug!(target: targets::SPEC, "Read {} atoms and {} rules", source.states.len(), source.rules.len());
    Ok(source)
}

/// The formulas of some collection.
/// Text is split on commas only if `split` is set.
fn formulas(formulas: Formulas, split: bool) -> Result<Vec<String>, err::InputError> {
    match formulas {
        Formulas::Text(text) => match split {
            true => Ok(text
                .split(',')
                .map(str::trim)
                .filter(|formula| !formula.is_empty())
                .map(str::to_owned)
                .collect()),
            false => Ok(vec![text]),
        },

        Formulas::List(list) => Ok(list),

        Formulas::Assignment(map) => {
            let mut list = Vec::with_capacity(map.len());
            for (atom, value) in &map {
                list.push(format!("{atom}={}", value_text(value, atom)?));
            }
            Ok(list)
        }
    }
}

/// A value as text, for strings, numbers, and booleans.
fn value_text(value: &Value, atom: &str) -> Result<String, err::InputError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(boolean) => Ok(boolean.to_string()),
        _ => Err(shape(format!("a value of '{atom}' is not a string, number, or boolean"))),
    }
}

fn shape(reason: String) -> err::InputError {
    err::InputError::Shape(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_domains_ignored() {
        let source = source_from_str(r#"{ "states": { "boolean": { "lamp": ["x"] } } }"#).unwrap();
        assert_eq!(source.states[0].name, "lamp");
        assert_eq!(source.states[0].domain, None);
    }

    #[test]
    fn declaration_order_kept() {
        let source = source_from_str(
            r#"{ "states": { "int": { "zone": [1, 2] }, "boolean": { "b": [], "a": [] } } }"#,
        )
        .unwrap();
        let names: Vec<_> = source.states.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["zone", "b", "a"]);
    }

    #[test]
    fn init_forms() {
        let text = source_from_str(r#"{ "init": "a, b=1 ," }"#).unwrap();
        assert_eq!(text.init, vec!["a", "b=1"]);

        let list = source_from_str(r#"{ "init": ["a | b", "c"] }"#).unwrap();
        assert_eq!(list.init, vec!["a | b", "c"]);

        let map = source_from_str(r#"{ "init": { "a": false, "b": 1 } }"#).unwrap();
        assert_eq!(map.init, vec!["a=false", "b=1"]);
    }

    #[test]
    fn malformed() {
        assert!(matches!(source_from_str("{"), Err(err::InputError::Json(_))));
        assert!(matches!(
            source_from_str(r#"{ "states": { "int": { "zone": 3 } } }"#),
            Err(err::InputError::Shape(_))
        ));
        assert!(matches!(
            source_from_str(r#"{ "transitions": { "r": { "effects": 3 } } }"#),
            Err(err::InputError::Shape(_))
        ));
    }
}
