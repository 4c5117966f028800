//! Variable environment for formula evaluation.
//!
//! Bindings map a bare name (no `$`/`#` sigil) to a number or boolean. An
//! environment remembers the defaults it was created with, so `reset`
//! restores exactly that seed and discards everything `SET` wrote.

use crate::ast::Value;
use serde::Serialize;
use std::collections::BTreeMap;
use std::f64::consts;

/// The constants every new environment starts with
pub fn default_constants() -> BTreeMap<String, Value> {
    BTreeMap::from([
        ("PI".to_string(), Value::Number(consts::PI)),
        ("E".to_string(), Value::Number(consts::E)),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
    bindings: BTreeMap<String, Value>,
    #[serde(skip)]
    defaults: BTreeMap<String, Value>,
}

impl Environment {
    /// Create an environment seeded with `PI` and `E`
    pub fn new() -> Self {
        Self::with_defaults(default_constants())
    }

    /// Create an environment with no constants at all
    pub fn empty() -> Self {
        Self::with_defaults(BTreeMap::<String, Value>::new())
    }

    /// Create an environment with a host-chosen constant set
    pub fn with_defaults<I, K>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let defaults: BTreeMap<String, Value> = defaults
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        Environment {
            bindings: defaults.clone(),
            defaults,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Bind `name`, replacing any previous value (including a default)
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        tracing::debug!(%name, %value, "environment write");
        self.bindings.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bindings in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drop every user binding and restore the defaults
    pub fn reset(&mut self) {
        tracing::debug!(defaults = self.defaults.len(), "environment reset");
        self.bindings = self.defaults.clone();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
