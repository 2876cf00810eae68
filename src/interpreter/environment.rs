use std::collections::HashMap;

use super::value::Value;

/// The single process-wide name→value mapping. `If`, `While` and
/// `TryCatch` bodies all mutate the same instance, there are no nested
/// scopes in this language.
#[derive(Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Currently bound names, sorted, for unbound-variable error messages.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
