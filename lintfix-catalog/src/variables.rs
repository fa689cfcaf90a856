use crate::descriptor::VariableDecl;
use anyhow::Context;
use regex::Regex;
use tracing::debug;

/// Resolved variable bindings, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    entries: Vec<(String, String)>,
}

impl Variables {
    /// Bind `name`, overwriting an earlier binding of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::default();
        for (k, v) in iter {
            vars.insert(k, v);
        }
        vars
    }
}

/// Extracts named values from a diagnostic message.
pub trait VariableEvaluator: Send + Sync {
    fn evaluate(&self, decls: &[VariableDecl], message: &str) -> anyhow::Result<Variables>;
}

/// Evaluates each declaration's regex against the message and binds the configured capture
/// group. Declarations that do not match are left unbound.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexVariableEvaluator;

impl VariableEvaluator for RegexVariableEvaluator {
    fn evaluate(&self, decls: &[VariableDecl], message: &str) -> anyhow::Result<Variables> {
        let mut vars = Variables::default();
        for decl in decls {
            let re = Regex::new(&decl.regex)
                .with_context(|| format!("compile regex for variable {}", decl.name))?;
            match re
                .captures(message)
                .and_then(|caps| caps.get(decl.group))
            {
                Some(m) => vars.insert(decl.name.as_str(), m.as_str()),
                None => debug!(
                    variable = decl.name.as_str(),
                    diagnostic = message,
                    "variable did not match diagnostic message"
                ),
            }
        }
        Ok(vars)
    }
}
