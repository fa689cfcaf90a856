use crate::descriptor::FixDescriptor;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Read-only lookup from rule name to fix descriptor.
///
/// Only fixable rules are present: a rule without a remedy simply has no descriptor.
pub trait RuleCatalog: Send + Sync {
    fn descriptor(&self, rule: &str) -> Option<Arc<FixDescriptor>>;
}

/// Map-backed catalog, ordered by rule name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rules: BTreeMap<String, Arc<FixDescriptor>>,
}

impl Catalog {
    /// A catalog with no fixable rules.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule: impl Into<String>, descriptor: FixDescriptor) {
        self.rules.insert(rule.into(), Arc::new(descriptor));
    }

    pub fn with_rule(mut self, rule: impl Into<String>, descriptor: FixDescriptor) -> Self {
        self.insert(rule, descriptor);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FixDescriptor)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleCatalog for Catalog {
    fn descriptor(&self, rule: &str) -> Option<Arc<FixDescriptor>> {
        self.rules.get(rule).cloned()
    }
}
