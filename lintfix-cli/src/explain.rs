//! Text and JSON rendering for the `lintfix list-rules` and `lintfix explain` commands.

use lintfix_catalog::{Catalog, FixDescriptor, FixStrategy};
use std::fmt::Write as _;

const RULE: &str =
    "================================================================================";
const SECTION: &str =
    "--------------------------------------------------------------------------------";

/// One row per rule, in catalog (name) order.
pub fn render_rule_table(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("Fixable rules:\n\n");
    let _ = writeln!(out, "  {:<24} {:<6} {:>8}  DESCRIPTION", "RULE", "SCOPE", "PRIORITY");
    let _ = writeln!(out, "  {:<24} {:<6} {:>8}  -----------", "----", "-----", "--------");
    for (name, descriptor) in catalog.iter() {
        let _ = writeln!(
            out,
            "  {:<24} {:<6} {:>8}  {}",
            name,
            descriptor.scope.as_str(),
            descriptor.priority,
            descriptor.description.as_deref().unwrap_or("")
        );
    }
    out.push('\n');
    out.push_str("Use 'lintfix explain <rule>' for details.\n");
    out
}

pub fn rules_json(catalog: &Catalog) -> serde_json::Value {
    let rules: Vec<_> = catalog
        .iter()
        .map(|(name, d)| {
            serde_json::json!({
                "rule": name,
                "scope": d.scope.as_str(),
                "priority": d.priority,
                "unitary": d.unitary,
                "fix": d.fix.kind(),
                "triggers": d.triggers,
                "description": d.description,
            })
        })
        .collect();
    serde_json::Value::Array(rules)
}

/// Full explanation of one rule's fix.
pub fn render_explanation(name: &str, d: &FixDescriptor) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "RULE: {name}");
    let _ = writeln!(out, "{RULE}");
    out.push('\n');
    let _ = writeln!(out, "Scope:     {}", d.scope.as_str());
    let _ = writeln!(out, "Priority:  {}", d.priority);
    if d.dedup_per_file() {
        out.push_str("Applied:   once per file\n");
    } else {
        out.push_str("Applied:   once per violation\n");
    }
    out.push('\n');

    if let Some(description) = &d.description {
        out.push_str("DESCRIPTION\n");
        let _ = writeln!(out, "{SECTION}");
        let _ = writeln!(out, "{description}");
        out.push('\n');
    }

    out.push_str("FIX\n");
    let _ = writeln!(out, "{SECTION}");
    match &d.fix {
        FixStrategy::Template(t) => {
            let _ = writeln!(out, "Replace:   {}", t.before);
            let _ = writeln!(out, "With:      {}", t.after);
        }
        FixStrategy::Transform(t) => {
            let _ = writeln!(out, "Built-in {} transform.", t.scope().as_str());
        }
    }
    out.push('\n');

    if !d.variables.is_empty() {
        out.push_str("VARIABLES (captured from the violation message)\n");
        let _ = writeln!(out, "{SECTION}");
        for v in &d.variables {
            let _ = writeln!(out, "  {{{{{}}}}}  /{}/  group {}", v.name, v.regex, v.group);
        }
        out.push('\n');
    }

    if !d.triggers.is_empty() {
        out.push_str("ALSO TRIGGERS\n");
        let _ = writeln!(out, "{SECTION}");
        for t in &d.triggers {
            let _ = writeln!(out, "  - {t}");
        }
        out.push('\n');
    }

    out
}
