//! Clap-free settings for the fix pipeline.

use camino::Utf8PathBuf;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::str::FromStr;

/// Which rules may be fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FixRules {
    #[default]
    All,
    Only(Vec<String>),
}

impl FixRules {
    /// `None` when every rule is allowed.
    pub fn allow_list(&self) -> Option<BTreeSet<String>> {
        match self {
            FixRules::All => None,
            FixRules::Only(rules) => Some(rules.iter().cloned().collect()),
        }
    }
}

impl FromStr for FixRules {
    type Err = Infallible;

    /// `"all"` (or an empty string) allows everything; anything else is a comma-separated
    /// allow-list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(FixRules::All);
        }
        Ok(FixRules::Only(
            s.split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from)
                .collect(),
        ))
    }
}

/// Settings for a fix run.
#[derive(Debug, Clone, Default)]
pub struct FixSettings {
    pub fix_rules: FixRules,

    /// Write fixed files back through the write port. Otherwise fixed text is attached to the
    /// report as `updated_source`.
    pub save: bool,

    /// Log fix failures.
    pub verbose: bool,

    /// Catalog file replacing the built-in catalog.
    pub catalog: Option<Utf8PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_empty_allow_everything() {
        assert_eq!("all".parse::<FixRules>().unwrap(), FixRules::All);
        assert_eq!("ALL".parse::<FixRules>().unwrap(), FixRules::All);
        assert_eq!("".parse::<FixRules>().unwrap(), FixRules::All);
        assert!(FixRules::All.allow_list().is_none());
    }

    #[test]
    fn comma_list_is_trimmed() {
        let rules: FixRules = "TrailingWhitespace, NoTabCharacter,,".parse().unwrap();
        assert_eq!(
            rules,
            FixRules::Only(vec![
                "TrailingWhitespace".to_string(),
                "NoTabCharacter".to_string()
            ])
        );
        assert_eq!(rules.allow_list().unwrap().len(), 2);
    }

    #[test]
    fn defaults_keep_fixes_in_memory() {
        let settings = FixSettings::default();
        assert!(!settings.save);
        assert!(!settings.verbose);
        assert_eq!(settings.fix_rules, FixRules::All);
    }
}
