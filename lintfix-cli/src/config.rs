//! Configuration file loading for lintfix.
//!
//! Discovers and loads `lintfix.toml` from the source root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use lintfix_core::settings::{FixRules, FixSettings};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "lintfix.toml";

/// Top-level configuration from lintfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LintfixConfig {
    pub fix: FixConfig,
}

/// `[fix]` section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixConfig {
    /// `"all"` or a comma-separated allow-list of rule names.
    pub fixrules: Option<String>,

    /// Write fixed files in place.
    pub save: bool,

    /// Log fixes that could not be applied.
    pub verbose: bool,

    /// Catalog file replacing the built-in rules, relative to the source root.
    pub catalog: Option<Utf8PathBuf>,
}

/// Discover the lintfix.toml config file in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a lintfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<LintfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<LintfixConfig> {
    let config: LintfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `root`, or return the default if there is none.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<LintfixConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(LintfixConfig::default()),
    }
}

/// Fix-related CLI flags, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct FixOverrides {
    pub fixrules: Option<String>,
    pub save: bool,
    pub verbose: bool,
    pub catalog: Option<Utf8PathBuf>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: LintfixConfig,
    root: Utf8PathBuf,
}

impl ConfigMerger {
    pub fn new(config: LintfixConfig, root: &Utf8Path) -> Self {
        Self {
            config,
            root: root.to_path_buf(),
        }
    }

    /// Resolve the final settings.
    ///
    /// Flags win over the file; boolean flags can only switch a setting on. A catalog named in
    /// the file is resolved against the source root, a catalog flag against the working
    /// directory.
    pub fn merge_fix_args(self, cli: &FixOverrides) -> FixSettings {
        let fix = self.config.fix;

        let fix_rules = cli
            .fixrules
            .as_deref()
            .or(fix.fixrules.as_deref())
            .map(|s| s.parse::<FixRules>().unwrap_or_default())
            .unwrap_or_default();

        let catalog = cli.catalog.clone().or_else(|| {
            fix.catalog.map(|path| {
                if path.is_absolute() {
                    path
                } else {
                    self.root.join(path)
                }
            })
        });

        FixSettings {
            fix_rules,
            save: cli.save || fix.save,
            verbose: cli.verbose || fix.verbose,
            catalog,
        }
    }
}
