mod config;
mod explain;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, FixOverrides};
use fs_err as fs;
use lintfix_catalog::{Catalog, RuleCatalog};
use lintfix_core::adapters::{FsSourceAccessor, FsWritePort};
use lintfix_core::patch::render_patch;
use lintfix_core::pipeline::{FixEngine, FixOutcome};
use lintfix_types::{DiagnosticReport, Severity};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "lintfix",
    version,
    about = "Applies automatic fixes to the violations of a lint diagnostic report."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fix the violations listed in a diagnostic report.
    Fix(FixArgs),
    /// List the rules that have an automatic fix.
    ListRules(ListRulesArgs),
    /// Explain how a rule is fixed.
    Explain(ExplainArgs),
}

#[derive(Debug, Parser)]
struct FixArgs {
    /// Diagnostic report (JSON) to fix.
    #[arg(long)]
    report: Utf8PathBuf,

    /// Directory the report's file paths are relative to (default: current directory).
    #[arg(long, default_value = ".")]
    source_root: Utf8PathBuf,

    /// Rules to fix: "all" or a comma-separated list of rule names.
    #[arg(long)]
    fixrules: Option<String>,

    /// Write fixed files in place. Otherwise fixed text is attached to the report.
    #[arg(long, default_value_t = false)]
    save: bool,

    /// Log fixes that could not be applied.
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Rule catalog (TOML) replacing the built-in rules.
    #[arg(long)]
    catalog: Option<Utf8PathBuf>,

    /// Only fix violations with these ids.
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,

    /// Write the updated report (JSON) here.
    #[arg(long)]
    out: Option<Utf8PathBuf>,

    /// Print a unified diff of the changes.
    #[arg(long, default_value_t = false)]
    diff: bool,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Rule catalog (TOML) to list instead of the built-in rules.
    #[arg(long)]
    catalog: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule name (e.g., "TrailingWhitespace").
    rule: String,

    /// Rule catalog (TOML) to look the rule up in.
    #[arg(long)]
    catalog: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Fix(args) => cmd_fix(args),
        Command::ListRules(args) => {
            init_tracing(false);
            cmd_list_rules(args)
        }
        Command::Explain(args) => {
            init_tracing(false);
            cmd_explain(args)
        }
    }
}

/// Logs go to stderr so report JSON and diffs on stdout stay clean. `RUST_LOG` wins over the
/// verbose default.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_fix(args: FixArgs) -> anyhow::Result<()> {
    let root = args.source_root;

    // Load config file and merge with CLI arguments
    let file_config = config::load_or_default(&root).context("load lintfix.toml config")?;
    let settings = ConfigMerger::new(file_config, &root).merge_fix_args(&FixOverrides {
        fixrules: args.fixrules,
        save: args.save,
        verbose: args.verbose,
        catalog: args.catalog,
    });
    init_tracing(settings.verbose);
    debug!(?settings, "merged config");

    let report = read_report(&args.report)?;
    let ids = (!args.ids.is_empty()).then_some(args.ids);

    let engine = FixEngine::new(
        &report,
        settings,
        Arc::new(FsSourceAccessor::new(root.clone())),
        Arc::new(FsWritePort::new(root.clone())),
    )?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let outcome = runtime.block_on(engine.run(ids.as_deref()))?;

    if let Some(out) = &args.out {
        write_json(out, &outcome.report)?;
        info!("wrote updated report to {}", out);
    } else {
        print!("{}", render_summary(&outcome));
    }
    if args.diff {
        print!("{}", render_patch(&outcome.files));
    }

    if outcome.has_failures() {
        for failure in &outcome.failures {
            error!("{}", failure.error);
        }
        anyhow::bail!("{} file(s) could not be fixed", outcome.failures.len());
    }
    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    let catalog = resolve_catalog(args.catalog.as_deref())?;
    match args.format {
        OutputFormat::Text => print!("{}", explain::render_rule_table(&catalog)),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&explain::rules_json(&catalog))?
            );
        }
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    let catalog = resolve_catalog(args.catalog.as_deref())?;
    let Some(descriptor) = catalog.descriptor(&args.rule) else {
        let available: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();
        anyhow::bail!(
            "Unknown rule: '{}'\n\nFixable rules: {}",
            args.rule,
            available.join(", ")
        );
    };
    print!("{}", explain::render_explanation(&args.rule, &descriptor));
    Ok(())
}

fn resolve_catalog(path: Option<&Utf8Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => lintfix_catalog::load_catalog(path),
        None => Ok(Catalog::builtin()),
    }
}

fn read_report(path: &Utf8Path) -> anyhow::Result<DiagnosticReport> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let mut report: DiagnosticReport =
        serde_json::from_str(&s).with_context(|| format!("parse report {}", path))?;
    // Analyzers that only list violations leave the counters out.
    if report.summary.found.total() == 0 {
        report.summary.found = report.count_violations();
    }
    Ok(report)
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn render_summary(outcome: &FixOutcome) -> String {
    let summary = &outcome.report.summary;
    let saved = outcome.files.iter().filter(|f| f.saved).count();

    let mut out = format!(
        "lintfix: fixed {} of {} violation(s), {} file(s) changed, {} saved\n",
        summary.fixed.total(),
        summary.found.total(),
        outcome.files.len(),
        saved
    );
    for severity in Severity::ALL {
        out.push_str(&format!(
            "  {:<8} found {:>4}  fixed {:>4}  remaining {:>4}\n",
            severity.as_str(),
            summary.found.get(severity),
            summary.fixed.get(severity),
            summary.remaining.get(severity)
        ));
    }
    out
}
