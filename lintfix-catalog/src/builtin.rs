//! Built-in text rules and the named transforms a catalog file may reference.

use crate::catalog::Catalog;
use crate::descriptor::{FixDescriptor, FixStrategy, Transform, VariableDecl};
use crate::variables::Variables;

const TAB_WIDTH: usize = 4;

/// Transform names accepted by `fix = { type = "transform", name = ... }`.
pub const BUILTIN_TRANSFORMS: &[&str] = &[
    "trim_trailing_whitespace",
    "strip_trailing_semicolon",
    "expand_tabs",
    "collapse_blank_lines",
    "ensure_final_newline",
];

/// Resolve a built-in transform by name.
pub fn builtin_transform(name: &str) -> Option<Transform> {
    let t = match name {
        "trim_trailing_whitespace" => Transform::line(trim_trailing_whitespace),
        "strip_trailing_semicolon" => Transform::line(strip_trailing_semicolon),
        "expand_tabs" => Transform::file(expand_tabs),
        "collapse_blank_lines" => Transform::file(collapse_blank_lines),
        "ensure_final_newline" => Transform::file(ensure_final_newline),
        _ => return None,
    };
    Some(t)
}

impl Catalog {
    /// The default catalog.
    ///
    /// Layout-changing file rules run first (`NoTabCharacter`), line rules next, and rules that
    /// add or remove lines last so they cannot shift the line numbers of earlier entries.
    pub fn builtin() -> Self {
        Catalog::empty()
            .with_rule(
                "NoTabCharacter",
                FixDescriptor::file(1, FixStrategy::Transform(Transform::file(expand_tabs)))
                    .describe("Replace tab characters with four spaces."),
            )
            .with_rule(
                "UnnecessarySemicolon",
                FixDescriptor::line(
                    10,
                    FixStrategy::Transform(Transform::line(strip_trailing_semicolon)),
                )
                .with_triggers(["TrailingWhitespace"])
                .describe("Remove a semicolon that ends a statement line."),
            )
            .with_rule(
                "TrailingWhitespace",
                FixDescriptor::line(
                    20,
                    FixStrategy::Transform(Transform::line(trim_trailing_whitespace)),
                )
                .describe("Remove whitespace at the end of a line."),
            )
            .with_rule(
                "UnnecessaryGString",
                FixDescriptor::line(30, FixStrategy::replace("\"{{STRING}}\"", "'{{STRING}}'"))
                    .with_variable(VariableDecl::new(
                        "STRING",
                        r"The String '(.*)' can be wrapped in single quotes",
                    ))
                    .describe("Use single quotes for strings without interpolation."),
            )
            .with_rule(
                "ConsecutiveBlankLines",
                FixDescriptor::file(
                    900,
                    FixStrategy::Transform(Transform::file(collapse_blank_lines)),
                )
                .describe("Collapse runs of blank lines into a single blank line."),
            )
            .with_rule(
                "FileEndsWithoutNewline",
                FixDescriptor::file(
                    950,
                    FixStrategy::Transform(Transform::file(ensure_final_newline)),
                )
                .describe("Terminate the file with a newline."),
            )
    }
}

fn trim_trailing_whitespace(line: &str, _vars: &Variables) -> anyhow::Result<String> {
    Ok(line.trim_end().to_string())
}

fn strip_trailing_semicolon(line: &str, _vars: &Variables) -> anyhow::Result<String> {
    let trimmed = line.trim_end();
    match trimmed.strip_suffix(';') {
        Some(head) => {
            let tail = &line[trimmed.len()..];
            Ok(format!("{head}{tail}"))
        }
        None => Ok(line.to_string()),
    }
}

fn expand_tabs(lines: &[String], _vars: &Variables) -> anyhow::Result<Vec<String>> {
    let spaces = " ".repeat(TAB_WIDTH);
    Ok(lines.iter().map(|l| l.replace('\t', &spaces)).collect())
}

fn collapse_blank_lines(lines: &[String], _vars: &Variables) -> anyhow::Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut prev_blank = false;
    for line in lines {
        let blank = line.trim().is_empty();
        if blank && prev_blank {
            continue;
        }
        prev_blank = blank;
        out.push(line.clone());
    }
    Ok(out)
}

/// Lines are split on every newline, so a file that ends with one has a trailing empty line.
fn ensure_final_newline(lines: &[String], _vars: &Variables) -> anyhow::Result<Vec<String>> {
    let mut out = lines.to_vec();
    if out.last().is_some_and(|l| !l.is_empty()) {
        out.push(String::new());
    }
    Ok(out)
}
