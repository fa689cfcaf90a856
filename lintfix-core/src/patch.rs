//! Unified diff preview of a fix run.

use crate::pipeline::FileOutcome;
use diffy::PatchFormatter;

/// Render a git-style patch for every file whose content changed, in the order given.
pub fn render_patch(files: &[FileOutcome]) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for file in files {
        if file.before == file.after {
            continue;
        }

        out.push_str(&format!("diff --git a/{0} b/{0}\n", file.path));
        out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", file.path));

        let patch = diffy::create_patch(&file.before, &file.after);
        let body = formatter.fmt_patch(&patch).to_string();
        // diffy repeats its own ---/+++ header; keep only the hunks.
        let hunks = body
            .split_inclusive('\n')
            .skip_while(|line| line.starts_with("--- ") || line.starts_with("+++ "));
        for line in hunks {
            out.push_str(line);
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
