/// Line terminator used when joining a buffer back into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A file's content as an ordered line buffer.
///
/// Text is split on every newline, so a trailing newline shows up as a final empty line and
/// `parse` followed by `join` reproduces the input exactly. A file is treated as CRLF only
/// when every newline in it is preceded by `\r`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLines {
    pub lines: Vec<String>,
    pub line_ending: LineEnding,
}

impl SourceLines {
    pub fn parse(text: &str) -> Self {
        let newlines = text.matches('\n').count();
        let crlf = newlines > 0 && text.matches("\r\n").count() == newlines;

        let lines = text
            .split('\n')
            .map(|l| {
                if crlf {
                    l.strip_suffix('\r').unwrap_or(l).to_string()
                } else {
                    l.to_string()
                }
            })
            .collect();

        Self {
            lines,
            line_ending: if crlf { LineEnding::CrLf } else { LineEnding::Lf },
        }
    }

    pub fn from_lines(lines: Vec<String>, line_ending: LineEnding) -> Self {
        Self { lines, line_ending }
    }

    pub fn join(&self) -> String {
        self.lines.join(self.line_ending.as_str())
    }
}
