use std::{io::Write, path::PathBuf};

pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::{diagnostic::Label as CodespanLabel, files::SimpleFiles};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use super::src_span::{floor_char_boundary, Position, SrcSpan};

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, file_id: usize, src: &str) -> CodespanLabel<usize> {
        let start = floor_char_boundary(src, self.span.start as usize);
        let end = floor_char_boundary(src, self.span.end as usize).max(start);

        let label = CodespanLabel::new(LabelStyle::Primary, file_id, start..end);

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
}

/// One line of an execution trace, outermost frame first.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFrame {
    pub name: String,
    pub line: usize,
}

pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub location: Option<Location<'a>>,
    pub trace: Vec<TraceFrame>,
    pub hint: Option<String>,
}

impl<'a> Diagnostic<'a> {
    /// Plain text report: trace, title and message, position, excerpt, hint.
    pub fn plain(&self) -> String {
        let mut out = String::new();

        if !self.trace.is_empty() {
            out.push_str("Execution trace:\n");

            for frame in &self.trace {
                out.push_str(&format!("  Line {}, in {}\n", frame.line, frame.name));
            }
        }

        out.push_str(&format!("{}: {}", self.title, self.text));

        if let Some(location) = &self.location {
            let position = Position::resolve(location.src, location.label.span.start);

            out.push_str(&format!(
                "\n\nWhere: File '{}', line {}, column {}\n\n",
                location.path.display(),
                position.line + 1,
                position.column + 1
            ));
            out.push_str(&render_excerpt(location.src, location.label.span));
        }

        if let Some(hint) = &self.hint {
            out.push_str(&format!("\n\nHint: {hint}"));
        }

        out
    }

    /// Colourised report through codespan.
    pub fn write(&self, buf: &mut Buffer) -> std::io::Result<()> {
        match &self.location {
            Some(location) => self.write_span(location, buf)?,
            None => self.write_title(buf)?,
        }

        Ok(())
    }

    pub fn write_span(&self, location: &Location, buf: &mut Buffer) -> std::io::Result<()> {
        let mut files = SimpleFiles::new();

        let file_id = files.add(location.path.display().to_string(), location.src);

        let mut label = location.label.to_codespan_label(file_id, location.src);
        if location.label.text.is_none() {
            label = label.with_message(self.text.clone());
        }

        let mut notes = vec![];

        if !self.trace.is_empty() {
            let trace = self.trace.iter()
                .map(|frame| format!("  line {}, in {}", frame.line, frame.name))
                .collect::<Vec<String>>();

            notes.push(format!("execution trace:\n{}", trace.join("\n")));
        }

        if let Some(hint) = &self.hint {
            notes.push(format!("hint: {hint}"));
        }

        let diagnostic = codespan_reporting::diagnostic::Diagnostic::new(Severity::Error)
            .with_message(format!("{}: {}", self.title, self.text))
            .with_labels(vec![label])
            .with_notes(notes);

        let config = codespan_reporting::term::Config::default();

        codespan_reporting::term::emit(buf, &config, &files, &diagnostic)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))
    }

    pub fn write_title(&self, buf: &mut Buffer) -> std::io::Result<()> {
        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Red)))?;
        write!(buf, "error")?;

        buf.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(buf, ": {}", self.title)?;

        buf.set_color(&ColorSpec::new())?;
        writeln!(buf, "{}", self.text)
    }
}

/// Source lines touched by `span` with a line-number gutter and a caret
/// line under the covered columns. Out-of-range spans are clamped.
pub fn render_excerpt(src: &str, span: SrcSpan) -> String {
    let lines = src.split('\n').collect::<Vec<&str>>();
    let last_line = lines.len() - 1;

    let start = Position::resolve(src, span.start);
    let end = Position::resolve(src, span.end.max(span.start));

    let start_line = start.line.min(last_line);
    let end_line = end.line.min(last_line).max(start_line);

    let digits = (end_line + 1).to_string().len();
    let mut result = vec![];

    for (idx, text) in lines.iter().enumerate().take(end_line + 1).skip(start_line) {
        let width = text.chars().count();

        let col_start = if idx == start_line { start.column.min(width) } else { 0 };
        let col_end = if idx == end_line { end.column.min(width) } else { width };

        result.push(format!("{:>digits$} | {text}", idx + 1));

        let carets = match col_end.saturating_sub(col_start) {
            0 if idx == start_line => 1,
            0 => continue,
            carets => carets,
        };

        result.push(format!("{}{}", " ".repeat(digits + 3 + col_start), "^".repeat(carets)));
    }

    result.join("\n")
}
