use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{eval::prelude::RuntimeError, parser::prelude::ParseError};
use super::{
    diagnostic::{Diagnostic, Label, Location, TraceFrame},
    src_span::Position
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("program failed at runtime")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("`{}` is not a Laurel source file, expected the `.lrl` extension", path.display())]
    FileExtension {
        path: PathBuf
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    /// Plain text report, the format printed by the command line runner.
    pub fn pretty_string(&self) -> String {
        self.to_diagnostic().plain()
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        self.to_diagnostic().write(buf)?;
        writeln!(buf)
    }

    pub fn to_diagnostic(&self) -> Diagnostic<'_> {
        match self {
            Error::Parse { path, src, error } => Diagnostic {
                title: error.kind().to_string(),
                text: error.message(),
                location: Some(Location {
                    src,
                    path: path.clone(),
                    label: Label {
                        text: None,
                        span: error.span,
                    },
                }),
                trace: vec![],
                hint: Some(error.hint()),
            },
            Error::Runtime { path, src, error } => Diagnostic {
                title: "Runtime Error".into(),
                text: error.message(),
                location: Some(Location {
                    src,
                    path: path.clone(),
                    label: Label {
                        text: None,
                        span: error.span,
                    },
                }),
                trace: trace(src, error),
                hint: Some(error.hint().to_string()),
            },
            Error::FileExtension { .. } => Diagnostic {
                title: "Invalid file".into(),
                text: self.to_string(),
                location: None,
                trace: vec![],
                hint: None,
            },
            Error::StdIo { err } => Diagnostic {
                title: "Standard IO error".into(),
                text: format!("{err}"),
                location: None,
                trace: vec![],
                hint: None,
            },
        }
    }
}

/// Frames of a runtime error, outermost first. Each frame reports the line
/// it was executing: the call into the next frame, or the error itself for
/// the innermost one. A lone `<program>` frame produces no trace.
fn trace(src: &str, error: &RuntimeError) -> Vec<TraceFrame> {
    let chain = error.frame.chain();

    if chain.len() <= 1 {
        return vec![];
    }

    chain.iter()
        .enumerate()
        .map(|(idx, frame)| {
            let span = chain.get(idx + 1)
                .and_then(|next| next.entry)
                .unwrap_or(error.span);

            TraceFrame {
                name: frame.name.clone(),
                line: Position::resolve(src, span.start).line + 1,
            }
        })
        .collect()
}
