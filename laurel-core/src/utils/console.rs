use std::{collections::VecDeque, io::{BufRead, Write}, sync::{Arc, PoisonError, RwLock}};

/// Line-oriented text streams used by the interactive built-ins.
pub trait ConsoleIO {
    fn write_line(&self, line: &str) -> std::io::Result<()>;

    /// Next input line without its line terminator, `None` once the stream
    /// is closed.
    fn read_line(&self) -> std::io::Result<Option<String>>;
}

/// Process stdout/stdin. Every line is flushed immediately so a driving
/// front end sees protocol lines as they are produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsoleIO;

impl ConsoleIO for StdConsoleIO {
    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();

        writeln!(stdout, "{line}")?;
        stdout.flush()
    }

    fn read_line(&self) -> std::io::Result<Option<String>> {
        let mut buf = String::new();

        match std::io::stdin().lock().read_line(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(strip_line_ending(buf))),
        }
    }
}

/// In-memory console with scripted input and captured output.
#[derive(Debug, Default, Clone)]
pub struct VectorConsoleIO {
    pub input: Arc<RwLock<VecDeque<String>>>,
    pub output: Arc<RwLock<Vec<String>>>
}

impl VectorConsoleIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        let console = Self::new();
        console.push_input(lines);

        console
    }

    pub fn push_input<I, S>(&self, lines: I)
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        let mut input = self.input.write().unwrap_or_else(PoisonError::into_inner);
        input.extend(lines.into_iter().map(Into::into));
    }

    pub fn take_output(&self) -> Vec<String> {
        let mut output = self.output.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *output)
    }
}

impl ConsoleIO for VectorConsoleIO {
    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut output = self.output.write().unwrap_or_else(PoisonError::into_inner);
        output.push(line.to_string());

        Ok(())
    }

    fn read_line(&self) -> std::io::Result<Option<String>> {
        let mut input = self.input.write().unwrap_or_else(PoisonError::into_inner);

        Ok(input.pop_front())
    }
}

fn strip_line_ending(mut line: String) -> String {
    while line.ends_with(['\n', '\r']) {
        line.pop();
    }

    line
}
