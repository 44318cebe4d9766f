use std::{
    io::{IsTerminal, Write},
    sync::Once,
    time::Duration,
};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

use laurel_core::utils::prelude::Error;

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber, but only when `RUST_LOG` asks for one.
/// Stdout carries the console protocol and must stay clean.
pub(crate) fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

pub(crate) fn print_running(text: &str) -> std::io::Result<()> {
    print_colourful_prefix("Running", Color::Green, text)
}

pub(crate) fn print_finished(duration: Duration) -> std::io::Result<()> {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_failed(duration: Duration) -> std::io::Result<()> {
    print_colourful_prefix("Failed", Color::Red, &format!("after {}", seconds(duration)))
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) -> std::io::Result<()> {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer.set_color(
        ColorSpec::new()
            .set_intense(true)
            .set_bold(true)
            .set_fg(Some(color)),
    )?;
    write!(buffer, "{prefix: >11}")?;
    buffer.set_color(&ColorSpec::new())?;
    writeln!(buffer, " {text}")?;
    buffer_writer.print(&buffer)
}

/// Writes a diagnostic to stderr, through codespan when `rich` is set.
pub(crate) fn report(err: &Error, rich: bool) -> std::io::Result<()> {
    if rich {
        let buffer_writer = stderr_buffer_writer();
        let mut buffer: Buffer = buffer_writer.buffer();
        err.pretty(&mut buffer)?;
        buffer_writer.print(&buffer)
    } else {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", err.pretty_string())?;
        stderr.flush()
    }
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
