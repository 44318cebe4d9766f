mod ast;
mod cli;
mod tokens;

use std::{path::{Path, PathBuf}, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser;
use cli::{init_tracing, print_failed, print_finished, print_running, report};
use laurel_core::{
    environment::prelude::{Environment, Value, NULL},
    runner::prelude::{read_program, run, run_file},
    utils::prelude::{Error, StdConsoleIO}
};

#[derive(Parser)]
#[command(name = "laurelc", about = "Laurel language interpreter")]
enum Command {
    /// Runs a `.lrl` source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Render diagnostics with colours and source labels
        #[arg(long, default_value_t = false)]
        rich: bool
    },
    /// Runs a program read from standard input, up to the `__LAUREL_END_OF_CODE__` line
    Stdin {
        /// Render diagnostics with colours and source labels
        #[arg(long, default_value_t = false)]
        rich: bool
    },
    /// Prints the tokens of a source file
    Tokens {
        /// Path of source file
        path: PathBuf
    },
    /// Prints the parsed program of a source file
    Ast {
        /// Path of source file
        path: PathBuf,
        /// Print the syntax tree instead of normalized source code
        #[arg(long, default_value_t = false)]
        debug: bool
    }
}

fn main() -> ExitCode {
    init_tracing();

    let result = match Command::parse() {
        Command::Run { path, rich } => return run_command(&path, rich),
        Command::Stdin { rich } => return stdin_command(rich),
        Command::Tokens { path } => tokens::print(&path),
        Command::Ast { path, debug } => ast::print(&path, debug),
    };

    exit_code(result, false)
}

fn run_command(path: &Path, rich: bool) -> ExitCode {
    let _ = print_running(&path.display().to_string());
    let start = Instant::now();

    let result = run_file(path, Rc::new(StdConsoleIO));

    let _ = match result {
        Ok(_) => print_finished(start.elapsed()),
        Err(_) => print_failed(start.elapsed()),
    };

    exit_code(result.map(|_| ()), rich)
}

fn stdin_command(rich: bool) -> ExitCode {
    let src = match read_program(std::io::stdin().lock()) {
        Ok(src) => src,
        Err(err) => return exit_code(Err(err), rich),
    };

    if src.trim().is_empty() {
        println!("No code provided.");
        return ExitCode::SUCCESS;
    }

    let result = run(
        Path::new("<stdin>"),
        &src,
        Environment::global(),
        Rc::new(StdConsoleIO)
    );

    exit_code(result.map(print_result), rich)
}

fn print_result(value: Value) {
    if value != NULL {
        println!("{value}");
    }
}

fn exit_code(result: Result<(), Error>, rich: bool) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(io_err) = report(&err, rich) {
                tracing::error!(%io_err, "failed to write diagnostic");
            }

            ExitCode::FAILURE
        },
    }
}
