pub mod prelude {
    pub use super::{
        parse_file,
        read_program,
        read_source,
        run,
        run_file,
        tokenize_file,
        END_OF_CODE,
        SOURCE_EXTENSION
    };
}

use std::{cell::RefCell, io::BufRead, path::Path, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, Value},
    eval::prelude::Evaluator,
    lexer::prelude::{lex_source, Spanned},
    parser::prelude::{parse_module, Module, ParseError, ParseErrorType},
    utils::prelude::{ConsoleIO, Error}
};

pub const SOURCE_EXTENSION: &str = "lrl";

/// Line that terminates a program sent over standard input.
pub const END_OF_CODE: &str = "__LAUREL_END_OF_CODE__";

/// Parses and evaluates `src` in `globals`. `path` only names the program
/// in diagnostics.
pub fn run(
    path: &Path,
    src: &str,
    globals: Rc<RefCell<Environment>>,
    io: Rc<dyn ConsoleIO>
) -> Result<Value, Error> {
    let name = path.display().to_string();

    let module = parse_module(&name, src).map_err(|error| Error::Parse {
        path: path.to_path_buf(),
        src: src.to_string(),
        error
    })?;

    let evaluator = Evaluator::new(globals, io);

    match evaluator.eval_program(&module.program) {
        Ok(value) => {
            tracing::debug!(value = %value.repr(), "run of {name} finished");
            Ok(value)
        },
        Err(error) => {
            tracing::debug!(error = %error.message(), "run of {name} failed");

            Err(Error::Runtime {
                path: path.to_path_buf(),
                src: src.to_string(),
                error
            })
        },
    }
}

/// Reads a `.lrl` file as UTF-8, streaming it character by character.
pub fn read_source(path: &Path) -> Result<String, Error> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        return Err(Error::FileExtension { path: path.to_path_buf() });
    }

    let file = std::fs::File::open(path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?
        .len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);

    for c in reader.chars() {
        src.push(c.map_err(|err| Error::StdIo { err: err.kind() })?);
    }

    Ok(src)
}

/// Runs a source file in a fresh global scope.
pub fn run_file(path: &Path, io: Rc<dyn ConsoleIO>) -> Result<Value, Error> {
    let src = read_source(path)?;

    run(path, &src, Environment::global(), io)
}

/// Lexes a source file without parsing it.
pub fn tokenize_file(path: &Path) -> Result<Vec<Spanned>, Error> {
    let src = read_source(path)?;

    lex_source(&src).map_err(|error| Error::Parse {
        path: path.to_path_buf(),
        error: ParseError {
            span: error.location,
            error: ParseErrorType::LexError { error },
        },
        src,
    })
}

pub fn parse_file(path: &Path) -> Result<Module, Error> {
    let src = read_source(path)?;

    parse_module(&path.display().to_string(), &src).map_err(|error| Error::Parse {
        path: path.to_path_buf(),
        src,
        error
    })
}

/// Collects program text up to the `END_OF_CODE` line or the end of the
/// stream. Input after the marker stays unread for the program itself.
pub fn read_program<R: BufRead>(mut reader: R) -> Result<String, Error> {
    let mut src = String::new();
    let mut line = String::new();

    loop {
        line.clear();

        let read = reader.read_line(&mut line)
            .map_err(|err| Error::StdIo { err: err.kind() })?;

        if read == 0 || line.trim_end_matches(['\r', '\n']) == END_OF_CODE {
            break;
        }

        src.push_str(&line);
    }

    Ok(src)
}
