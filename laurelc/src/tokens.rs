use std::{io::Write, path::Path};

use laurel_core::{lexer::prelude::Token, runner::prelude::tokenize_file, utils::prelude::Error};

/// Prints one token per line with its byte span.
pub fn print(path: &Path) -> Result<(), Error> {
	let tokens = tokenize_file(path)?;
	let mut stdout = std::io::stdout().lock();

	for (start, token, end) in tokens {
		let line = match &token {
			Token::Newline | Token::Eof => format!("{start}..{end}\t{token:?}"),
			_ => format!("{start}..{end}\t{token:?}\t`{}`", token.as_literal()),
		};

		writeln!(stdout, "{line}").map_err(|err| Error::StdIo { err: err.kind() })?;
	}

	Ok(())
}
