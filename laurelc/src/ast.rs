use std::{io::Write, path::Path};

use laurel_core::{runner::prelude::parse_file, utils::prelude::Error};

/// Prints the parsed program, either as normalized source or as the raw tree.
pub fn print(path: &Path, debug: bool) -> Result<(), Error> {
	let module = parse_file(path)?;
	let mut stdout = std::io::stdout().lock();

	let written = if debug {
		writeln!(stdout, "{:#?}", module.program)
	} else {
		writeln!(stdout, "{}", module.program)
	};

	written.map_err(|err| Error::StdIo { err: err.kind() })
}
