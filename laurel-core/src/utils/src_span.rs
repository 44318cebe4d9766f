use std::fmt::Display;

use codespan_reporting::files::line_starts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	pub fn from(start: u32, end: u32) -> Self {
		Self { start, end }
	}

	/// Zero-width span at `offset`.
	pub fn empty_at(offset: u32) -> Self {
		Self { start: offset, end: offset }
	}

	/// Union of two spans, from the start of `self` to the end of `other`.
	pub fn to(self, other: SrcSpan) -> Self {
		Self { start: self.start, end: other.end }
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}

/// Zero-based line and column (in characters) of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
	pub offset: usize,
	pub line: usize,
	pub column: usize,
}

impl Position {
	/// Resolves `offset` against `src`. Offsets past the end or inside a
	/// multi-byte character are pulled back to the nearest valid boundary.
	pub fn resolve(src: &str, offset: u32) -> Self {
		let offset = floor_char_boundary(src, offset as usize);

		let line_start = line_starts(src)
			.take_while(|start| *start <= offset)
			.enumerate()
			.last()
			.unwrap_or((0, 0));

		let (line, start) = line_start;
		let column = src[start..offset].chars().count();

		Self { offset, line, column }
	}
}

pub(crate) fn floor_char_boundary(src: &str, offset: usize) -> usize {
	let mut offset = offset.min(src.len());

	while !src.is_char_boundary(offset) {
		offset -= 1;
	}

	offset
}
