use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use std::fmt::Display;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"and" => Token::And,
		"or" => Token::Or,
		"not" => Token::Not,
		"if" => Token::If,
		"elif" => Token::Elif,
		"else" => Token::Else,
		"then" => Token::Then,
		"end" => Token::End,
		"for" => Token::For,
		"to" => Token::To,
		"step" => Token::Step,
		"while" => Token::While,
		"fun" => Token::Fun,
		"return" => Token::Return,
		"continue" => Token::Continue,
		"break" => Token::Break,
		"repeat" => Token::Repeat,
		"times" => Token::Times,
		"is" => Token::Is,

		_ => return None
	})
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input,
			finished: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

	/// Lexes the whole input, stopping at the first error.
	pub fn tokenize(self) -> Result<Vec<Spanned>, LexicalError> {
		self.collect()
	}

    pub fn next_token(&mut self) -> LexResult {
		let span = match self.ch {
			Some(ch) => match ch {
				'+' => self.eat_one_char(Token::Plus),
				'*' => self.eat_one_char(Token::Mul),
				'/' => self.eat_one_char(Token::Div),
				'^' => self.eat_one_char(Token::Pow),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'[' => self.eat_one_char(Token::LSBracket),
				']' => self.eat_one_char(Token::RSBracket),
				',' => self.eat_one_char(Token::Comma),
				'-' => self.eat_pair('>', Token::Arrow, Token::Minus),
				'=' => self.eat_pair('=', Token::Equal, Token::Assign),
				'<' => self.eat_pair('=', Token::LessThanOrEqual, Token::LessThan),
				'>' => self.eat_pair('=', Token::GreaterThanOrEqual, Token::GreaterThan),
				'!' => return self.lex_not_equal(),
				'"' => return self.lex_string(),
				'#' => {
					self.skip_comment();
					return self.next_token();
				},
				'\n' | ';' => self.lex_newlines(),
				' ' | '\t' | '\x0C' | '\r' => {
					let _ = self.next_char();
					return self.next_token();
				},
				'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(),
				'0'..='9' | '.' => return self.lex_number(),
				c => {
					let start = self.position;
					let _ = self.next_char();
					return Err(LexicalError {
						error: LexicalErrorType::UnrecognizedToken { tok: c },
						location: SrcSpan::from(start, self.position),
					});
				}
			},
			None => (self.position, Token::Eof, self.position),
		};

		Ok(span)
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, |c| c.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	/// Eats `double` when the character after the current one is `second`,
	/// otherwise eats the current character as `single`.
	fn eat_pair(&mut self, second: char, double: Token, single: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();

		let token = if self.ch == Some(second) {
			self.next_char();
			double
		} else {
			single
		};

		(start_pos, token, self.position)
	}

	fn lex_not_equal(&mut self) -> LexResult {
		let start_pos = self.position;
		self.next_char();

		if self.ch == Some('=') {
			self.next_char();
			return Ok((start_pos, Token::NotEqual, self.position));
		}

		Err(LexicalError {
			error: LexicalErrorType::ExpectedChar { expected: '=', after: '!' },
			location: SrcSpan::from(start_pos, self.position),
		})
	}

	fn lex_newlines(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut end_pos = self.position;

		loop {
			match self.ch {
				Some('\n' | ';') => {
					self.next_char();
					end_pos = self.position;
				},
				Some(' ' | '\t' | '\x0C' | '\r') => {
					self.next_char();
				},
				Some('#') => self.skip_comment(),
				_ => break
			}
		}

		(start_pos, Token::Newline, end_pos)
	}

	fn skip_comment(&mut self) {
		while !matches!(self.ch, Some('\n') | None) {
			self.next_char();
		}
	}

	fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

        let end_pos = self.position;

		match str_to_keyword(&ident) {
			Some(tok) => (start_pos, tok, end_pos),
			None => (start_pos, Token::Ident(ident), end_pos),
		}
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut value = String::new();
		let mut has_period = false;

		while let Some(ch) = self.ch {
			match ch {
				'0'..='9' => value.push(ch),
				'.' if has_period => {
					self.next_char();

					return Err(LexicalError {
						error: LexicalErrorType::MultipleFloatingPoints,
						location: SrcSpan::from(start_pos, self.position)
					});
				},
				'.' => {
					has_period = true;
					value.push(ch);
				},
				_ => break
			}

			self.next_char();
		}

		let end_pos = self.position;
		let location = SrcSpan::from(start_pos, end_pos);

		let token = if value == "." {
			return Err(LexicalError {
				error: LexicalErrorType::UnrecognizedToken { tok: '.' },
				location
			});
		} else if has_period {
			// "1." and ".5" are both valid floats
			match format!("0{value}0").parse::<f64>() {
				Ok(value) => Token::Float(value),
				Err(_) => return Err(LexicalError {
					error: LexicalErrorType::NumberTooLarge,
					location
				})
			}
		} else {
			match value.parse::<i64>() {
				Ok(value) => Token::Int(value),
				Err(_) => return Err(LexicalError {
					error: LexicalErrorType::NumberTooLarge,
					location
				})
			}
		};

		Ok((start_pos, token, end_pos))
	}

	fn lex_string(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut value = String::new();

		self.next_char(); // opening quote

		loop {
			match self.next_char() {
				Some('"') => break,
				Some('\\') => match self.next_char() {
					Some('n') => value.push('\n'),
					Some('t') => value.push('\t'),
					Some(escaped) => value.push(escaped),
					None => return Err(LexicalError {
						error: LexicalErrorType::UnterminatedString,
						location: SrcSpan::from(start_pos, self.position)
					}),
				},
				Some(ch) => value.push(ch),
				None => return Err(LexicalError {
					error: LexicalErrorType::UnterminatedString,
					location: SrcSpan::from(start_pos, self.position)
				}),
			}
		}

		Ok((start_pos, Token::String(value), self.position))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if matches!(token, Ok((_, Token::Eof, _)) | Err(_)) {
			self.finished = true;
		}

		Some(token)
	}
}

pub fn lex_source(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c))).tokenize()
}
