use crate::{lexer::prelude::{lex_source, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{parse_error, ParseError, ParseErrorType};
use super::ast::{Block, Module, Node};

static EOF: Token = Token::Eof;

pub trait Parse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

/// Parsing of a construct that continues an already parsed left operand.
pub trait InfixParse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Node,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = Spanned>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,

    tokens: T,
}

impl<T: Iterator<Item = Spanned>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    /// Advances by one token and returns the one that was current. Never
    /// moves past `Eof`.
    pub fn next_token(&mut self) -> Option<Spanned> {
        if matches!(self.current_token, Some((_, Token::Eof, _))) {
            return self.current_token.clone();
        }

        let t = self.current_token.take();

        self.current_token = self.next_token.take();
        self.next_token = self.tokens.next();

        t
    }

    pub fn current(&self) -> &Token {
        match &self.current_token {
            Some((_, token, _)) => token,
            None => &EOF,
        }
    }

    pub fn peek(&self) -> &Token {
        match &self.next_token {
            Some((_, token, _)) => token,
            None => &EOF,
        }
    }

    pub fn current_span(&self) -> SrcSpan {
        match &self.current_token {
            Some((start, _, end)) => SrcSpan::from(*start, *end),
            None => SrcSpan::default(),
        }
    }

    pub fn skip_newline(&mut self) {
        while matches!(self.current(), Token::Newline) {
            self.step();
        }
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(self.current())
    }

    pub fn parse(&mut self) -> Result<Block, ParseError> {
        let program = Block::parse(self, None)?;

        match self.current() {
            Token::Eof => Ok(program),
            _ => Err(self.unexpected(&["end of input"])),
        }
    }

    /// Error for the current token, listing what would have been accepted.
    pub fn unexpected(&self, expected: &[&str]) -> ParseError {
        ParseError {
            error: ParseErrorType::UnexpectedToken {
                token: self.current().clone(),
                expected: expected.iter().map(|e| e.to_string()).collect(),
            },
            span: self.current_span(),
        }
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        if *self.current() == token {
            let SrcSpan { start, end } = self.current_span();
            self.step();

            return Ok((start, end));
        }

        Err(self.unexpected(&[&format!("`{}`", token.as_literal())]))
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        if let Some((start, Token::Ident(value), end)) = &self.current_token {
            let ident = (*start, value.clone(), *end);
            self.step();

            return Ok(ident);
        }

        parse_error(ParseErrorType::ExpectedIdent, self.current_span())
    }

    /// `then` followed by a newline (or the end of input) opens a block body;
    /// anything else is a single-line body.
    pub fn at_block_start(&self) -> bool {
        matches!(self.current(), Token::Newline | Token::Eof)
    }
}

/// Binding power of infix operators, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Logical,
    Comparison,
    Sum,
    Product,
    Unary,
    Power,
    Call,
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::And | Token::Or => Self::Logical,
            token if token.is_comparison() => Self::Comparison,
            Token::Plus | Token::Minus => Self::Sum,
            Token::Mul | Token::Div => Self::Product,
            Token::Pow => Self::Power,
            Token::LParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_module(name: &str, src: &str) -> Result<Module, ParseError> {
    let tokens = lex_source(src).map_err(|error| ParseError {
        span: error.location,
        error: ParseErrorType::LexError { error },
    })?;

    tracing::debug!(tokens = tokens.len(), "lexed {name}");

    let mut parser = Parser::new(tokens.into_iter());
    let program = parser.parse()?;

    tracing::debug!(statements = program.statements.len(), "parsed {name}");

    Ok(Module {
        name: name.to_string(),
        program
    })
}
