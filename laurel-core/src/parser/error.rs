use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    ExpectedExpression,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    /// Short label plus the list of alternatives that would have been accepted.
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected identifier".to_string(), vec![]),
            ParseErrorType::ExpectedExpression => (
                "Expected an expression".to_string(),
                vec![
                    "a number, string or identifier".to_string(),
                    "`+`, `-`, `not`, `(` or `[`".to_string(),
                    "`if`, `for`, `while`, `repeat` or `fun`".to_string(),
                ]
            ),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Int(_) => "an Int".to_string(),
                    Token::Float(_) => "a Float".to_string(),
                    Token::String(_) => "a String".to_string(),
                    Token::Ident(_) => "an Identifier".to_string(),
                    Token::Newline => "a newline".to_string(),
                    Token::Eof => "the end of input".to_string(),
                    _ if token.is_keyword() => format!("the keyword `{}`", token.as_literal()),
                    _ => format!("`{}`", token.as_literal())
                };

                (format!("Found {found}, expected {}", expected.join(", ")), expected.clone())
            },
            ParseErrorType::LexError { error } => (error.details(), vec![]),
        }
    }

    pub fn message(&self) -> String {
        self.details().0
    }

    /// Diagnostic title for this error.
    pub fn kind(&self) -> &'static str {
        match &self.error {
            ParseErrorType::LexError { error } => error.kind(),
            _ => "Invalid Syntax",
        }
    }

    pub fn hint(&self) -> String {
        if let ParseErrorType::LexError { error } = &self.error {
            return error.hint().to_string();
        }

        let (_, expected) = self.details();

        if matches!(self.error, ParseErrorType::ExpectedExpression) {
            return "It looks like an expression or value was expected here (for example after `=`). \
                If you started an assignment like `a =`, provide a value or expression on the right-hand side.".to_string();
        }

        if expected.iter().any(|e| e == "`end`") {
            return "A block opened with `then` must be closed with `end`. Check that every `if`, `for`, `while`, `repeat` and `fun` block has a matching `end`.".to_string();
        }

        if expected.is_empty() {
            return "The code here doesn't match the expected syntax. Check for missing operators, incomplete assignments (like `a =`), unmatched parentheses, or extra tokens.".to_string();
        }

        format!(
            "Expected one of: {}. Check for missing operators or incomplete expressions.",
            expected.join(", ")
        )
    }
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
