use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    /// A two-character operator whose second character is missing, e.g. `!`
    /// without `=`.
    ExpectedChar { expected: char, after: char },
    MultipleFloatingPoints,
    NumberTooLarge,
    UnterminatedString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    /// Diagnostic title for this error.
    pub fn kind(&self) -> &'static str {
        match self.error {
            LexicalErrorType::ExpectedChar { .. } => "Expected Character",
            _ => "Illegal Character",
        }
    }

    pub fn details(&self) -> String {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => format!("'{tok}'"),
            LexicalErrorType::ExpectedChar { expected, after } => {
                format!("'{expected}' (after '{after}')")
            },
            LexicalErrorType::MultipleFloatingPoints => {
                "Found more than one decimal point in a number".to_string()
            },
            LexicalErrorType::NumberTooLarge => {
                "Integer literal is too large".to_string()
            },
            LexicalErrorType::UnterminatedString => {
                "String literal is missing its closing '\"'".to_string()
            },
        }
    }

    pub fn hint(&self) -> &'static str {
        match self.error {
            LexicalErrorType::ExpectedChar { .. } => {
                "A character is missing here. Check two-character operators such as `!=`, `==`, `<=` and `->`."
            },
            LexicalErrorType::UnterminatedString => {
                "Close the string with a matching `\"` on the same statement."
            },
            _ => {
                "There is an unsupported character at the highlighted spot. Remove or replace it with a valid character (letters, numbers, parentheses, operators, etc.)."
            },
        }
    }
}
