#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    String(String),

    // Arithmetic
    Plus, // +
    Minus, // -
    Mul, // *
    Div, // /
    Pow, // ^

    // Assignment and comparison
    Assign, // =
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=

    // Punctuation
    LParen, // (
    RParen, // )
    LSBracket, // [
    RSBracket, // ]
    Comma, // ,
    Arrow, // ->

    // Keywords
    And,
    Or,
    Not,
    If,
    Elif,
    Else,
    Then,
    End,
    For,
    To,
    Step,
    While,
    Fun,
    Return,
    Continue,
    Break,
    Repeat,
    Times,
    Is,

    // Newline or `;`, collapsed
    Newline,

    Eof,
}

impl Token {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::And
            | Token::Or
            | Token::Not
            | Token::If
            | Token::Elif
            | Token::Else
            | Token::Then
            | Token::End
            | Token::For
            | Token::To
            | Token::Step
            | Token::While
            | Token::Fun
            | Token::Return
            | Token::Continue
            | Token::Break
            | Token::Repeat
            | Token::Times
            | Token::Is
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Token::Equal
            | Token::NotEqual
            | Token::LessThan
            | Token::LessThanOrEqual
            | Token::GreaterThan
            | Token::GreaterThanOrEqual
            | Token::Is
        )
    }

    /// Tokens that close a block body.
    pub fn is_block_end(&self) -> bool {
        matches!(self, Token::End | Token::Elif | Token::Else | Token::Eof)
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => value.to_string(),
            Token::Float(value) => value.to_string(),
            Token::String(value) => format!("{value:?}"),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Mul => "*".to_string(),
            Token::Div => "/".to_string(),
            Token::Pow => "^".to_string(),
            Token::Assign => "=".to_string(),
            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::LessThan => "<".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LSBracket => "[".to_string(),
            Token::RSBracket => "]".to_string(),
            Token::Comma => ",".to_string(),
            Token::Arrow => "->".to_string(),

            Token::And => "and".to_string(),
            Token::Or => "or".to_string(),
            Token::Not => "not".to_string(),
            Token::If => "if".to_string(),
            Token::Elif => "elif".to_string(),
            Token::Else => "else".to_string(),
            Token::Then => "then".to_string(),
            Token::End => "end".to_string(),
            Token::For => "for".to_string(),
            Token::To => "to".to_string(),
            Token::Step => "step".to_string(),
            Token::While => "while".to_string(),
            Token::Fun => "fun".to_string(),
            Token::Return => "return".to_string(),
            Token::Continue => "continue".to_string(),
            Token::Break => "break".to_string(),
            Token::Repeat => "repeat".to_string(),
            Token::Times => "times".to_string(),
            Token::Is => "is".to_string(),

            Token::Newline => "newline".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}
