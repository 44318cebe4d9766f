use std::{fmt::Display, rc::Rc};

use crate::{
    lexer::prelude::{Spanned, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub program: Block
}

// block -> NEWLINE* <statement> (NEWLINE+ <statement>)* NEWLINE*
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Block {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.current_span().start;
        parser.skip_newline();

        let mut statements = vec![];

        while !parser.current().is_block_end() {
            statements.push(Node::statement(parser)?);

            match parser.current() {
                Token::Newline => parser.skip_newline(),
                token if token.is_block_end() => break,
                _ => return Err(parser.unexpected(&["a newline or `;`", "an operator"])),
            }
        }

        let location = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.location().to(last.location()),
            _ => SrcSpan::empty_at(start),
        };

        Ok(Self {
            statements,
            location
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("; "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLiteral {
    Int(i64),
    Float(f64),
}

impl Display for NumberLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number {
        value: NumberLiteral,
        location: SrcSpan
    },
    String {
        value: String,
        location: SrcSpan
    },
    List(ListLiteral),
    VarAccess(Identifier),
    VarAssign(VarAssign),
    BinaryOp(BinaryOp),
    UnaryOp(UnaryOp),
    If(If),
    For(For),
    While(While),
    Repeat(Repeat),
    FuncDef(FuncDef),
    Call(Call),
    Return(Return),
    Continue {
        location: SrcSpan
    },
    Break {
        location: SrcSpan
    },
    Block(Block),
}

impl Node {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Number { location, .. }
            | Self::String { location, .. }
            | Self::Continue { location }
            | Self::Break { location } => *location,
            Self::List(list) => list.location,
            Self::VarAccess(ident) => ident.location,
            Self::VarAssign(assign) => assign.location,
            Self::BinaryOp(op) => op.location,
            Self::UnaryOp(op) => op.location,
            Self::If(if_) => if_.location,
            Self::For(for_) => for_.location,
            Self::While(while_) => while_.location,
            Self::Repeat(repeat) => repeat.location,
            Self::FuncDef(func) => func.location,
            Self::Call(call) => call.location,
            Self::Return(return_) => return_.location,
            Self::Block(block) => block.location,
        }
    }

    // statement -> return [<expr>] | continue | break | <expr>
    pub fn statement<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let span = parser.current_span();

        match parser.current() {
            Token::Return => {
                parser.step();

                let value = match parser.current() {
                    token if matches!(token, Token::Newline) || token.is_block_end() => None,
                    _ => Some(Box::new(Node::parse(parser, None)?)),
                };

                let location = match &value {
                    Some(value) => span.to(value.location()),
                    None => span,
                };

                Ok(Self::Return(Return { value, location }))
            },
            Token::Continue => {
                parser.step();
                Ok(Self::Continue { location: span })
            },
            Token::Break => {
                parser.step();
                Ok(Self::Break { location: span })
            },
            _ => Node::parse(parser, None),
        }
    }

    fn prefix<T: Iterator<Item = Spanned>>(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let location = parser.current_span();

        let node = match parser.current() {
            Token::Int(value) => {
                let value = NumberLiteral::Int(*value);
                parser.step();
                Self::Number { value, location }
            },
            Token::Float(value) => {
                let value = NumberLiteral::Float(*value);
                parser.step();
                Self::Number { value, location }
            },
            Token::String(value) => {
                let value = value.clone();
                parser.step();
                Self::String { value, location }
            },
            Token::Ident(_) if precedence.is_none() && *parser.peek() == Token::Assign => {
                Self::VarAssign(VarAssign::parse(parser, None)?)
            },
            Token::Ident(_) => Self::VarAccess(parser.expect_ident()?.into()),
            Token::LParen => {
                parser.step();
                let inner = Node::parse(parser, None)?;
                parser.expect_one(Token::RParen)?;

                inner
            },
            Token::LSBracket => Self::List(ListLiteral::parse(parser, None)?),
            Token::Plus | Token::Minus | Token::Not => Self::UnaryOp(UnaryOp::parse(parser, None)?),
            Token::If => Self::If(If::parse(parser, None)?),
            Token::For => Self::For(For::parse(parser, None)?),
            Token::While => Self::While(While::parse(parser, None)?),
            Token::Repeat => Self::Repeat(Repeat::parse(parser, None)?),
            Token::Fun => Self::FuncDef(FuncDef::parse(parser, None)?),
            _ => return parse_error(ParseErrorType::ExpectedExpression, location),
        };

        Ok(node)
    }
}

// expression -> <prefix> (<infix operator> <expression> | "(" <arguments> ")")*
impl<T: Iterator<Item = Spanned>> Parse<T> for Node {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let mut node = Node::prefix(parser, precedence)?;

        while precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence() {
            node = match parser.current() {
                Token::LParen => Self::Call(Call::parse(parser, node, precedence)?),
                _ => Self::BinaryOp(BinaryOp::parse(parser, node, precedence)?),
            };
        }

        Ok(node)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::String { value, .. } => write!(f, "{value:?}"),
            Self::List(list) => write!(f, "{list}"),
            Self::VarAccess(ident) => write!(f, "{ident}"),
            Self::VarAssign(assign) => write!(f, "{assign}"),
            Self::BinaryOp(op) => write!(f, "{op}"),
            Self::UnaryOp(op) => write!(f, "{op}"),
            Self::If(if_) => write!(f, "{if_}"),
            Self::For(for_) => write!(f, "{for_}"),
            Self::While(while_) => write!(f, "{while_}"),
            Self::Repeat(repeat) => write!(f, "{repeat}"),
            Self::FuncDef(func) => write!(f, "{func}"),
            Self::Call(call) => write!(f, "{call}"),
            Self::Return(return_) => write!(f, "{return_}"),
            Self::Continue { .. } => write!(f, "continue"),
            Self::Break { .. } => write!(f, "break"),
            Self::Block(block) => write!(f, "{block}"),
        }
    }
}

/// Writes a body either inline or as a `then ... end` block.
fn write_body(f: &mut std::fmt::Formatter<'_>, body: &Node, is_block: bool) -> std::fmt::Result {
    if is_block {
        write!(f, "\n{body}\nend")
    } else {
        write!(f, " {body}")
    }
}

// identifier -> (<letter> | _) { <letter> | <digit> | _ }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

// list -> "[" [<expr> {, <expr>}] "]"
#[derive(Debug, Clone, PartialEq)]
pub struct ListLiteral {
    pub elements: Vec<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ListLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, mut end) = parser.expect_one(Token::LSBracket)?;
        let mut elements = vec![];

        if *parser.current() == Token::RSBracket {
            end = parser.current_span().end;
            parser.step();
        } else {
            loop {
                elements.push(Node::parse(parser, None)?);

                match parser.current() {
                    Token::Comma => parser.step(),
                    Token::RSBracket => {
                        end = parser.current_span().end;
                        parser.step();
                        break;
                    },
                    _ => return Err(parser.unexpected(&["`,`", "`]`"])),
                }
            }
        }

        Ok(Self {
            elements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ListLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elements = self.elements.iter()
            .map(|element| element.to_string())
            .collect::<Vec<String>>();

        write!(f, "[{}]", elements.join(", "))
    }
}

// assignment -> <identifier> = <expr>
#[derive(Debug, Clone, PartialEq)]
pub struct VarAssign {
    pub identifier: Identifier,
    pub value: Box<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for VarAssign {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let identifier = Identifier::from(parser.expect_ident()?);

        parser.expect_one(Token::Assign)?;

        let value = Node::parse(parser, None)?;
        let location = identifier.location.to(value.location());

        Ok(Self {
            identifier,
            value: Box::new(value),
            location
        })
    }
}

impl Display for VarAssign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

// binary -> <expr> <operator> <expr>
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Box<Node>,
    pub operator: Token,
    pub right: Box<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for BinaryOp {
    fn parse(
        parser: &mut Parser<T>,
        left: Node,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();
        let operator = parser.current().clone();
        parser.step();

        // `^` is right-associative and accepts a signed exponent
        let right = match operator {
            Token::Pow => Node::parse(parser, Some(Precedence::Unary))?,
            _ => Node::parse(parser, Some(precedence))?,
        };

        let location = left.location().to(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        })
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator.as_literal(), self.right)
    }
}

// unary -> (+ | - | not) <expr>
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub operator: Token,
    pub operand: Box<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for UnaryOp {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.current_span().start;
        let operator = parser.current().clone();
        parser.step();

        let operand = match operator {
            Token::Not => Node::parse(parser, Some(Precedence::Logical))?,
            _ => Node::parse(parser, Some(Precedence::Unary))?,
        };

        let location = SrcSpan { start, end: operand.location().end };

        Ok(Self {
            operator,
            operand: Box::new(operand),
            location
        })
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.operator {
            Token::Not => write!(f, "(not {})", self.operand),
            _ => write!(f, "({}{})", self.operator.as_literal(), self.operand),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfCase {
    pub condition: Node,
    pub body: Node,
    pub should_return_null: bool
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseCase {
    pub body: Node,
    pub should_return_null: bool
}

// if -> if <expr> then (<statement> | NEWLINE <block>) {elif ...} [else ...] [end]
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub cases: Vec<IfCase>,
    pub else_case: Option<Box<ElseCase>>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for If {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::If)?;

        let mut cases = vec![];
        let mut else_case = None;

        loop {
            let condition = Node::parse(parser, None)?;
            parser.expect_one(Token::Then)?;

            if parser.at_block_start() {
                let body = Node::Block(Block::parse(parser, None)?);
                cases.push(IfCase { condition, body, should_return_null: true });

                match parser.current() {
                    Token::End => {
                        parser.step();
                        break;
                    },
                    Token::Elif => parser.step(),
                    Token::Else => {
                        parser.step();
                        else_case = Some(Box::new(ElseCase::parse(parser, None)?));
                        break;
                    },
                    _ => return Err(parser.unexpected(&["`end`", "`elif`", "`else`"])),
                }
            } else {
                let body = Node::statement(parser)?;
                cases.push(IfCase { condition, body, should_return_null: false });

                match parser.current() {
                    Token::Elif => parser.step(),
                    Token::Else => {
                        parser.step();
                        else_case = Some(Box::new(ElseCase::parse(parser, None)?));
                        break;
                    },
                    Token::End => {
                        parser.step();
                        break;
                    },
                    _ => break,
                }
            }
        }

        let start = cases[0].condition.location().start;
        let end = match (&else_case, cases.last()) {
            (Some(else_case), _) => else_case.body.location().end,
            (None, Some(case)) => case.body.location().end,
            (None, None) => start,
        };

        Ok(Self {
            cases,
            else_case,
            location: SrcSpan { start, end }
        })
    }
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ElseCase {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (body, should_return_null) = parse_body(parser)?;

        Ok(Self {
            body,
            should_return_null
        })
    }
}

impl Display for If {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, case) in self.cases.iter().enumerate() {
            let keyword = if idx == 0 { "if" } else { "elif" };

            if idx > 0 && case.should_return_null {
                writeln!(f)?;
            } else if idx > 0 {
                write!(f, " ")?;
            }

            write!(f, "{keyword} {} then", case.condition)?;

            if case.should_return_null {
                write!(f, "\n{}", case.body)?;
            } else {
                write!(f, " {}", case.body)?;
            }
        }

        let is_block = self.cases.iter().any(|case| case.should_return_null);

        if let Some(else_case) = &self.else_case {
            if is_block {
                write!(f, "\nelse")?;
            } else {
                write!(f, " else")?;
            }

            return write_body(f, &else_case.body, else_case.should_return_null);
        }

        if is_block {
            write!(f, "\nend")?;
        }

        Ok(())
    }
}

/// Parses the body after `then`: a block closed by `end`, or a single
/// statement optionally closed by `end` on the same line. The flag is true
/// for the block form.
fn parse_body<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<(Node, bool), ParseError> {
    if parser.at_block_start() {
        let block = Block::parse(parser, None)?;
        parser.expect_one(Token::End)?;

        Ok((Node::Block(block), true))
    } else {
        let body = Node::statement(parser)?;

        if *parser.current() == Token::End {
            parser.step();
        }

        Ok((body, false))
    }
}

// for -> for <identifier> = <expr> to <expr> [step <expr>] then <body>
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub variable: Identifier,
    pub start: Box<Node>,
    pub end: Box<Node>,
    pub step: Option<Box<Node>>,
    pub body: Box<Node>,
    pub should_return_null: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for For {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::For)?;

        let variable = Identifier::from(parser.expect_ident()?);
        parser.expect_one(Token::Assign)?;

        let start = Node::parse(parser, None)?;
        parser.expect_one(Token::To)?;

        let end = Node::parse(parser, None)?;

        let step = match parser.current() {
            Token::Step => {
                parser.step();
                Some(Box::new(Node::parse(parser, None)?))
            },
            _ => None
        };

        parser.expect_one(Token::Then)?;

        let (body, should_return_null) = parse_body(parser)?;
        let location = variable.location.to(body.location());

        Ok(Self {
            variable,
            start: Box::new(start),
            end: Box::new(end),
            step,
            body: Box::new(body),
            should_return_null,
            location
        })
    }
}

impl Display for For {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "for {} = {} to {}", self.variable, self.start, self.end)?;

        if let Some(step) = &self.step {
            write!(f, " step {step}")?;
        }

        write!(f, " then")?;
        write_body(f, &self.body, self.should_return_null)
    }
}

// while -> while <expr> then <body>
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Box<Node>,
    pub body: Box<Node>,
    pub should_return_null: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for While {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::While)?;

        let condition = Node::parse(parser, None)?;
        parser.expect_one(Token::Then)?;

        let (body, should_return_null) = parse_body(parser)?;
        let location = condition.location().to(body.location());

        Ok(Self {
            condition: Box::new(condition),
            body: Box::new(body),
            should_return_null,
            location
        })
    }
}

impl Display for While {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while {} then", self.condition)?;
        write_body(f, &self.body, self.should_return_null)
    }
}

// repeat -> repeat <expr> times [then] <body>
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
    pub count: Box<Node>,
    pub body: Box<Node>,
    pub should_return_null: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Repeat {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::Repeat)?;

        let count = Node::parse(parser, None)?;
        parser.expect_one(Token::Times)?;

        if *parser.current() == Token::Then {
            parser.step();
        }

        let (body, should_return_null) = parse_body(parser)?;
        let location = count.location().to(body.location());

        Ok(Self {
            count: Box::new(count),
            body: Box::new(body),
            should_return_null,
            location
        })
    }
}

impl Display for Repeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "repeat {} times then", self.count)?;
        write_body(f, &self.body, self.should_return_null)
    }
}

// function -> fun [<identifier>] "(" [<identifier> {, <identifier>}] ")" (-> <expr> | [then] NEWLINE <block> end)
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: Option<Identifier>,
    pub params: Vec<Identifier>,
    pub body: Rc<Node>,
    pub auto_return: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for FuncDef {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::Fun)?;

        let name = match parser.current() {
            Token::Ident(_) => Some(Identifier::from(parser.expect_ident()?)),
            _ => None
        };

        if *parser.current() != Token::LParen {
            let expected: &[&str] = match name {
                Some(_) => &["`(`"],
                None => &["an identifier", "`(`"],
            };

            return Err(parser.unexpected(expected));
        }
        parser.step();

        let mut params = vec![];

        if let Token::Ident(_) = parser.current() {
            loop {
                params.push(Identifier::from(parser.expect_ident()?));

                match parser.current() {
                    Token::Comma => parser.step(),
                    Token::RParen => break,
                    _ => return Err(parser.unexpected(&["`,`", "`)`"])),
                }
            }
        }

        if *parser.current() != Token::RParen {
            return Err(parser.unexpected(&["an identifier", "`)`"]));
        }
        parser.step();

        let (body, auto_return) = match parser.current() {
            Token::Arrow => {
                parser.step();
                (Node::parse(parser, None)?, true)
            },
            Token::Then | Token::Newline => {
                if *parser.current() == Token::Then {
                    parser.step();
                }

                let block = Block::parse(parser, None)?;
                parser.expect_one(Token::End)?;

                (Node::Block(block), false)
            },
            _ => return Err(parser.unexpected(&["`->`", "`then`", "a newline"])),
        };

        let start = match (&name, params.first()) {
            (Some(name), _) => name.location.start,
            (None, Some(param)) => param.location.start,
            (None, None) => body.location().start,
        };

        let location = SrcSpan { start, end: body.location().end };

        Ok(Self {
            name,
            params,
            body: Rc::new(body),
            auto_return,
            location
        })
    }
}

impl Display for FuncDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.params.iter()
            .map(|param| param.value.clone())
            .collect::<Vec<String>>();

        write!(f, "fun")?;

        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }

        write!(f, "({})", params.join(", "))?;

        if self.auto_return {
            write!(f, " -> {}", self.body)
        } else {
            write!(f, " then\n{}\nend", self.body)
        }
    }
}

// call -> <expr> "(" [<expr> {, <expr>}] ")"
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for Call {
    fn parse(
        parser: &mut Parser<T>,
        left: Node,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::LParen)?;

        let mut arguments = vec![];

        if *parser.current() == Token::RParen {
            parser.step();
        } else {
            loop {
                arguments.push(Node::parse(parser, None)?);

                match parser.current() {
                    Token::Comma => parser.step(),
                    Token::RParen => {
                        parser.step();
                        break;
                    },
                    _ => return Err(parser.unexpected(&["`,`", "`)`"])),
                }
            }
        }

        let end = match arguments.last() {
            Some(argument) => argument.location().end,
            None => left.location().end,
        };

        let location = SrcSpan { start: left.location().start, end };

        Ok(Self {
            callee: Box::new(left),
            arguments,
            location
        })
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(|argument| argument.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({})", self.callee, arguments.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Box<Node>>,
    pub location: SrcSpan
}

impl Display for Return {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {value}"),
            None => write!(f, "return"),
        }
    }
}
