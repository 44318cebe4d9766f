use std::{cell::RefCell, cmp::Ordering, fmt::Display, rc::Rc};

use crate::{lexer::prelude::Token, parser::prelude::{Node, NumberLiteral}};

use super::prelude::{Environment, NativeFunction};

pub const NULL: Value = Value::Number(Number::Int(0));
pub const FALSE: Value = Value::Number(Number::Int(0));
pub const TRUE: Value = Value::Number(Number::Int(1));

/// Upper bound in bytes for a string built by repetition.
pub const MAX_STRING_LEN: usize = 1 << 28;

/// Reasons a value operation can fail. The evaluator turns these into
/// runtime errors located on the operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    IllegalOperation,
    DivisionByZero,
    IndexOutOfBounds,
    StringTooLong,
}

type OperationResult = Result<Value, OperationError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(value) => value == 0,
            Self::Float(value) => value == 0.0,
        }
    }

    pub fn from_bool(value: bool) -> Self {
        Self::Int(value as i64)
    }

    /// Count for string repetition and `repeat`, truncated toward zero.
    pub fn truncate(self) -> i64 {
        match self {
            Self::Int(value) => value,
            Self::Float(value) => value.trunc() as i64,
        }
    }

    pub fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left.checked_add(right)
                .map(Self::Int)
                .unwrap_or(Self::Float(left as f64 + right as f64)),
            (left, right) => Self::Float(left.as_f64() + right.as_f64()),
        }
    }

    pub fn sub(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left.checked_sub(right)
                .map(Self::Int)
                .unwrap_or(Self::Float(left as f64 - right as f64)),
            (left, right) => Self::Float(left.as_f64() - right.as_f64()),
        }
    }

    pub fn mul(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left.checked_mul(right)
                .map(Self::Int)
                .unwrap_or(Self::Float(left as f64 * right as f64)),
            (left, right) => Self::Float(left.as_f64() * right.as_f64()),
        }
    }

    pub fn div(self, other: Self) -> Result<Self, OperationError> {
        if other.is_zero() {
            return Err(OperationError::DivisionByZero);
        }

        Ok(Self::Float(self.as_f64() / other.as_f64()))
    }

    pub fn pow(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(base), Self::Int(exp)) if exp >= 0 => u32::try_from(exp)
                .ok()
                .and_then(|exp| base.checked_pow(exp))
                .map(Self::Int)
                .unwrap_or(Self::Float((base as f64).powf(exp as f64))),
            (base, exp) => Self::Float(base.as_f64().powf(exp.as_f64())),
        }
    }

    pub fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => Some(left.cmp(&right)),
            (left, right) => left.as_f64().partial_cmp(&right.as_f64()),
        }
    }

    pub fn neg(self) -> Self {
        match self {
            Self::Int(value) => value.checked_neg()
                .map(Self::Int)
                .unwrap_or(Self::Float(-(value as f64))),
            Self::Float(value) => Self::Float(-value),
        }
    }
}

impl From<NumberLiteral> for Number {
    fn from(value: NumberLiteral) -> Self {
        match value {
            NumberLiteral::Int(value) => Self::Int(value),
            NumberLiteral::Float(value) => Self::Float(value),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 => {
                write!(f, "{value:.1}")
            },
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// User defined function together with the scope it was created in.
pub struct Function {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Rc<Node>,
    pub auto_return: bool,
    pub closure: Rc<RefCell<Environment>>,
}

impl Function {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

// The captured scope usually contains the function itself.
impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .field("params", &self.params)
            .field("auto_return", &self.auto_return)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Number(Number),
    String(String),
    List(Rc<Vec<Value>>),
    Function(Rc<Function>),
    Native(NativeFunction),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Function(left), Self::Function(right)) => Rc::ptr_eq(left, right),
            (Self::Native(left), Self::Native(right)) => left == right,
            _ => false,
        }
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(Rc::new(value))
    }
}

impl Value {
    pub fn is_true(&self) -> bool {
        match self {
            Self::Number(number) => !number.is_zero(),
            Self::String(value) => !value.is_empty(),
            Self::List(_) => true,
            Self::Function(_) | Self::Native(_) => false,
        }
    }

    /// Quoted form used for list elements in debug output.
    pub fn repr(&self) -> String {
        match self {
            Self::String(value) => format!("\"{value}\""),
            Self::List(elements) => {
                let elements = elements.iter()
                    .map(|element| element.repr())
                    .collect::<Vec<String>>();

                format!("[{}]", elements.join(", "))
            },
            _ => self.to_string(),
        }
    }

    /// Applies a binary operator token. `is` behaves as `==`.
    pub fn binary(&self, operator: &Token, other: &Value) -> OperationResult {
        match operator {
            Token::Plus => self.add(other),
            Token::Minus => self.sub(other),
            Token::Mul => self.mul(other),
            Token::Div => self.div(other),
            Token::Pow => self.pow(other),
            Token::Equal | Token::Is => self.equals(other, true),
            Token::NotEqual => self.equals(other, false),
            Token::LessThan => self.ordered(other, |ord| ord == Ordering::Less),
            Token::GreaterThan => self.ordered(other, |ord| ord == Ordering::Greater),
            Token::LessThanOrEqual => self.ordered(other, |ord| ord != Ordering::Greater),
            Token::GreaterThanOrEqual => self.ordered(other, |ord| ord != Ordering::Less),
            Token::And => self.logical(other, |left, right| left && right),
            Token::Or => self.logical(other, |left, right| left || right),
            _ => Err(OperationError::IllegalOperation),
        }
    }

    pub fn add(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => Ok(Self::Number(left.add(*right))),
            (Self::String(left), Self::String(right)) => Ok(Self::String(format!("{left}{right}"))),
            (Self::List(elements), value) => {
                let mut elements = elements.as_ref().clone();
                elements.push(value.clone());

                Ok(elements.into())
            },
            _ => Err(OperationError::IllegalOperation),
        }
    }

    pub fn sub(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => Ok(Self::Number(left.sub(*right))),
            (Self::List(elements), Self::Number(index)) => {
                let index = list_index(elements.len(), *index)
                    .ok_or(OperationError::IndexOutOfBounds)?;

                let mut elements = elements.as_ref().clone();
                elements.remove(index);

                Ok(elements.into())
            },
            _ => Err(OperationError::IllegalOperation),
        }
    }

    pub fn mul(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => Ok(Self::Number(left.mul(*right))),
            (Self::String(value), Self::Number(count)) => {
                let count = usize::try_from(count.truncate()).unwrap_or(0);

                match value.len().checked_mul(count) {
                    Some(len) if len <= MAX_STRING_LEN => Ok(Self::String(value.repeat(count))),
                    _ => Err(OperationError::StringTooLong),
                }
            },
            (Self::List(left), Self::List(right)) => {
                let elements = left.iter()
                    .chain(right.iter())
                    .cloned()
                    .collect::<Vec<Value>>();

                Ok(elements.into())
            },
            _ => Err(OperationError::IllegalOperation),
        }
    }

    pub fn div(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => Ok(Self::Number(left.div(*right)?)),
            (Self::List(elements), Self::Number(index)) => {
                let index = list_index(elements.len(), *index)
                    .ok_or(OperationError::IndexOutOfBounds)?;

                Ok(elements[index].clone())
            },
            _ => Err(OperationError::IllegalOperation),
        }
    }

    pub fn pow(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Self::Number(base), Self::Number(exp)) => Ok(Self::Number(base.pow(*exp))),
            _ => Err(OperationError::IllegalOperation),
        }
    }

    fn equals(&self, other: &Value, expected: bool) -> OperationResult {
        let equal = match (self, other) {
            (Self::Number(left), Self::Number(right)) => left.compare(*right) == Some(Ordering::Equal),
            (Self::String(left), Self::String(right)) => left == right,
            _ => return Err(OperationError::IllegalOperation),
        };

        Ok(Self::Number(Number::from_bool(equal == expected)))
    }

    fn ordered(&self, other: &Value, accept: fn(Ordering) -> bool) -> OperationResult {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => {
                let result = left.compare(*right).is_some_and(accept);

                Ok(Self::Number(Number::from_bool(result)))
            },
            _ => Err(OperationError::IllegalOperation),
        }
    }

    fn logical(&self, other: &Value, combine: fn(bool, bool) -> bool) -> OperationResult {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => {
                let result = combine(!left.is_zero(), !right.is_zero());

                Ok(Self::Number(Number::from_bool(result)))
            },
            _ => Err(OperationError::IllegalOperation),
        }
    }

    pub fn not(&self) -> OperationResult {
        match self {
            Self::Number(number) => Ok(Self::Number(Number::from_bool(number.is_zero()))),
            _ => Err(OperationError::IllegalOperation),
        }
    }

    pub fn neg(&self) -> OperationResult {
        match self {
            Self::Number(number) => Ok(Self::Number(number.neg())),
            _ => Err(OperationError::IllegalOperation),
        }
    }
}

/// Resolves a possibly negative index against a list of `len` elements.
fn list_index(len: usize, index: Number) -> Option<usize> {
    let Number::Int(index) = index else {
        return None;
    };

    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { index + len } else { index };

    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::String(value) => write!(f, "{value}"),
            Self::List(elements) => {
                let elements = elements.iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>();

                write!(f, "{}", elements.join(", "))
            },
            Self::Function(function) => write!(f, "<function {}>", function.name()),
            Self::Native(native) => write!(f, "<built-in function {}>", native.name()),
        }
    }
}
