use std::rc::Rc;

use thiserror::Error;

use crate::{environment::prelude::{CallFrame, OperationError}, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorType {
    #[error("'{name}' is not defined")]
    NotDefined {
        name: String
    },
    #[error("{count} too many args passed into {function}")]
    TooManyArgs {
        count: usize,
        function: String
    },
    #[error("{count} too few args passed into {function}")]
    TooFewArgs {
        count: usize,
        function: String
    },
    #[error("Illegal operation")]
    IllegalOperation,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Element index out of bounds")]
    IndexOutOfBounds,
    #[error("Repeated string is too long")]
    StringTooLong,
    #[error("'{keyword}' outside loop")]
    OutsideLoop {
        keyword: &'static str
    },
    #[error("No input received; stream closed.")]
    StreamClosed,
    #[error("Console I/O failed: {message}")]
    Io {
        message: String
    },
}

impl From<OperationError> for RuntimeErrorType {
    fn from(value: OperationError) -> Self {
        match value {
            OperationError::IllegalOperation => Self::IllegalOperation,
            OperationError::DivisionByZero => Self::DivisionByZero,
            OperationError::IndexOutOfBounds => Self::IndexOutOfBounds,
            OperationError::StringTooLong => Self::StringTooLong,
        }
    }
}

/// Failure during evaluation, located in the source and in the call chain.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub span: SrcSpan,
    pub frame: Rc<CallFrame>
}

impl RuntimeError {
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn hint(&self) -> &'static str {
        match self.error {
            RuntimeErrorType::NotDefined { .. } => "Variables must be assigned before they are used. Check the spelling, \
                and remember that names assigned inside a function are not visible outside of it.",
            RuntimeErrorType::TooManyArgs { .. }
            | RuntimeErrorType::TooFewArgs { .. } => "Pass exactly as many arguments as the function has parameters.",
            RuntimeErrorType::IllegalOperation => "This operation is not supported for these values. \
                For example numbers and strings cannot be added together, and only functions can be called.",
            RuntimeErrorType::DivisionByZero => "The right-hand side of `/` evaluated to zero. Check the divisor before dividing.",
            RuntimeErrorType::IndexOutOfBounds => "List indexes start at 0 and negative indexes count from the end. \
                The index must be a whole number smaller than the length of the list.",
            RuntimeErrorType::StringTooLong => "The repeat count on the right-hand side of `*` is too large for the string.",
            RuntimeErrorType::OutsideLoop { .. } => "`break` and `continue` can only be used inside `for`, `while` or `repeat` loops.",
            RuntimeErrorType::StreamClosed => "The program asked for input but the input stream was closed.",
            RuntimeErrorType::Io { .. } => "Reading from or writing to the console failed.",
        }
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, span: SrcSpan, frame: &Rc<CallFrame>) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, span, frame: frame.clone() })
}
