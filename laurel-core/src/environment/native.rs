use crate::{eval::prelude::RuntimeErrorType, utils::prelude::ConsoleIO};

use super::prelude::{Environment, Number, Value, NULL};

/// Built-in functions available in the global scope. Arguments arrive as
/// `arg0`, `arg1`, ... in the call scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeFunction {
    Say,
    GetInt,
    GetFloat,
    GetString,
}

impl NativeFunction {
    pub const ALL: [NativeFunction; 4] = [
        Self::Say,
        Self::GetInt,
        Self::GetFloat,
        Self::GetString,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Say => "say",
            Self::GetInt => "get_int",
            Self::GetFloat => "get_float",
            Self::GetString => "get_string",
        }
    }

    /// Parameter count, `None` when any number of arguments is accepted.
    pub fn arity(self) -> Option<usize> {
        match self {
            Self::Say => None,
            Self::GetInt | Self::GetFloat | Self::GetString => Some(1),
        }
    }

    pub fn execute(self, env: &Environment, io: &dyn ConsoleIO) -> Result<Value, RuntimeErrorType> {
        match self {
            Self::Say => say(env, io),
            Self::GetInt => read_input(env, io, InputKind::Int),
            Self::GetFloat => read_input(env, io, InputKind::Float),
            Self::GetString => read_input(env, io, InputKind::String),
        }
    }
}

fn arguments(env: &Environment) -> Vec<Value> {
    (0..)
        .map_while(|idx| env.store.get(&format!("arg{idx}")).cloned())
        .collect()
}

fn write(io: &dyn ConsoleIO, line: &str) -> Result<(), RuntimeErrorType> {
    tracing::trace!(%line, "console write");

    io.write_line(line).map_err(|err| RuntimeErrorType::Io { message: err.to_string() })
}

fn say(env: &Environment, io: &dyn ConsoleIO) -> Result<Value, RuntimeErrorType> {
    let text = arguments(env).iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>()
        .join(" ");

    write(io, &format!("SAY_OUTPUT:{text}"))?;

    // acknowledgement line, a closed stream is not an error here
    let ack = io.read_line();
    tracing::trace!(?ack, "console acknowledgement");

    Ok(NULL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Int,
    Float,
    String,
}

impl InputKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

fn read_input(env: &Environment, io: &dyn ConsoleIO, kind: InputKind) -> Result<Value, RuntimeErrorType> {
    let prompt = env.store.get("arg0")
        .map(|value| value.to_string())
        .unwrap_or_default();

    let request = format!("INPUT_REQUEST:{}:{prompt}", kind.as_str());
    write(io, &request)?;

    loop {
        let line = io.read_line()
            .map_err(|err| RuntimeErrorType::Io { message: err.to_string() })?
            .ok_or(RuntimeErrorType::StreamClosed)?;

        tracing::trace!(%line, "console read");

        match kind {
            InputKind::String => return Ok(Value::String(line)),
            InputKind::Int => match line.trim().parse::<i64>() {
                Ok(value) => return Ok(Value::Number(Number::Int(value))),
                Err(_) => write(io, &format!("Invalid integer: {line}"))?,
            },
            InputKind::Float => match line.trim().parse::<f64>() {
                Ok(value) => return Ok(Value::Number(Number::Float(value))),
                Err(_) => write(io, &format!("Invalid float: {line}"))?,
            },
        }

        write(io, &request)?;
    }
}
