#[cfg(test)]
mod tests;

pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        Evaluator,
        Flow
    };
}

use std::{cell::RefCell, rc::Rc};

use crate::{
    environment::prelude::{CallFrame, Environment, Function, Number, OperationError, Value, NULL},
    lexer::prelude::Token,
    parser::prelude::{
        BinaryOp, Block, Call, For, FuncDef, If, Node, Repeat, UnaryOp, While
    },
    utils::prelude::{ConsoleIO, SrcSpan}
};
use error::{runtime_error, RuntimeError, RuntimeErrorType};

type Env = Rc<RefCell<Environment>>;

/// Outcome of evaluating a node: a plain value or a control signal that
/// unwinds until a loop or call consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal(Value),
    Return(Value),
    Break(SrcSpan),
    Continue(SrcSpan),
}

type EvalResult = Result<Flow, RuntimeError>;

/// Unwraps a plain value, handing any signal back to the caller.
macro_rules! value {
    ($flow:expr) => {
        match $flow {
            Flow::Normal(value) => value,
            signal => return Ok(signal),
        }
    };
}

pub struct Evaluator {
    globals: Env,
    io: Rc<dyn ConsoleIO>,
}

impl Evaluator {
    pub fn new(globals: Env, io: Rc<dyn ConsoleIO>) -> Self {
        Self { globals, io }
    }

    /// Runs a whole program in the global scope. A top-level `return` ends
    /// the program with its value.
    pub fn eval_program(&self, program: &Block) -> Result<Value, RuntimeError> {
        let frame = CallFrame::program();
        let globals = self.globals.clone();

        match self.eval_block(program, &globals, &frame)? {
            Flow::Normal(value) | Flow::Return(value) => Ok(value),
            Flow::Break(span) => runtime_error(RuntimeErrorType::OutsideLoop { keyword: "break" }, span, &frame),
            Flow::Continue(span) => runtime_error(RuntimeErrorType::OutsideLoop { keyword: "continue" }, span, &frame),
        }
    }

    pub fn eval(&self, node: &Node, env: &Env, frame: &Rc<CallFrame>) -> EvalResult {
        let value = match node {
            Node::Number { value, .. } => Value::Number(Number::from(*value)),
            Node::String { value, .. } => Value::String(value.clone()),
            Node::List(list) => {
                let mut elements = Vec::with_capacity(list.elements.len());

                for element in &list.elements {
                    elements.push(value!(self.eval(element, env, frame)?));
                }

                elements.into()
            },
            Node::VarAccess(ident) => {
                let value = env.borrow().get(&ident.value);

                match value {
                    Some(value) => value,
                    None => return runtime_error(
                        RuntimeErrorType::NotDefined { name: ident.value.clone() },
                        ident.location,
                        frame
                    ),
                }
            },
            Node::VarAssign(assign) => {
                let value = value!(self.eval(&assign.value, env, frame)?);
                env.borrow_mut().set(&assign.identifier.value, value.clone());

                value
            },
            Node::BinaryOp(op) => return self.eval_binary(op, env, frame),
            Node::UnaryOp(op) => return self.eval_unary(op, env, frame),
            Node::If(if_) => return self.eval_if(if_, env, frame),
            Node::For(for_) => return self.eval_for(for_, env, frame),
            Node::While(while_) => return self.eval_while(while_, env, frame),
            Node::Repeat(repeat) => return self.eval_repeat(repeat, env, frame),
            Node::FuncDef(func) => self.eval_func_def(func, env),
            Node::Call(call) => return self.eval_call(call, env, frame),
            Node::Return(return_) => {
                let value = match &return_.value {
                    Some(value) => value!(self.eval(value, env, frame)?),
                    None => NULL,
                };

                return Ok(Flow::Return(value));
            },
            Node::Continue { location } => return Ok(Flow::Continue(*location)),
            Node::Break { location } => return Ok(Flow::Break(*location)),
            Node::Block(block) => return self.eval_block(block, env, frame),
        };

        Ok(Flow::Normal(value))
    }

    fn eval_block(&self, block: &Block, env: &Env, frame: &Rc<CallFrame>) -> EvalResult {
        let mut last = NULL;

        for statement in &block.statements {
            last = value!(self.eval(statement, env, frame)?);
        }

        Ok(Flow::Normal(last))
    }

    fn eval_binary(&self, op: &BinaryOp, env: &Env, frame: &Rc<CallFrame>) -> EvalResult {
        // both sides are always evaluated, `and`/`or` included
        let left = value!(self.eval(&op.left, env, frame)?);
        let right = value!(self.eval(&op.right, env, frame)?);

        match left.binary(&op.operator, &right) {
            Ok(value) => Ok(Flow::Normal(value)),
            Err(error) => {
                let span = match error {
                    OperationError::IllegalOperation => op.left.location().to(op.right.location()),
                    OperationError::DivisionByZero
                    | OperationError::IndexOutOfBounds
                    | OperationError::StringTooLong => op.right.location(),
                };

                runtime_error(error.into(), span, frame)
            },
        }
    }

    fn eval_unary(&self, op: &UnaryOp, env: &Env, frame: &Rc<CallFrame>) -> EvalResult {
        let operand = value!(self.eval(&op.operand, env, frame)?);

        let result = match op.operator {
            Token::Minus => operand.neg(),
            Token::Not => operand.not(),
            _ => match operand {
                Value::Number(_) => Ok(operand),
                _ => Err(OperationError::IllegalOperation),
            },
        };

        match result {
            Ok(value) => Ok(Flow::Normal(value)),
            Err(error) => runtime_error(error.into(), op.location, frame),
        }
    }

    fn eval_if(&self, if_: &If, env: &Env, frame: &Rc<CallFrame>) -> EvalResult {
        for case in &if_.cases {
            let condition = value!(self.eval(&case.condition, env, frame)?);

            if condition.is_true() {
                let value = value!(self.eval(&case.body, env, frame)?);

                return Ok(Flow::Normal(if case.should_return_null { NULL } else { value }));
            }
        }

        if let Some(else_case) = &if_.else_case {
            let value = value!(self.eval(&else_case.body, env, frame)?);

            return Ok(Flow::Normal(if else_case.should_return_null { NULL } else { value }));
        }

        Ok(Flow::Normal(NULL))
    }

    fn eval_number(&self, node: &Node, env: &Env, frame: &Rc<CallFrame>) -> Result<Result<Number, Flow>, RuntimeError> {
        match self.eval(node, env, frame)? {
            Flow::Normal(Value::Number(number)) => Ok(Ok(number)),
            Flow::Normal(_) => runtime_error(RuntimeErrorType::IllegalOperation, node.location(), frame),
            signal => Ok(Err(signal)),
        }
    }

    fn eval_for(&self, for_: &For, env: &Env, frame: &Rc<CallFrame>) -> EvalResult {
        let mut current = match self.eval_number(&for_.start, env, frame)? {
            Ok(number) => number,
            Err(signal) => return Ok(signal),
        };

        let end = match self.eval_number(&for_.end, env, frame)? {
            Ok(number) => number,
            Err(signal) => return Ok(signal),
        };

        let step = match &for_.step {
            Some(step) => match self.eval_number(step, env, frame)? {
                Ok(number) => number,
                Err(signal) => return Ok(signal),
            },
            None => Number::Int(1),
        };

        let ascending = step.compare(Number::Int(0)).is_some_and(|ord| ord.is_ge());
        let mut elements = vec![];

        loop {
            let proceed = match current.compare(end) {
                Some(ord) if ascending => ord.is_lt(),
                Some(ord) => ord.is_gt(),
                None => false,
            };

            if !proceed {
                break;
            }

            env.borrow_mut().set(&for_.variable.value, Value::Number(current));
            current = current.add(step);

            match self.eval(&for_.body, env, frame)? {
                Flow::Normal(value) => elements.push(value),
                Flow::Continue(_) => continue,
                Flow::Break(_) => break,
                signal @ Flow::Return(_) => return Ok(signal),
            }
        }

        Ok(Flow::Normal(loop_value(elements, for_.should_return_null)))
    }

    fn eval_while(&self, while_: &While, env: &Env, frame: &Rc<CallFrame>) -> EvalResult {
        let mut elements = vec![];

        loop {
            let condition = value!(self.eval(&while_.condition, env, frame)?);

            if !condition.is_true() {
                break;
            }

            match self.eval(&while_.body, env, frame)? {
                Flow::Normal(value) => elements.push(value),
                Flow::Continue(_) => continue,
                Flow::Break(_) => break,
                signal @ Flow::Return(_) => return Ok(signal),
            }
        }

        Ok(Flow::Normal(loop_value(elements, while_.should_return_null)))
    }

    fn eval_repeat(&self, repeat: &Repeat, env: &Env, frame: &Rc<CallFrame>) -> EvalResult {
        let count = match self.eval_number(&repeat.count, env, frame)? {
            Ok(number) => number.truncate(),
            Err(signal) => return Ok(signal),
        };

        let mut elements = vec![];

        for _ in 0..count.max(0) {
            match self.eval(&repeat.body, env, frame)? {
                Flow::Normal(value) => elements.push(value),
                Flow::Continue(_) => continue,
                Flow::Break(_) => break,
                signal @ Flow::Return(_) => return Ok(signal),
            }
        }

        Ok(Flow::Normal(loop_value(elements, repeat.should_return_null)))
    }

    fn eval_func_def(&self, func: &FuncDef, env: &Env) -> Value {
        let name = func.name.as_ref().map(|name| name.value.clone());

        let function = Value::Function(Rc::new(Function {
            name: name.clone(),
            params: func.params.iter().map(|param| param.value.clone()).collect(),
            body: func.body.clone(),
            auto_return: func.auto_return,
            closure: env.clone(),
        }));

        if let Some(name) = name {
            env.borrow_mut().set(&name, function.clone());
        }

        function
    }

    fn eval_call(&self, call: &Call, env: &Env, frame: &Rc<CallFrame>) -> EvalResult {
        let callee = value!(self.eval(&call.callee, env, frame)?);

        let mut args = Vec::with_capacity(call.arguments.len());

        for argument in &call.arguments {
            args.push(value!(self.eval(argument, env, frame)?));
        }

        self.call(&callee, args, call.location, frame).map(Flow::Normal)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(callee = %callee, args = args.len()))]
    fn call(
        &self,
        callee: &Value,
        args: Vec<Value>,
        location: SrcSpan,
        frame: &Rc<CallFrame>
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Function(function) => {
                check_arity(callee, function.params.len(), args.len(), location, frame)?;

                let call_frame = CallFrame::call(function.name(), frame.clone(), location);
                let scope = Environment::child(function.closure.clone());

                for (param, arg) in function.params.iter().zip(args) {
                    scope.borrow_mut().set(param, arg);
                }

                match self.eval(&function.body, &scope, &call_frame)? {
                    Flow::Normal(value) if function.auto_return => Ok(value),
                    Flow::Normal(_) => Ok(NULL),
                    Flow::Return(value) => Ok(value),
                    Flow::Break(span) => runtime_error(
                        RuntimeErrorType::OutsideLoop { keyword: "break" },
                        span,
                        &call_frame
                    ),
                    Flow::Continue(span) => runtime_error(
                        RuntimeErrorType::OutsideLoop { keyword: "continue" },
                        span,
                        &call_frame
                    ),
                }
            },
            Value::Native(native) => {
                if let Some(arity) = native.arity() {
                    check_arity(callee, arity, args.len(), location, frame)?;
                }

                let scope = Environment::child(self.globals.clone());

                for (idx, arg) in args.into_iter().enumerate() {
                    scope.borrow_mut().set(&format!("arg{idx}"), arg);
                }

                let call_frame = CallFrame::call(native.name(), frame.clone(), location);
                let result = native.execute(&scope.borrow(), self.io.as_ref());

                result.map_err(|error| RuntimeError {
                    error,
                    span: location,
                    frame: call_frame
                })
            },
            _ => runtime_error(RuntimeErrorType::IllegalOperation, location, frame),
        }
    }
}

fn check_arity(
    callee: &Value,
    expected: usize,
    given: usize,
    location: SrcSpan,
    frame: &Rc<CallFrame>
) -> Result<(), RuntimeError> {
    let function = callee.to_string();

    if given > expected {
        return runtime_error(RuntimeErrorType::TooManyArgs { count: given - expected, function }, location, frame);
    }

    if given < expected {
        return runtime_error(RuntimeErrorType::TooFewArgs { count: expected - given, function }, location, frame);
    }

    Ok(())
}

/// Single-line loops collect their body values, block loops yield null.
fn loop_value(elements: Vec<Value>, should_return_null: bool) -> Value {
    if should_return_null {
        NULL
    } else {
        elements.into()
    }
}
