use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;

use crate::{
    eval::prelude::RuntimeErrorType,
    lexer::prelude::Token,
    utils::prelude::{SrcSpan, VectorConsoleIO}
};
use super::prelude::{
    CallFrame, Environment, NativeFunction, Number, OperationError, Value, FALSE, MAX_STRING_LEN, NULL, TRUE
};

fn int(value: i64) -> Value {
    Value::Number(Number::Int(value))
}

fn float(value: f64) -> Value {
    Value::Number(Number::Float(value))
}

fn string(value: &str) -> Value {
    Value::String(value.to_string())
}

fn list(elements: Vec<Value>) -> Value {
    elements.into()
}

#[test]
fn test_number_arithmetic() -> Result<(), OperationError> {
    assert_eq!(int(2).binary(&Token::Plus, &int(3))?, int(5));
    assert_eq!(int(2).binary(&Token::Minus, &float(0.5))?, float(1.5));
    assert_eq!(int(6).binary(&Token::Div, &int(3))?, float(2.0));
    assert_eq!(int(2).binary(&Token::Pow, &int(10))?, int(1024));
    assert_eq!(int(2).binary(&Token::Pow, &int(-1))?, float(0.5));
    assert_eq!(int(i64::MAX).binary(&Token::Plus, &int(1))?, float(i64::MAX as f64 + 1.0));
    assert_eq!(int(1).binary(&Token::Div, &int(0)), Err(OperationError::DivisionByZero));
    assert_eq!(float(1.5).binary(&Token::Div, &float(0.0)), Err(OperationError::DivisionByZero));

    Ok(())
}

#[test]
fn test_comparisons_and_logic() -> Result<(), OperationError> {
    assert_eq!(int(1).binary(&Token::Equal, &float(1.0))?, TRUE);
    assert_eq!(int(1).binary(&Token::Is, &int(2))?, FALSE);
    assert_eq!(int(1).binary(&Token::NotEqual, &int(2))?, TRUE);
    assert_eq!(int(3).binary(&Token::LessThanOrEqual, &int(3))?, TRUE);
    assert_eq!(float(2.5).binary(&Token::GreaterThan, &int(3))?, FALSE);
    assert_eq!(string("a").binary(&Token::Equal, &string("a"))?, TRUE);
    assert_eq!(int(2).binary(&Token::And, &int(0))?, FALSE);
    assert_eq!(int(0).binary(&Token::Or, &float(0.1))?, TRUE);
    assert_eq!(int(0).not()?, TRUE);
    assert_eq!(int(5).neg()?, int(-5));

    let illegal = vec![
        string("a").binary(&Token::LessThan, &string("b")),
        string("a").binary(&Token::Equal, &int(1)),
        list(vec![]).binary(&Token::Equal, &list(vec![])),
        string("a").binary(&Token::And, &int(1)),
        string("a").not(),
        string("a").neg(),
    ];

    for result in illegal {
        assert_eq!(result, Err(OperationError::IllegalOperation));
    }

    Ok(())
}

#[test]
fn test_string_operations() -> Result<(), OperationError> {
    assert_eq!(string("ab").binary(&Token::Plus, &string("cd"))?, string("abcd"));
    assert_eq!(string("ab").binary(&Token::Mul, &int(3))?, string("ababab"));
    assert_eq!(string("ab").binary(&Token::Mul, &float(2.9))?, string("abab"));
    assert_eq!(string("ab").binary(&Token::Mul, &int(-2))?, string(""));
    assert_eq!(
        string("a").binary(&Token::Mul, &int(MAX_STRING_LEN as i64 + 1)),
        Err(OperationError::StringTooLong)
    );
    assert_eq!(string("ab").binary(&Token::Mul, &int(i64::MAX)), Err(OperationError::StringTooLong));
    assert_eq!(int(3).binary(&Token::Mul, &string("ab")), Err(OperationError::IllegalOperation));
    assert_eq!(string("a").binary(&Token::Minus, &string("a")), Err(OperationError::IllegalOperation));

    Ok(())
}

#[test]
fn test_list_operations_copy() -> Result<(), OperationError> {
    let original = list(vec![int(1), int(2), int(3)]);

    let appended = original.binary(&Token::Plus, &int(4))?;
    let removed = original.binary(&Token::Minus, &int(-1))?;
    let joined = original.binary(&Token::Mul, &list(vec![string("x")]))?;

    assert_eq!(appended, list(vec![int(1), int(2), int(3), int(4)]));
    assert_eq!(removed, list(vec![int(1), int(2)]));
    assert_eq!(joined, list(vec![int(1), int(2), int(3), string("x")]));
    assert_eq!(original, list(vec![int(1), int(2), int(3)]));

    assert_eq!(original.binary(&Token::Div, &int(0))?, int(1));
    assert_eq!(original.binary(&Token::Div, &int(-3))?, int(1));
    assert_eq!(original.binary(&Token::Div, &int(3)), Err(OperationError::IndexOutOfBounds));
    assert_eq!(original.binary(&Token::Div, &int(-4)), Err(OperationError::IndexOutOfBounds));
    assert_eq!(original.binary(&Token::Div, &float(1.0)), Err(OperationError::IndexOutOfBounds));
    assert_eq!(original.binary(&Token::Minus, &int(5)), Err(OperationError::IndexOutOfBounds));
    assert_eq!(original.binary(&Token::Div, &string("0")), Err(OperationError::IllegalOperation));

    Ok(())
}

#[test]
fn test_display_and_truthiness() {
    assert_eq!(float(2.0).to_string(), "2.0");
    assert_eq!(float(0.1 + 0.2).to_string(), "0.30000000000000004");
    assert_eq!(int(-7).to_string(), "-7");
    assert_eq!(list(vec![int(1), string("a"), list(vec![float(1.5)])]).to_string(), "1, a, 1.5");
    assert_eq!(list(vec![int(1), string("a")]).repr(), "[1, \"a\"]");
    assert_eq!(Value::Native(NativeFunction::GetInt).to_string(), "<built-in function get_int>");

    assert!(int(-1).is_true());
    assert!(!float(0.0).is_true());
    assert!(!string("").is_true());
    assert!(list(vec![]).is_true());
    assert!(!Value::Native(NativeFunction::Say).is_true());
}

#[test]
fn test_scope_chain() {
    let global = Environment::global();
    let inner = Environment::child(global.clone());

    assert_eq!(inner.borrow().get("true"), Some(TRUE));
    assert_eq!(inner.borrow().get("null"), Some(NULL));
    assert_eq!(inner.borrow().get("say"), Some(Value::Native(NativeFunction::Say)));

    inner.borrow_mut().set("true", int(5));
    inner.borrow_mut().set("x", int(1));

    assert_eq!(inner.borrow().get("true"), Some(int(5)));
    assert_eq!(global.borrow().get("true"), Some(TRUE));
    assert_eq!(global.borrow().get("x"), None);

    global.borrow_mut().set("late", int(9));
    assert_eq!(inner.borrow().get("late"), Some(int(9)));
}

#[test]
fn test_frame_chain() {
    let program = CallFrame::program();
    let outer = CallFrame::call("outer", program, SrcSpan::from(10, 17));
    let inner = CallFrame::call("inner", outer, SrcSpan::from(3, 9));

    let names = inner.chain().iter()
        .map(|frame| frame.name.clone())
        .collect::<Vec<String>>();

    assert_eq!(names, vec!["<program>", "outer", "inner"]);
}

fn native_scope(args: Vec<Value>) -> Rc<RefCell<Environment>> {
    let scope = Environment::child(Environment::global());

    for (idx, arg) in args.into_iter().enumerate() {
        scope.borrow_mut().set(&format!("arg{idx}"), arg);
    }

    scope
}

#[test]
fn test_say_protocol() -> Result<(), RuntimeErrorType> {
    let console = VectorConsoleIO::with_input(["ok"]);
    let scope = native_scope(vec![string("hi"), int(2), list(vec![int(1), int(2)])]);

    let result = NativeFunction::Say.execute(&scope.borrow(), &console)?;

    assert_eq!(result, NULL);
    assert_eq!(console.take_output(), vec!["SAY_OUTPUT:hi 2 1, 2"]);

    // a closed stream only ends the wait for the acknowledgement
    NativeFunction::Say.execute(&native_scope(vec![]).borrow(), &console)?;
    assert_eq!(console.take_output(), vec!["SAY_OUTPUT:"]);

    Ok(())
}

#[test]
fn test_input_protocol() -> Result<(), RuntimeErrorType> {
    let console = VectorConsoleIO::with_input(["abc", " 42 ", "x", "2.5", "plain text "]);

    let value = NativeFunction::GetInt.execute(&native_scope(vec![string("Age?")]).borrow(), &console)?;
    assert_eq!(value, int(42));

    let value = NativeFunction::GetFloat.execute(&native_scope(vec![string("F")]).borrow(), &console)?;
    assert_eq!(value, float(2.5));

    let value = NativeFunction::GetString.execute(&native_scope(vec![int(1)]).borrow(), &console)?;
    assert_eq!(value, string("plain text "));

    assert_eq!(console.take_output(), vec![
        "INPUT_REQUEST:int:Age?",
        "Invalid integer: abc",
        "INPUT_REQUEST:int:Age?",
        "INPUT_REQUEST:float:F",
        "Invalid float: x",
        "INPUT_REQUEST:float:F",
        "INPUT_REQUEST:string:1",
    ]);

    let err = NativeFunction::GetString.execute(&native_scope(vec![string("?")]).borrow(), &console);
    assert_eq!(err, Err(RuntimeErrorType::StreamClosed));

    Ok(())
}
