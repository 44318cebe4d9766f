use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{
    environment::prelude::{Environment, Number, Value, NULL},
    parser::prelude::parse_module,
    utils::prelude::{SrcSpan, VectorConsoleIO}
};
use super::prelude::{Evaluator, RuntimeError, RuntimeErrorType};

fn run_with_input(src: &str, input: &[&str]) -> (Result<Value, RuntimeError>, Vec<String>) {
    let module = match parse_module("test.lrl", src) {
        Ok(module) => module,
        Err(err) => panic!("{src:?} failed to parse: {err:?}"),
    };

    let console = VectorConsoleIO::with_input(input.iter().copied());
    let evaluator = Evaluator::new(Environment::global(), Rc::new(console.clone()));

    let result = evaluator.eval_program(&module.program);

    (result, console.take_output())
}

fn run(src: &str) -> Result<Value, RuntimeError> {
    run_with_input(src, &[]).0
}

fn int(value: i64) -> Value {
    Value::Number(Number::Int(value))
}

fn list(elements: Vec<Value>) -> Value {
    elements.into()
}

#[test]
fn test_say() -> Result<(), RuntimeError> {
    let (result, output) = run_with_input("say(\"hi\")", &["continue"]);

    assert_eq!(result?, NULL);
    assert_eq!(output, vec!["SAY_OUTPUT:hi"]);

    Ok(())
}

#[test]
fn test_functions() -> Result<(), RuntimeError> {
    assert_eq!(run("fun add(a, b) -> a + b\nadd(2, 3)")?, int(5));
    assert_eq!(run("double = fun (x) -> x * 2\ndouble(21)")?, int(42));
    assert_eq!(run("fun f() then\n  5\nend\nf()")?, NULL);
    assert_eq!(run("fun f() then\n  return\nend\nf()")?, NULL);
    assert_eq!(run("fun f() -> 1\nf")?.to_string(), "<function f>");

    let fib = r#"
        fun fib(n) then
            if n < 2 then return n
            return fib(n - 1) + fib(n - 2)
        end
        fib(15)
    "#;
    assert_eq!(run(fib)?, int(610));

    Ok(())
}

#[test]
fn test_for_loop_output() -> Result<(), RuntimeError> {
    let (result, output) = run_with_input("for i = 0 to 3 then\n  say(i)\nend", &["", "", ""]);

    assert_eq!(result?, NULL);
    assert_eq!(output, vec!["SAY_OUTPUT:0", "SAY_OUTPUT:1", "SAY_OUTPUT:2"]);

    let (result, output) = run_with_input("for i = 0 to 3 then say(i) end", &["", "", ""]);
    assert_eq!(result?, list(vec![int(0), int(0), int(0)]));
    assert_eq!(output, vec!["SAY_OUTPUT:0", "SAY_OUTPUT:1", "SAY_OUTPUT:2"]);

    let (result, _) = run_with_input("n = 0\nwhile n < 3 then n = n + 1 end\nn", &[]);
    assert_eq!(result?, int(3));

    let (_, output) = run_with_input("for i = 3 to 0 step -1 then say(i)", &[]);
    assert_eq!(output, vec!["SAY_OUTPUT:3", "SAY_OUTPUT:2", "SAY_OUTPUT:1"]);

    let (_, output) = run_with_input("repeat 2.9 times then\n  say(\"x\")\nend", &[]);
    assert_eq!(output, vec!["SAY_OUTPUT:x", "SAY_OUTPUT:x"]);

    Ok(())
}

#[test]
fn test_inline_loops_collect_values() -> Result<(), RuntimeError> {
    assert_eq!(run("for i = 1 to 4 then i * 2")?, list(vec![int(2), int(4), int(6)]));
    assert_eq!(run("n = 0\nwhile n < 3 then n = n + 1")?, list(vec![int(1), int(2), int(3)]));
    assert_eq!(run("repeat 2 times \"a\"")?.repr(), "[\"a\", \"a\"]");
    assert_eq!(run("n = 0\nwhile n < 3 then\n  n = n + 1\nend")?, NULL);

    Ok(())
}

#[test]
fn test_logical_operators_are_eager() -> Result<(), RuntimeError> {
    let (result, output) = run_with_input("0 and say(\"side\")", &[""]);
    assert_eq!(result?, int(0));
    assert_eq!(output, vec!["SAY_OUTPUT:side"]);

    let (result, output) = run_with_input("1 or say(\"side\")", &[""]);
    assert_eq!(result?, int(1));
    assert_eq!(output, vec!["SAY_OUTPUT:side"]);

    Ok(())
}

#[test]
fn test_if_values() -> Result<(), RuntimeError> {
    assert_eq!(run("if 0 then 1 elif \"s\" then 2 else 3")?, int(2));
    assert_eq!(run("if [] then 1 else 2")?, int(1));
    assert_eq!(run("if 0 then 1")?, NULL);
    assert_eq!(run("if 1 then\n  5\nend")?, NULL);
    assert_eq!(run("x = 0\nif 0 then\n  x = 1\nelse\n  x = 2\nend\nx")?, int(2));

    Ok(())
}

#[test]
fn test_scopes_do_not_leak() -> Result<(), RuntimeError> {
    let src = "x = 1\nfun f() then\n  x = 2\n  y = 3\nend\nf()\nx";
    assert_eq!(run(src)?, int(1));

    let err = run("fun f() then\n  y = 3\nend\nf()\ny").unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::NotDefined { name: "y".into() });
    assert_eq!(err.message(), "'y' is not defined");

    let err = run("foo + 1").unwrap_err();
    assert_eq!(err.span, SrcSpan::from(0, 3));

    Ok(())
}

#[test]
fn test_closures_see_their_scope() -> Result<(), RuntimeError> {
    assert_eq!(run("n = 1\nfun get() -> n\nn = 5\nget()")?, int(5));

    let src = r#"
        fun make() then
            count = 10
            return fun () -> count
        end
        counter = make()
        counter()
    "#;
    assert_eq!(run(src)?, int(10));

    Ok(())
}

#[test]
fn test_break_and_continue_are_innermost() -> Result<(), RuntimeError> {
    let src = r#"
        total = 0
        for i = 0 to 3 then
            for j = 0 to 10 then
                if j == 2 then break
                total = total + 1
            end
        end
        total
    "#;
    assert_eq!(run(src)?, int(6));

    let src = "s = 0\nfor i = 0 to 5 then\n  if i == 2 then continue\n  s = s + i\nend\ns";
    assert_eq!(run(src)?, int(8));

    let src = "n = 0\nwhile 1 then\n  n = n + 1\n  if n is 4 then break\nend\nn";
    assert_eq!(run(src)?, int(4));

    Ok(())
}

#[test]
fn test_return_ends_the_call() -> Result<(), RuntimeError> {
    let src = r#"
        fun find() then
            for i = 0 to 100 then
                if i == 7 then return i
            end
            return -1
        end
        find()
    "#;
    assert_eq!(run(src)?, int(7));

    let (result, output) = run_with_input("return 5\nsay(1)", &[]);
    assert_eq!(result?, int(5));
    assert!(output.is_empty());

    Ok(())
}

#[test]
fn test_signals_outside_loops() {
    let err = run("fun f() then\n  break\nend\nf()").unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::OutsideLoop { keyword: "break" });
    assert_eq!(err.frame.name, "f");
    assert_eq!(err.span, SrcSpan::from(15, 20));

    let err = run("continue").unwrap_err();
    assert_eq!(err.message(), "'continue' outside loop");
    assert_eq!(err.frame.name, "<program>");
}

#[test]
fn test_arity() {
    let err = run("fun f(a) -> a\nf(1, 2)").unwrap_err();
    assert_eq!(err.message(), "1 too many args passed into <function f>");
    assert_eq!(err.span, SrcSpan::from(14, 20));

    let err = run("fun f(a, b, c) -> a\nf(1)").unwrap_err();
    assert_eq!(err.message(), "2 too few args passed into <function f>");

    let err = run("get_int()").unwrap_err();
    assert_eq!(err.message(), "1 too few args passed into <built-in function get_int>");
}

#[test]
fn test_operation_errors() {
    let err = run("1 / 0").unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::DivisionByZero);
    assert_eq!(err.span, SrcSpan::from(4, 5));

    let err = run("[1,2,3] / 5").unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::IndexOutOfBounds);
    assert_eq!(err.span, SrcSpan::from(10, 11));

    let err = run("\"ab\" * 9000000000000000000").unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::StringTooLong);
    assert_eq!(err.span, SrcSpan::from(7, 26));

    let err = run("\"a\" + 1").unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::IllegalOperation);
    assert_eq!(err.span, SrcSpan::from(0, 7));

    let err = run("x = 5\nx()").unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::IllegalOperation);

    let err = run("-\"abc\"").unwrap_err();
    assert_eq!(err.span, SrcSpan::from(0, 6));
}

#[test]
fn test_errors_carry_the_call_chain() {
    let src = "fun inner(x) -> x / 0\nfun outer() -> inner(1)\nouter()";
    let err = run(src).unwrap_err();

    let names = err.frame.chain().iter()
        .map(|frame| frame.name.clone())
        .collect::<Vec<String>>();

    assert_eq!(names, vec!["<program>", "outer", "inner"]);
}

#[test]
fn test_input_natives() -> Result<(), RuntimeError> {
    let (result, output) = run_with_input("x = get_int(\"n?\")\nx * 2", &["oops", "21"]);

    assert_eq!(result?, int(42));
    assert_eq!(output, vec![
        "INPUT_REQUEST:int:n?",
        "Invalid integer: oops",
        "INPUT_REQUEST:int:n?",
    ]);

    let (result, _) = run_with_input("name = get_string(\"Name\")\n\"Hi \" + name", &["Ada"]);
    assert_eq!(result?, Value::String("Hi Ada".into()));

    let (result, output) = run_with_input("get_float(\"f\")", &[]);
    let err = result.unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::StreamClosed);
    assert_eq!(err.span, SrcSpan::from(0, 13));
    assert_eq!(err.frame.name, "get_float");
    assert_eq!(err.frame.parent.as_ref().map(|parent| parent.name.as_str()), Some("<program>"));
    assert_eq!(output, vec!["INPUT_REQUEST:float:f"]);

    Ok(())
}

proptest! {
    #[test]
    fn test_division_is_exact(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        prop_assume!(b != 0);

        let result = run(&format!("{a} / {b}"));
        prop_assert_eq!(result, Ok(Value::Number(Number::Float(a as f64 / b as f64))));
    }

    #[test]
    fn test_division_by_zero_points_at_divisor(a in -10_000i64..10_000) {
        let src = format!("{a} / 0");
        let end = src.len() as u32;

        let err = run(&src).unwrap_err();
        prop_assert_eq!(err.error, RuntimeErrorType::DivisionByZero);
        prop_assert_eq!(err.span, SrcSpan::from(end - 1, end));
    }
}
