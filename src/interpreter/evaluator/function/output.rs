use crate::interpreter::{
    evaluator::{core::EvalResult, function::core::NativeCall},
    value::Value,
};

/// Prints a value through the host and returns `Null`.
///
/// Accepts exactly one argument of any kind. Strings print without quotes;
/// objects and arrays print with their members.
pub fn print(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let text = call.args[0].to_string();
    call.hardware.print(&text);
    Ok(Value::Null)
}

/// Returns a random Number.
///
/// `random(max)` draws from `0..max` and `random(min, max)` from `min..max`.
///
/// # Errors
/// `InvalidArgument` when a bound is not a Number or `max <= min`.
pub fn random(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let (min, max) = if call.args.len() == 1 {
        (0, call.number(0, "max")?)
    } else {
        (call.number(0, "min")?, call.number(1, "max")?)
    };
    if max <= min {
        return Err(call.invalid(format!("max must be greater than {min}, found {max}")));
    }
    Ok(Value::Number(call.hardware.random(min, max)))
}
