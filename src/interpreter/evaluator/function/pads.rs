use crate::{
    hardware::WaitOutcome,
    interpreter::{
        evaluator::{core::EvalResult, function::core::NativeCall},
        value::Value,
    },
};

/// `waitForPlayerOnPad([pad])`: `true` once a player stands on the pad,
/// `false` on timeout, abort or delivery failure.
pub fn wait_for_player_on_pad(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let target = call.pad_target(0)?;
    let outcome = call.hardware.wait_for_occupancy(target);
    Ok(Value::Boolean(outcome == WaitOutcome::Occupied))
}

/// `waitForPlayerOnAnyPad()`: the index of the pad that got occupied, or
/// `-1` when the wait ended otherwise.
pub fn wait_for_player_on_any_pad(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let index = match call.hardware.wait_for_any_occupancy() {
        Ok(pad) => i32::from(pad),
        Err(_) => -1,
    };
    Ok(Value::Number(index))
}

pub fn wait_for_players_on_all_active_pads(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let outcome = call.hardware.wait_for_all_active_occupancy();
    Ok(Value::Boolean(outcome == WaitOutcome::Occupied))
}

/// `delay(ms)`: returns `true` if the operator cancelled during the wait.
pub fn delay(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let duration = call.unsigned(0, "duration")?;
    Ok(Value::Boolean(call.hardware.sleep_with_cancel_check(duration)))
}

pub fn is_pad_occupied(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let pad = call.pad_index(0)?;
    Ok(Value::Boolean(call.hardware.is_pad_occupied(pad)))
}
