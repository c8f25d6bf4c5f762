use crate::{
    hardware::Jingle,
    interpreter::{
        evaluator::{core::EvalResult, function::core::NativeCall},
        value::Value,
    },
};

/// `playSound(tone, durationMs[, pad])`.
///
/// Returns `true` unless the operator aborted or the pad could not be
/// reached.
pub fn play_sound(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let tone = call.unsigned(0, "tone")?;
    let duration = call.unsigned(1, "duration")?;
    let target = call.pad_target(2)?;

    let outcome = call.hardware.play_single_sound(tone, duration, target);
    Ok(Value::Boolean(outcome.played()))
}

/// `playSounds(tones, durationsMs[, pad])` with up to eight tones.
pub fn play_sounds(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let (tones, tone_count) = call.sequence(0, "tones")?;
    let (durations, duration_count) = call.sequence(1, "durations")?;
    if tone_count != duration_count {
        return Err(call.invalid(format!("{tone_count} tones but {duration_count} durations")));
    }
    let target = call.pad_target(2)?;

    let outcome = call.hardware.play_sound_sequence(&tones, &durations, target);
    Ok(Value::Boolean(outcome.played()))
}

/// `playJingle(name[, pad])`, where `name` is one of `"correct"`, `"wrong"`,
/// `"winner"` or `"loser"`.
pub fn play_jingle(call: &mut NativeCall<'_>) -> EvalResult<Value> {
    let name = call.string(0, "name")?;
    let jingle = Jingle::from_name(name).ok_or_else(|| {
                                            call.invalid(format!("unknown jingle '{name}', expected correct, wrong, winner or loser"))
                                        })?;
    play(call, jingle, 1)
}

/// The `play...Jingle([pad])` shortcuts.
pub fn play_fixed_jingle(call: &mut NativeCall<'_>, jingle: Jingle) -> EvalResult<Value> {
    play(call, jingle, 0)
}

fn play(call: &mut NativeCall<'_>, jingle: Jingle, pad_index: usize) -> EvalResult<Value> {
    let target = call.pad_target(pad_index)?;
    let outcome = call.hardware.play_named_jingle(jingle, target);
    Ok(Value::Boolean(outcome.played()))
}
