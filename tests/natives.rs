mod common;

use common::{assert_failure, assert_value, rig, run_on};
use padscript::{
    error::RuntimeError,
    hardware::{
        Jingle, PadTarget, WaitOutcome,
        simulated::{HardwareEvent, SimulatedRig},
    },
    interpreter::value::Value,
};
use pretty_assertions::assert_eq;

fn value_on(rig: &mut SimulatedRig, src: &str) -> Value {
    match run_on(rig, src) {
        Ok(execution) => execution.value,
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

#[test]
fn arity_is_checked_before_the_call() {
    let e = assert_failure("print();");
    assert_eq!(e,
               RuntimeError::ArgumentCountMismatch { function: "print",
                                                     expected: "1".to_string(),
                                                     found:    0,
                                                     line:     1, });
    assert!(matches!(assert_failure("playSound(1);"),
                     RuntimeError::ArgumentCountMismatch { function: "playSound", .. }));
    assert!(matches!(assert_failure("waitForPlayerOnAnyPad(1);"),
                     RuntimeError::ArgumentCountMismatch { .. }));
}

#[test]
fn arguments_are_not_coerced() {
    assert!(matches!(assert_failure("playSound(\"440\", 100);"),
                     RuntimeError::InvalidArgument { function: "playSound", .. }));
    assert!(matches!(assert_failure("delay(true);"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(assert_failure("playJingle(1);"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn random_stays_in_range() {
    let mut rig = rig();
    for _ in 0..20 {
        let Value::Number(n) = value_on(&mut rig, "random(3, 6);") else {
            panic!("random must return a Number");
        };
        assert!((3..6).contains(&n));
    }
    assert_value("random(1);", 0);
    assert!(matches!(assert_failure("random(5, 5);"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(assert_failure("random(0);"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn play_sound_reaches_the_rig() {
    let mut rig = rig();
    assert_eq!(value_on(&mut rig, "playSound(440, 100);"), Value::Boolean(true));
    assert_eq!(value_on(&mut rig, "playSound(880, 50, 2);"), Value::Boolean(true));
    assert_eq!(value_on(&mut rig, "playSound(880, 50, 255);"), Value::Boolean(true));
    assert_eq!(rig.events(),
               [HardwareEvent::Sound { tone:        440,
                                       duration_ms: 100,
                                       target:      PadTarget::Any, },
                HardwareEvent::Sound { tone:        880,
                                       duration_ms: 50,
                                       target:      PadTarget::Pad(2), },
                HardwareEvent::Sound { tone:        880,
                                       duration_ms: 50,
                                       target:      PadTarget::Any, }]);
}

#[test]
fn play_failures_are_values_not_errors() {
    let mut rig = rig();
    assert_eq!(value_on(&mut rig, "playSound(440, 100, 7);"), Value::Boolean(false));

    rig.set_play_outcome(WaitOutcome::UserAbort);
    assert_eq!(value_on(&mut rig, "playWinnerJingle();"), Value::Boolean(false));
}

#[test]
fn bad_pads_and_durations_are_rejected() {
    assert!(matches!(assert_failure("playSound(440, -1);"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(assert_failure("playSound(440, 10, 256);"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(assert_failure("playSound(440, 10, -1);"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(assert_failure("isPadOccupied(255);"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn sound_sequences_are_zero_filled() {
    let mut rig = rig();
    assert_eq!(value_on(&mut rig, "playSounds([440, 880], [100, 200], 1);"), Value::Boolean(true));
    assert_eq!(rig.events(),
               [HardwareEvent::Sequence { tones:        [440, 880, 0, 0, 0, 0, 0, 0],
                                          durations_ms: [100, 200, 0, 0, 0, 0, 0, 0],
                                          target:       PadTarget::Pad(1), }]);

    assert!(matches!(assert_failure("playSounds([1, 2], [1]);"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(assert_failure("playSounds([1, 2, 3, 4, 5, 6, 7, 8, 9], [1, 1, 1, 1, 1, 1, 1, 1, 1]);"),
                     RuntimeError::InvalidArgument { .. }));
    assert!(matches!(assert_failure("playSounds(1, [1]);"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn jingles_by_name_and_shortcut() {
    let mut rig = rig();
    value_on(&mut rig, "playJingle(\"winner\"); playCorrectActionJingle(0); playLoserJingle();");
    assert_eq!(rig.events(),
               [HardwareEvent::Jingle { jingle: Jingle::Winner,
                                        tones:  &[880, 1100, 1320, 1100, 1320, 1760],
                                        target: PadTarget::Any, },
                HardwareEvent::Jingle { jingle: Jingle::Correct,
                                        tones:  &[880, 1100, 1320, 1760],
                                        target: PadTarget::Pad(0), },
                HardwareEvent::Jingle { jingle: Jingle::Loser,
                                        tones:  &[1760, 1320, 1100, 1320, 1100, 880],
                                        target: PadTarget::Any, }]);

    assert!(matches!(assert_failure("playJingle(\"tada\");"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn waiting_for_pads() {
    let mut rig = rig();
    rig.queue_arrival(1).queue_arrival(2);

    assert_eq!(value_on(&mut rig, "waitForPlayerOnPad(1);"), Value::Boolean(true));
    assert_eq!(value_on(&mut rig, "waitForPlayerOnAnyPad();"), Value::Number(2));
    assert_eq!(value_on(&mut rig, "waitForPlayerOnAnyPad();"), Value::Number(-1));
    assert_eq!(value_on(&mut rig, "waitForPlayerOnPad(0);"), Value::Boolean(false));
    assert_eq!(value_on(&mut rig, "isPadOccupied(1);"), Value::Boolean(true));
    assert_eq!(value_on(&mut rig, "isPadOccupied(0);"), Value::Boolean(false));

    assert_eq!(value_on(&mut rig, "waitForPlayersOnAllActivePads();"), Value::Boolean(false));
    rig.queue_arrival(0).queue_arrival(1).queue_arrival(2);
    assert_eq!(value_on(&mut rig, "waitForPlayersOnAllActivePads();"), Value::Boolean(true));
}

#[test]
fn delay_reports_cancellation() {
    let mut rig = rig();
    assert_eq!(value_on(&mut rig, "delay(10);"), Value::Boolean(false));
    rig.cancel_next_sleep();
    assert_eq!(value_on(&mut rig, "delay(10);"), Value::Boolean(true));
    assert_eq!(rig.events().last(),
               Some(&HardwareEvent::Sleep { duration_ms: 10,
                                            cancelled:   true, }));
}

#[test]
fn natives_are_constant_values() {
    assert!(matches!(assert_failure("print == print;"),
                     RuntimeError::UnsupportedOperator { operator: "==", .. }));
    assert!(matches!(assert_failure("let print = 1;"), RuntimeError::Redeclaration { .. }));
    assert_value("{ let print = 1; print; }", 1);
}

#[test]
fn game_round_on_the_rig() {
    let mut rig = rig();
    rig.queue_arrival(0).queue_arrival(2).queue_arrival(1);

    let src = r#"
        let order = [0, 2, 1];
        let state = { round: 0, score: 0 };
        while (state.round < 3) {
            let pad = waitForPlayerOnAnyPad();
            if (pad == order[state.round]) {
                playCorrectActionJingle(pad);
                state.score = state.score + 1;
            } else {
                playWrongActionJingle(pad);
            }
            state.round = state.round + 1;
        }
        print(state);
        state.score;
    "#;
    assert_eq!(value_on(&mut rig, src), Value::Number(3));
    assert_eq!(rig.output(), ["{ round: 3, score: 3 }"]);
}
