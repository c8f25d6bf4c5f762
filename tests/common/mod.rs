#![allow(dead_code)]

use padscript::{
    Execution,
    config::Limits,
    error::{ParseError, RuntimeError},
    hardware::simulated::SimulatedRig,
    interpreter::value::Value,
    run_script,
};

pub fn rig() -> SimulatedRig {
    SimulatedRig::new(3).with_seed(1)
}

pub fn run_on(rig: &mut SimulatedRig, src: &str) -> Result<Execution, RuntimeError> {
    run_script(src.as_bytes(), rig, Limits::default())
}

pub fn assert_success(src: &str) -> Execution {
    match run_on(&mut rig(), src) {
        Ok(execution) => execution,
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

pub fn assert_failure(src: &str) -> RuntimeError {
    match run_on(&mut rig(), src) {
        Ok(execution) => panic!("Script succeeded with {} but was expected to fail\n{src}",
                                execution.value),
        Err(e) => e,
    }
}

/// Runs a script that must parse cleanly and returns its final value.
pub fn assert_value(src: &str, expected: impl Into<Value>) {
    let execution = assert_success(src);
    assert!(execution.diagnostics.is_empty(),
            "Unexpected diagnostics {:?}\n{src}",
            execution.diagnostics);
    assert_eq!(execution.value, expected.into(), "{src}");
}

pub fn diagnostics(src: &str) -> Vec<ParseError> {
    assert_success(src).diagnostics
}

/// Runs a script and returns everything it printed.
pub fn output(src: &str) -> Vec<String> {
    let mut rig = rig();
    if let Err(e) = run_on(&mut rig, src) {
        panic!("Script failed: {e}\n{src}");
    }
    rig.output().to_vec()
}
