/// Numeric conversion helpers.
///
/// Script Numbers are `i32`, while the hardware speaks in unsigned durations,
/// tones and single-byte pad addresses. These helpers convert without silent
/// wrap-around and let the caller choose the error.
pub mod num;
