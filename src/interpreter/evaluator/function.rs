/// The native table, the call boundary and the `NativeFunction` value type.
pub mod core;

/// Argument extraction and validation shared by all natives.
pub mod args;

/// `print` and `random`.
pub mod output;

/// Sound natives: single tones, sequences and jingles.
pub mod sound;

/// Pad natives: occupancy waits, occupancy checks and cancellable delays.
pub mod pads;
