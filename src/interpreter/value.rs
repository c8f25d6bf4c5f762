/// The runtime value enum, its kind tags and display formatting.
pub mod core;

pub use self::core::{Value, ValueKind};
