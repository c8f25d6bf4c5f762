/// Converts a Number to `u32` if it is non-negative.
///
/// ## Parameters
/// - `value`: The Number to convert.
/// - `error`: The error to return if the value is negative.
///
/// ## Example
/// ```
/// use padscript::util::num::i32_to_u32_checked;
///
/// assert_eq!(i32_to_u32_checked(250, "negative"), Ok(250));
/// assert_eq!(i32_to_u32_checked(-1, "negative"), Err("negative"));
/// ```
pub fn i32_to_u32_checked<E>(value: i32, error: E) -> Result<u32, E> {
    u32::try_from(value).map_err(|_| error)
}

/// Converts a Number to `u8` if it lies in `0..=255`.
///
/// ## Example
/// ```
/// use padscript::util::num::i32_to_u8_checked;
///
/// assert_eq!(i32_to_u8_checked(255, ()), Ok(255));
/// assert_eq!(i32_to_u8_checked(256, ()), Err(()));
/// ```
pub fn i32_to_u8_checked<E>(value: i32, error: E) -> Result<u8, E> {
    u8::try_from(value).map_err(|_| error)
}

