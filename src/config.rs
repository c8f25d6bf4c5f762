use thiserror::Error;
use tracing::warn;

/// Default number of pads on a rig.
pub const DEFAULT_PAD_COUNT: u8 = 3;
/// Default time in milliseconds a pad waits for a player.
pub const DEFAULT_WAIT_TIMEOUT_MS: u32 = 7000;
/// Pads are addressed with a single byte and 255 means "any pad".
pub const MAX_PAD_COUNT: u8 = 8;

/// Bounds that keep a run recursion-safe and allocation-bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest nesting of blocks and expressions the parser accepts.
    pub max_nesting_depth: usize,
    /// Deepest recursion the evaluator accepts.
    pub max_eval_depth:    usize,
    /// Most tokens the lexer produces for one script.
    pub max_tokens:        usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_nesting_depth: 64,
               max_eval_depth:    256,
               max_tokens:        8192, }
    }
}

/// Errors raised while reading the configuration preamble.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Malformed preamble entry '{entry}', expected key=value.")]
    MalformedEntry {
        /// The entry as written.
        entry: String,
    },
    #[error("Invalid value '{value}' for preamble key '{key}'.")]
    InvalidValue {
        /// The key being set.
        key:   String,
        /// The rejected value.
        value: String,
    },
}

/// Device settings sent ahead of a script as `key=value;key=value;...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Number of active pads.
    pub pads:              u8,
    /// Time in milliseconds a pad waits for a player before timing out.
    pub wait_timeout_ms:   u32,
    /// Seed for the rig's random source, if fixed.
    pub seed:              Option<u64>,
    /// Overrides [`Limits::max_nesting_depth`] when present.
    pub max_nesting_depth: Option<usize>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self { pads:              DEFAULT_PAD_COUNT,
               wait_timeout_ms:   DEFAULT_WAIT_TIMEOUT_MS,
               seed:              None,
               max_nesting_depth: None, }
    }
}

impl DeviceConfig {
    /// Parses a configuration preamble.
    ///
    /// Entries are separated by `;` and empty entries are skipped, so a
    /// trailing separator is fine. Unknown keys are logged and ignored.
    ///
    /// # Errors
    /// - `MalformedEntry` if an entry has no `=` or an empty key.
    /// - `InvalidValue` if a known key gets a value it cannot take.
    ///
    /// # Example
    /// ```
    /// use padscript::config::DeviceConfig;
    ///
    /// let config = DeviceConfig::from_preamble("pads=4;timeout=5000;").unwrap();
    /// assert_eq!(config.pads, 4);
    /// assert_eq!(config.wait_timeout_ms, 5000);
    /// assert_eq!(config.seed, None);
    /// ```
    pub fn from_preamble(preamble: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for entry in preamble.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((key, value)) = entry.split_once('=') else {
                return Err(ConfigError::MalformedEntry { entry: entry.to_string() });
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() {
                return Err(ConfigError::MalformedEntry { entry: entry.to_string() });
            }

            let invalid = || ConfigError::InvalidValue { key:   key.to_string(),
                                                         value: value.to_string(), };
            match key {
                "pads" => {
                    config.pads = value.parse()
                                       .ok()
                                       .filter(|n| (1..=MAX_PAD_COUNT).contains(n))
                                       .ok_or_else(invalid)?;
                },
                "timeout" => config.wait_timeout_ms = value.parse().map_err(|_| invalid())?,
                "seed" => config.seed = Some(value.parse().map_err(|_| invalid())?),
                "maxDepth" => {
                    config.max_nesting_depth =
                        Some(value.parse().ok().filter(|&n| n > 0).ok_or_else(invalid)?);
                },
                _ => warn!(key, value, "ignoring unknown preamble key"),
            }
        }

        Ok(config)
    }

    /// Applies the overrides this configuration carries to a set of limits.
    #[must_use]
    pub fn limits(&self, base: Limits) -> Limits {
        Limits { max_nesting_depth: self.max_nesting_depth.unwrap_or(base.max_nesting_depth),
                 ..base }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_preamble_is_default() {
        assert_eq!(DeviceConfig::from_preamble("").unwrap(), DeviceConfig::default());
        assert_eq!(DeviceConfig::from_preamble(" ; ;").unwrap(), DeviceConfig::default());
    }

    #[test]
    fn all_keys() {
        let config = DeviceConfig::from_preamble("pads = 2; timeout=100;seed=9;maxDepth=10").unwrap();
        assert_eq!(config,
                   DeviceConfig { pads:              2,
                                  wait_timeout_ms:   100,
                                  seed:              Some(9),
                                  max_nesting_depth: Some(10), });
        assert_eq!(config.limits(Limits::default()).max_nesting_depth, 10);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = DeviceConfig::from_preamble("volume=11;pads=1").unwrap();
        assert_eq!(config.pads, 1);
    }

    #[test]
    fn malformed_entries_fail() {
        assert_eq!(DeviceConfig::from_preamble("pads"),
                   Err(ConfigError::MalformedEntry { entry: "pads".to_string() }));
        assert!(matches!(DeviceConfig::from_preamble("=3"),
                         Err(ConfigError::MalformedEntry { .. })));
    }

    #[test]
    fn out_of_range_values_fail() {
        for preamble in ["pads=0", "pads=9", "pads=x", "timeout=-1", "maxDepth=0", "seed=abc"] {
            assert!(matches!(DeviceConfig::from_preamble(preamble),
                             Err(ConfigError::InvalidValue { .. })),
                    "{preamble} should be rejected");
        }
    }
}
