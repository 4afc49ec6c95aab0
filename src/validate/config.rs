// Configuration for log timestamp validation
//
// Defaults match what operators expect from a quick scan: five samples per
// issue kind, samples cut at 200 characters, five minutes of tolerated
// backwards drift and lines up to 1 MiB.

use serde::{Deserialize, Serialize};

/// Backwards drift, in seconds, that is not reported as a regression
pub const DEFAULT_REGRESSION_TOLERANCE_SECS: u32 = 5 * 60;

/// Tunables for one validation pass
///
/// # Example
/// ```
/// use timeguard::validate::ValidatorConfig;
///
/// let config = ValidatorConfig::default();
/// assert_eq!(config.sample_limit, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Sample lines kept per issue kind
    pub sample_limit: usize,

    /// Stored samples are cut to this many bytes (at a char boundary) and
    /// suffixed with `…`. The scan itself always sees the full line.
    pub sample_max_bytes: usize,

    /// Backwards jumps up to this many seconds are treated as clock skew or
    /// out-of-order delivery rather than a regression
    pub regression_tolerance_secs: u32,

    /// Longest line accepted, excluding the terminator; longer lines abort the pass
    pub max_line_bytes: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            sample_limit: 5,
            sample_max_bytes: 200,
            regression_tolerance_secs: DEFAULT_REGRESSION_TOLERANCE_SECS,
            max_line_bytes: 1024 * 1024,
        }
    }
}

impl ValidatorConfig {
    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    pub fn regression_tolerance(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.regression_tolerance_secs))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_line_bytes == 0 {
            return Err("max_line_bytes must be positive".to_string());
        }

        if self.sample_max_bytes == 0 {
            return Err("sample_max_bytes must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert_eq!(config.sample_limit, 5);
        assert_eq!(config.sample_max_bytes, 200);
        assert_eq!(config.regression_tolerance(), chrono::Duration::minutes(5));
        assert_eq!(config.max_line_bytes, 1_048_576);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ValidatorConfig::default()
            .with_sample_limit(0)
            .with_max_line_bytes(64);
        assert_eq!(config.sample_limit, 0);
        assert_eq!(config.max_line_bytes, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_line_limit_rejected() {
        let config = ValidatorConfig::default().with_max_line_bytes(0);
        assert!(config.validate().unwrap_err().contains("max_line_bytes"));
    }

    #[test]
    fn test_zero_sample_width_rejected() {
        let config = ValidatorConfig {
            sample_max_bytes: 0,
            ..ValidatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
