//! Timeout configuration for backend requests.

use std::time::Duration;

/// Timeout configuration for the transport.
///
/// Exceeding either limit surfaces as [`FetchError::Unreachable`], not as
/// a distinct timeout kind.
///
/// [`FetchError::Unreachable`]: crate::FetchError::Unreachable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total request timeout.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: (total / 2).max(Duration::from_millis(1)),
            total,
        }
    }

    /// Create from whole seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self::from_total(Duration::from_secs(secs))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_secs(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ten_seconds() {
        let config = TimeoutConfig::default();
        assert_eq!(config.total, Duration::from_secs(10));
        assert_eq!(config.connect, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_total_keeps_nonzero_connect() {
        let config = TimeoutConfig::from_total(Duration::ZERO);
        assert!(config.connect > Duration::ZERO);
    }
}
