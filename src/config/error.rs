//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A cache capacity of zero would disable the cache while pretending to use it.
    #[error("{name} must be greater than zero")]
    ZeroCapacity { name: &'static str },

    /// Entries would expire immediately.
    #[error("cache entry time-to-live must be greater than zero")]
    ZeroTtl,

    /// Backend pages must hold at least one item.
    #[error("backend page size must be greater than zero")]
    ZeroBackendPageSize,

    /// An environment value could not be parsed as a number.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Only one half of the cache pair was configured.
    ///
    /// Caching needs both capacities; setting just one of the two variables is
    /// almost certainly a deployment mistake, so it is reported instead of
    /// silently disabling caching.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },
}
