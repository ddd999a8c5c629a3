//! Adapter configuration.
//!
//! Caching is off unless a [`CacheConfig`] is supplied when an adapter is
//! built. Embedders that configure through the environment can use
//! [`AdapterConfig::from_env`], which reads `SEARCH_ADAPTER_*` variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::time::Duration;

/// Default lifetime of result-cache and checkpoint-cache entries.
pub const DEFAULT_ENTRY_TTL: Duration = Duration::from_secs(5 * 60);

/// Bounds for the result cache and the checkpoint cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Max backend pages kept in the result cache.
    pub result_cache_max_entries: u64,

    /// Max resolved output-page checkpoints. Entries are small (a page number
    /// and an offset, or one cursor), so this can be much larger than the
    /// result cache.
    pub checkpoint_cache_max_entries: u64,

    /// Time after insertion when an entry expires. Default: five minutes.
    pub entry_ttl: Duration,
}

impl CacheConfig {
    const ENV_RESULT_CACHE_ENTRIES: &'static str = "SEARCH_ADAPTER_RESULT_CACHE_ENTRIES";
    const ENV_CHECKPOINT_CACHE_ENTRIES: &'static str = "SEARCH_ADAPTER_CHECKPOINT_CACHE_ENTRIES";
    const ENV_CACHE_TTL_SECS: &'static str = "SEARCH_ADAPTER_CACHE_TTL_SECS";

    /// Creates a cache pair with the default entry TTL.
    pub fn new(result_cache_max_entries: u64, checkpoint_cache_max_entries: u64) -> Self {
        Self {
            result_cache_max_entries,
            checkpoint_cache_max_entries,
            entry_ttl: DEFAULT_ENTRY_TTL,
        }
    }

    pub fn entry_ttl(mut self, ttl: Duration) -> Self {
        self.entry_ttl = ttl;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.result_cache_max_entries == 0 {
            return Err(ConfigError::ZeroCapacity {
                name: "result_cache_max_entries",
            });
        }
        if self.checkpoint_cache_max_entries == 0 {
            return Err(ConfigError::ZeroCapacity {
                name: "checkpoint_cache_max_entries",
            });
        }
        if self.entry_ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        Ok(())
    }

    /// Reads the cache pair from the environment.
    ///
    /// Returns `Ok(None)` when neither capacity is set (caching disabled).
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let result = parse_u64_from_env(Self::ENV_RESULT_CACHE_ENTRIES)?;
        let checkpoint = parse_u64_from_env(Self::ENV_CHECKPOINT_CACHE_ENTRIES)?;

        let (result, checkpoint) = match (result, checkpoint) {
            (None, None) => return Ok(None),
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar {
                    name: Self::ENV_CHECKPOINT_CACHE_ENTRIES,
                });
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar {
                    name: Self::ENV_RESULT_CACHE_ENTRIES,
                });
            }
            (Some(result), Some(checkpoint)) => (result, checkpoint),
        };

        let mut config = Self::new(result, checkpoint);
        if let Some(secs) = parse_u64_from_env(Self::ENV_CACHE_TTL_SECS)? {
            config.entry_ttl = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(Some(config))
    }
}

/// Construction-time settings for a [`FilterAdapter`](crate::FilterAdapter).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Result and checkpoint cache bounds; `None` disables caching.
    pub cache: Option<CacheConfig>,

    /// Fixed page size for backend fetches. `None` fetches backend pages with
    /// the requested output page size.
    pub backend_page_size: Option<u64>,
}

impl AdapterConfig {
    const ENV_BACKEND_PAGE_SIZE: &'static str = "SEARCH_ADAPTER_BACKEND_PAGE_SIZE";

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn backend_page_size(mut self, size: u64) -> Self {
        self.backend_page_size = Some(size);
        self
    }

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            cache: CacheConfig::from_env()?,
            backend_page_size: parse_u64_from_env(Self::ENV_BACKEND_PAGE_SIZE)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref cache) = self.cache {
            cache.validate()?;
        }
        if self.backend_page_size == Some(0) {
            return Err(ConfigError::ZeroBackendPageSize);
        }
        Ok(())
    }
}

fn parse_u64_from_env(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|source| ConfigError::InvalidNumber {
                    name,
                    value: value.clone(),
                    source,
                })
        }
        Err(_) => Ok(None),
    }
}
