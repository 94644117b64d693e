//! Construction parameters for `BucketMap`.

use core::fmt;

/// Bucket count of a map built with `BucketMap::new`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Load factor of a map built with `BucketMap::new`.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Initial capacity and load factor. Both are fixed once a map is built;
/// only the capacity moves afterwards, and only by doubling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    pub initial_capacity: usize,
    pub load_factor: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A map needs at least one bucket.
    ZeroCapacity,
    /// The load factor must be finite and lie in `(0, 1]`.
    LoadFactorOutOfRange(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => f.write_str("initial capacity must be positive"),
            ConfigError::LoadFactorOutOfRange(lf) => {
                write!(f, "load factor {lf} is outside (0, 1]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub const fn new(initial_capacity: usize, load_factor: f64) -> Self {
        Self {
            initial_capacity,
            load_factor,
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let lf = self.load_factor;
        // NaN fails both comparisons and is rejected here too.
        if !(lf.is_finite() && lf > 0.0 && lf <= 1.0) {
            return Err(ConfigError::LoadFactorOutOfRange(lf));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR)
    }
}
