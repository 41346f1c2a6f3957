//! Configuration errors. Fatal at initialization: a vehicle is never
//! simulated from a configuration that failed validation.

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A profile or tuning field is out of its valid range.
    #[error("invalid value for '{field}': {value} ({reason})")]
    InvalidField {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The lane table has no entries.
    #[error("lane table is empty")]
    EmptyLaneTable,

    /// The starting lane does not index into the lane table.
    #[error("start lane {start} out of range for {count} lanes")]
    StartLaneOutOfRange { start: usize, count: usize },

    /// A spawn range has min > max.
    #[error("range '{field}' is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// The spawner has no traffic templates to pick from.
    #[error("spawner has no traffic templates")]
    NoTemplates,

    /// A pattern step names a lane outside the lane table.
    #[error("pattern '{pattern}' uses lane {lane}, but there are only {count} lanes")]
    PatternLaneOutOfRange {
        pattern: String,
        lane: usize,
        count: usize,
    },

    /// Pool sizes must satisfy `defaultCapacity <= maxSize <= limit`.
    #[error("invalid pool sizes: defaultCapacity {default_capacity}, maxSize {max_size} (limit {limit})")]
    PoolSize {
        default_capacity: usize,
        max_size: usize,
        limit: usize,
    },

    /// Malformed JSON.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}
