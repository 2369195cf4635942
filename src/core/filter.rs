//! Name-based logger enablement
//!
//! The set of live loggers is configured by a comma-separated list of glob
//! patterns, normally taken from the `LOKI_ENV` environment variable:
//!
//! ```text
//! LOKI_ENV="app:http*,app:db,worker.?"
//! ```
//!
//! Matching is plain glob over the whole name: `*` is any run of characters
//! (separators included), `?` is exactly one character, `[...]` is a class and
//! everything else matches literally. There is no implicit prefix matching, so
//! `app:xxx` enables `app:xxx` but not `app:xxx1`.
//!
//! The root logger (empty name) is always enabled.

use super::error::{LoggerError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::env;

/// Environment variable holding the enablement patterns
pub const ENV_VAR: &str = "LOKI_ENV";

/// Name of the root logger
pub const ROOT_LOGGER_NAME: &str = "";

/// Compiled, immutable allow-list of logger names
#[derive(Debug, Clone)]
pub struct EnablementFilter {
    patterns: Vec<String>,
    set: GlobSet,
}

impl EnablementFilter {
    /// Compile a comma-separated pattern list.
    ///
    /// Surrounding whitespace is trimmed and empty entries are skipped. A
    /// list with no entries at all enables every logger. Any pattern that
    /// fails to compile aborts the whole configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use loki_logger::EnablementFilter;
    ///
    /// let filter = EnablementFilter::from_config("app:http*, app:db").unwrap();
    /// assert!(filter.is_enabled("app:http:server"));
    /// assert!(filter.is_enabled("app:db"));
    /// assert!(!filter.is_enabled("app:dbx"));
    /// assert!(filter.is_enabled(""));
    ///
    /// assert!(EnablementFilter::from_config("app:[").is_err());
    /// ```
    pub fn from_config(config: &str) -> Result<Self> {
        let patterns: Vec<&str> = config
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if patterns.is_empty() {
            return Ok(Self::allow_all());
        }
        Self::from_patterns(patterns)
    }

    /// Compile an explicit pattern list; an empty list enables only the root.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut sources = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .backslash_escape(true)
                .build()
                .map_err(|error| LoggerError::invalid_pattern(pattern, error))?;
            builder.add(glob);
            sources.push(pattern.to_string());
        }

        let set = builder
            .build()
            .map_err(|error| LoggerError::invalid_pattern(sources.join(","), error))?;

        Ok(Self {
            patterns: sources,
            set,
        })
    }

    /// Read and compile `LOKI_ENV`; unset or blank enables every logger.
    pub fn from_env() -> Result<Self> {
        let value = env::var(ENV_VAR).ok();
        Self::from_env_value(value.as_deref())
    }

    /// Same policy as [`from_env`](Self::from_env) for an already-read value
    pub fn from_env_value(value: Option<&str>) -> Result<Self> {
        match value {
            Some(config) => Self::from_config(config),
            None => Ok(Self::allow_all()),
        }
    }

    /// Enables every logger
    pub fn allow_all() -> Self {
        // "*" always compiles
        Self::from_patterns(["*"]).unwrap_or_else(|_| Self::root_only())
    }

    /// Enables only the root logger
    pub fn root_only() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    /// Whether a logger with this name may emit at all
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        name == ROOT_LOGGER_NAME || self.set.is_match(name)
    }

    /// The source patterns, in configuration order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for EnablementFilter {
    fn default() -> Self {
        Self::allow_all()
    }
}
