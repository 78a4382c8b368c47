use std::{fmt, num::NonZeroUsize, str::FromStr};

use crate::error::HistoryError;

/// Maximum number of commands a history retains.
///
/// When the limit is exceeded on `add`, the oldest commands are evicted first.
/// A raw value of `0` means [`Limit::Unbounded`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    #[default]
    Unbounded,
    Max(NonZeroUsize),
}

impl Limit {
    /// Builds a limit from a raw count, `0` meaning unbounded.
    #[must_use]
    pub fn new(max: usize) -> Self {
        NonZeroUsize::new(max).map_or(Limit::Unbounded, Limit::Max)
    }

    /// Returns the limit as a raw count, `0` meaning unbounded.
    #[must_use]
    pub fn get(self) -> usize {
        match self {
            Limit::Unbounded => 0,
            Limit::Max(max) => max.get(),
        }
    }

    /// Returns how many commands must be dropped from a history of `len`
    /// commands to satisfy this limit.
    #[must_use]
    pub fn excess(self, len: usize) -> usize {
        match self {
            Limit::Unbounded => 0,
            Limit::Max(max) => len.saturating_sub(max.get()),
        }
    }
}

impl From<usize> for Limit {
    fn from(max: usize) -> Self {
        Limit::new(max)
    }
}

impl From<NonZeroUsize> for Limit {
    fn from(max: NonZeroUsize) -> Self {
        Limit::Max(max)
    }
}

impl TryFrom<i64> for Limit {
    type Error = HistoryError;

    fn try_from(max: i64) -> Result<Self, Self::Error> {
        usize::try_from(max)
            .map(Limit::from)
            .map_err(|_| HistoryError::InvalidLimit(max))
    }
}

impl FromStr for Limit {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(max) => Limit::try_from(max),
            Err(_) => Err(HistoryError::ParseLimit(s.to_owned())),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Unbounded => f.write_str("unbounded"),
            Limit::Max(max) => write!(f, "{max}"),
        }
    }
}

/// Construction-time settings shared by both history managers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    pub limit: Limit,
}

impl HistoryConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(mut self, max: usize) -> Self {
        self.limit = Limit::new(max);
        self
    }
}
