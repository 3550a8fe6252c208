//! Row ordering rules: problem rows first, then a secondary key.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort `rows` so that every row for which `is_problem` holds comes first,
/// then order each group with `secondary`.
///
/// The sort is stable, so rows that compare equal keep their input order.
pub fn problems_first<T>(
    rows: &mut [T],
    is_problem: impl Fn(&T) -> bool,
    mut secondary: impl FnMut(&T, &T) -> Ordering,
) {
    rows.sort_by(|a, b| {
        is_problem(b)
            .cmp(&is_problem(a))
            .then_with(|| secondary(a, b))
    });
}

/// Case-insensitive name comparison with a byte-wise tie break.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// User-selectable secondary ordering of the container table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSort {
    /// Container name only, hosts interleaved.
    Name,
    /// Host name, then container name.
    #[default]
    Host,
}

impl ServiceSort {
    /// The other sort key.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Name => Self::Host,
            Self::Host => Self::Name,
        }
    }

    /// Wire/form value of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Host => "host",
        }
    }

    /// Compare two `(host, name)` pairs according to this key.
    #[must_use]
    pub fn compare(self, a: (&str, &str), b: (&str, &str)) -> Ordering {
        match self {
            Self::Name => compare_names(a.1, b.1).then_with(|| compare_names(a.0, b.0)),
            Self::Host => compare_names(a.0, b.0).then_with(|| compare_names(a.1, b.1)),
        }
    }
}

impl fmt::Display for ServiceSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort key.
#[derive(Debug, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for ServiceSort {
    type Err = UnknownSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "host" => Ok(Self::Host),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}
