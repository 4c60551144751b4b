use std::fmt;
use std::str::FromStr;

use crate::WidgetValueError;

/// Decimal tweet identifier of arbitrary length.
///
/// Snowflake ids do not fit every runtime's safe integer range, so the id is
/// kept as a canonical digit string: ASCII digits only, no sign, no leading
/// zeros (`"0"` for an all-zero input).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TweetId(String);

impl TweetId {
    pub fn parse(candidate: &str) -> Result<Self, WidgetValueError> {
        if candidate.is_empty() || !candidate.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WidgetValueError::UnparseableId);
        }

        let trimmed = candidate.trim_start_matches('0');
        let canonical = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(Self(canonical.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for TweetId {
    type Err = WidgetValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
