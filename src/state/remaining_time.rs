//! `MM:SS` countdown value

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Largest value representable as `MM:SS`
const MAX_SECONDS: u32 = 99 * 60 + 59;

/// Remaining time of a countdown, always between `00:00` and `99:59`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemainingTime(u32);

impl RemainingTime {
    pub const ZERO: Self = Self(0);

    /// Build from a number of seconds, clamped to `99:59`
    pub fn from_secs(seconds: u32) -> Self {
        Self(seconds.min(MAX_SECONDS))
    }

    pub fn as_secs(&self) -> u32 {
        self.0
    }

    pub fn minutes(&self) -> u32 {
        self.0 / 60
    }

    pub fn seconds(&self) -> u32 {
        self.0 % 60
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// One second less, or `None` once the countdown is exhausted
    pub fn pred(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds())
    }
}

impl FromStr for RemainingTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (minutes, seconds) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid time '{}': expected MM:SS", s))?;

        let parse_field = |field: &str, max: u32, name: &str| -> Result<u32, String> {
            if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("Invalid {} '{}' in '{}'", name, field, s));
            }
            let value: u32 = field
                .parse()
                .map_err(|e| format!("Invalid {} '{}' in '{}': {}", name, field, s, e))?;
            if value > max {
                return Err(format!("{} out of range in '{}': {} > {}", name, s, value, max));
            }
            Ok(value)
        };

        let minutes = parse_field(minutes, 99, "minutes")?;
        let seconds = parse_field(seconds, 59, "seconds")?;
        Ok(Self(minutes * 60 + seconds))
    }
}

impl TryFrom<String> for RemainingTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RemainingTime> for String {
    fn from(value: RemainingTime) -> Self {
        value.to_string()
    }
}
