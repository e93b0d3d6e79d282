use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Interval, ValidationError};

/// Look-back window requested from the chart provider.
///
/// The provider only serves some intervals for some ranges; daily bars stop
/// being available somewhere past five years and `max` is monthly only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "4y")]
    FourYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "20y")]
    TwentyYears,
    #[serde(rename = "max")]
    Max,
}

impl ChartRange {
    /// Ranges offered by the detailed chart view, in display order.
    pub const SELECTABLE: [Self; 5] = [
        Self::SixMonths,
        Self::OneYear,
        Self::FiveYears,
        Self::TenYears,
        Self::Max,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::FourYears => "4y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::TwentyYears => "20y",
            Self::Max => "max",
        }
    }

    pub const fn valid_intervals(self) -> &'static [Interval] {
        match self {
            Self::SixMonths | Self::OneYear | Self::FiveYears => {
                &[Interval::Daily, Interval::Weekly, Interval::Monthly]
            }
            Self::OneMonth => &[Interval::Daily, Interval::Weekly],
            Self::FourYears | Self::TenYears | Self::TwentyYears => {
                &[Interval::Weekly, Interval::Monthly]
            }
            Self::Max => &[Interval::Monthly],
        }
    }

    pub const fn default_interval(self) -> Interval {
        match self {
            Self::OneMonth | Self::SixMonths | Self::OneYear => Interval::Daily,
            Self::FourYears | Self::FiveYears | Self::TwentyYears => Interval::Weekly,
            Self::TenYears | Self::Max => Interval::Monthly,
        }
    }

    pub fn supports(self, interval: Interval) -> bool {
        self.valid_intervals().contains(&interval)
    }

    pub fn is_selectable(self) -> bool {
        Self::SELECTABLE.contains(&self)
    }
}

impl Display for ChartRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartRange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1mo" => Ok(Self::OneMonth),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "4y" => Ok(Self::FourYears),
            "5y" => Ok(Self::FiveYears),
            "10y" => Ok(Self::TenYears),
            "20y" => Ok(Self::TwentyYears),
            "max" => Ok(Self::Max),
            other => Err(ValidationError::InvalidRange {
                value: other.to_owned(),
            }),
        }
    }
}
