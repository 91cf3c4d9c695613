use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Calendar trading date with a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    /// Parse `YYYY-MM-DD`, falling back to an RFC3339 timestamp whose UTC
    /// calendar date is taken.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let calendar = format_description!("[year]-[month]-[day]");

        if let Ok(date) = Date::parse(trimmed, calendar) {
            return Ok(Self(date));
        }

        OffsetDateTime::parse(trimmed, &Rfc3339)
            .map(|value| Self(value.to_offset(UtcOffset::UTC).date()))
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    /// Day number used as the continuous axis of time scales.
    pub const fn julian_day(self) -> i32 {
        self.0.to_julian_day()
    }

    pub fn format_iso(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
