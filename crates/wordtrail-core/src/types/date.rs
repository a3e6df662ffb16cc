// Copyright 2025 The wordtrail authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Days;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// A calendar date with no time component. Streak continuity is decided
/// entirely in terms of this type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(naive_date: NaiveDate) -> Self {
        Self(naive_date)
    }

    #[cfg(feature = "clock")]
    pub fn today() -> Self {
        Self(chrono::Local::now().naive_local().date())
    }

    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// The previous calendar day.
    pub fn pred(self) -> Self {
        Self(self.0 - Days::new(1))
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl TryFrom<String> for Date {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map_err(|_| ErrorReport::new(format!("invalid date: {}", value)))?;
        Ok(Date(date))
    }
}

impl From<Date> for String {
    fn from(date: Date) -> String {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        let serialized = serde_json::to_string(&ymd(2024, 1, 2))?;
        assert_eq!(serialized, "\"2024-01-02\"");
        Ok(())
    }

    #[test]
    fn test_deserialize() -> Fallible<()> {
        let date: Date = serde_json::from_str("\"2024-01-02\"")?;
        assert_eq!(date, ymd(2024, 1, 2));
        Ok(())
    }

    #[test]
    fn test_deserialize_garbage() {
        assert!(serde_json::from_str::<Date>("\"yesterday\"").is_err());
    }

    #[test]
    fn test_pred() {
        assert_eq!(ymd(2024, 1, 2).pred(), ymd(2024, 1, 1));
        // Across a month boundary.
        assert_eq!(ymd(2024, 3, 1).pred(), ymd(2024, 2, 29));
    }
}
