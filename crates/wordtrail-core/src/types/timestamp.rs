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

use chrono::DateTime;
use serde::Deserialize;
use serde::Serialize;

use crate::types::date::Date;

/// An instant with millisecond precision, stored as milliseconds since
/// the Unix epoch. This is the wire format of the persisted record's
/// `lastHeartTime` field, so it serializes as a bare number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the Unix epoch.
    pub fn millis(self) -> i64 {
        self.0
    }

    /// The current instant.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    /// Milliseconds elapsed from `earlier` to `self`. Negative when the
    /// clock has moved backwards.
    pub fn millis_since(self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }

    pub fn plus_millis(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// The UTC calendar date of this instant.
    pub fn date(self) -> Option<Date> {
        DateTime::from_timestamp_millis(self.0).map(|dt| Date::new(dt.date_naive()))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match DateTime::from_timestamp_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        let ts = Timestamp::from_millis(1700000000000);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000000");
    }

    #[test]
    fn test_deserializes_from_number() {
        let ts: Timestamp = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(ts, Timestamp::from_millis(1700000000000));
    }

    #[test]
    fn test_millis_since() {
        let a = Timestamp::from_millis(1000);
        let b = Timestamp::from_millis(4500);
        assert_eq!(b.millis_since(a), 3500);
        assert_eq!(a.millis_since(b), -3500);
    }

    #[test]
    fn test_plus_millis() {
        let ts = Timestamp::from_millis(1000);
        assert_eq!(ts.plus_millis(250), Timestamp::from_millis(1250));
    }

    #[test]
    fn test_display() {
        let ts = Timestamp::from_millis(1700000000000);
        assert_eq!(ts.to_string(), "2023-11-14T22:13:20.000Z");
    }
}
