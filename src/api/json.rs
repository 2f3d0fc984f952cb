//
//  gerrit-rest
//  api/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Conventions of the Gerrit REST API
//!
//! - Every JSON response starts with the anti-XSSI line `)]}'`, which must
//!   be removed before parsing.
//! - Timestamps are UTC strings in the form `2013-02-01 09:59:32.126000000`.
//!   Use [`gerrit_timestamp`] (or [`gerrit_timestamp::option`]) as a serde
//!   `with` module on `chrono::DateTime<Utc>` fields.
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use serde::Deserialize;
//! use gerrit_rest::api::json::{self, gerrit_timestamp};
//!
//! #[derive(Deserialize)]
//! struct Entity {
//!     #[serde(with = "gerrit_timestamp")]
//!     updated: DateTime<Utc>,
//! }
//!
//! let body = ")]}'\n{\"updated\":\"2013-02-01 09:59:32.126000000\"}";
//! let entity: Entity = serde_json::from_str(json::strip_xssi_prefix(body)).unwrap();
//! assert_eq!(entity.updated.timestamp(), 1359712772);
//! ```

/// Magic prefix Gerrit puts in front of JSON responses.
pub const XSSI_PREFIX: &str = ")]}'";

/// Removes the anti-XSSI line, if present.
pub fn strip_xssi_prefix(body: &str) -> &str {
    let trimmed = body.trim_start();
    match trimmed.strip_prefix(XSSI_PREFIX) {
        Some(rest) => rest.trim_start_matches(|c: char| c == '\r' || c == '\n'),
        None => body,
    }
}

/// Serde adapter for Gerrit timestamps.
pub mod gerrit_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";

    /// Parses a Gerrit timestamp string.
    pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(value, FORMAT).map(|naive| naive.and_utc())
    }

    /// Formats a timestamp the way Gerrit does.
    pub fn format(value: &DateTime<Utc>) -> String {
        value.format(WRITE_FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(de::Error::custom)
    }

    /// The same adapter for `Option<DateTime<Utc>>` fields.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_some(&super::format(value)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|value| super::parse(&value).map_err(de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_strip_xssi_prefix() {
        assert_eq!(strip_xssi_prefix(")]}'\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi_prefix(")]}'\r\n[]"), "[]");
        assert_eq!(strip_xssi_prefix("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi_prefix(")]}'"), "");
    }

    #[test]
    fn test_timestamp_parse_and_format() {
        let parsed = gerrit_timestamp::parse("2013-02-01 09:59:32.126000000").unwrap();
        let expected = Utc.with_ymd_and_hms(2013, 2, 1, 9, 59, 32).unwrap()
            + chrono::Duration::milliseconds(126);
        assert_eq!(parsed, expected);
        assert_eq!(gerrit_timestamp::format(&parsed), "2013-02-01 09:59:32.126000000");

        // Older servers omit the fraction.
        assert!(gerrit_timestamp::parse("2013-02-01 09:59:32").is_ok());
        assert!(gerrit_timestamp::parse("2013-02-01T09:59:32Z").is_err());
    }

    #[test]
    fn test_optional_timestamp_field() {
        #[derive(serde::Deserialize)]
        struct Entity {
            #[serde(default, with = "gerrit_timestamp::option")]
            submitted: Option<chrono::DateTime<Utc>>,
        }

        let entity: Entity = serde_json::from_str("{}").unwrap();
        assert!(entity.submitted.is_none());

        let entity: Entity =
            serde_json::from_str("{\"submitted\":\"2020-01-01 00:00:00.000000000\"}").unwrap();
        assert!(entity.submitted.is_some());
    }
}
