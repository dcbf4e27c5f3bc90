//! Defines data structures for the application.
//!
//! Includes structs for:
//! - Deserializing tweet records from CSV, JSON files, or a JSON HTTP API (`TweetRecord`).
//! - Representing rows stored in the database (`DbTweet`).
//! - The sentiment classification attached during enrichment (`SentimentLabel`).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Sentiment classification derived from the VADER compound score.
///
/// Thresholds follow the standard VADER convention: scores at or above 0.05
/// are positive, at or below -0.05 negative, everything between neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Maps a VADER compound score to its label.
    pub fn from_score(compound: f64) -> Self {
        if compound >= 0.05 {
            SentimentLabel::Positive
        } else if compound <= -0.05 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single tweet record as parsed from an input source.
///
/// Field names match the dataset headers (`TweetID`, `CreateDate`,
/// `Antisemitic`, `text`); snake_case aliases are accepted for JSON sources
/// that have already been normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct TweetRecord {
    #[serde(rename = "TweetID", alias = "tweet_id")]
    pub tweet_id: String,

    /// Raw timestamp string as it appears in the source; parsed lazily since
    /// datasets mix RFC 3339 and space-separated formats.
    #[serde(rename = "CreateDate", alias = "create_date", default)]
    pub create_date: Option<String>,

    /// Dataset flag marking the tweet as antisemitic. Sources encode it as
    /// 0/1, booleans, or strings thereof.
    #[serde(
        rename = "Antisemitic",
        alias = "antisemitic",
        default,
        deserialize_with = "flag_from_any"
    )]
    pub antisemitic: bool,

    #[serde(rename = "text", alias = "Text")]
    pub text: String,
}

impl TweetRecord {
    /// Parses the raw `CreateDate` string into a UTC timestamp, if possible.
    ///
    /// Tries RFC 3339 first, then the space- and `T`-separated naive formats
    /// commonly found in exported datasets. Unparseable values are logged and
    /// dropped rather than failing the whole load.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.create_date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive.and_utc());
            }
        }

        warn!(
            "Could not parse CreateDate '{}' for tweet {}. Storing NULL.",
            raw, self.tweet_id
        );
        None
    }
}

/// Deserializes the `Antisemitic` flag from any of the encodings seen in the
/// wild: JSON booleans, 0/1 integers, or their string forms (CSV fields
/// always arrive as strings).
fn flag_from_any<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a boolean, 0/1 integer, or string flag")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<bool, E> {
            Ok(v != 0.0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<bool, E> {
            match v.trim() {
                "" | "0" => Ok(false),
                "1" => Ok(true),
                other => match other.to_ascii_lowercase().as_str() {
                    "true" | "yes" => Ok(true),
                    "false" | "no" => Ok(false),
                    _ => Err(E::custom(format!("invalid flag value: {v}"))),
                },
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

/// A tweet row as stored in (and read back from) the database.
///
/// Enrichment columns are `None` until the corresponding pass has run.
/// Derives `sqlx::FromRow` for direct mapping from query results and
/// `Serialize` for the HTTP API payloads.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DbTweet {
    pub id: i32,
    pub tweet_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub text: String,
    pub antisemitic: bool,
    /// VADER compound score in [-1, 1].
    pub sentiment_score: Option<f64>,
    /// "positive", "negative", or "neutral".
    pub sentiment_label: Option<String>,
    /// Canonical weapon terms found in the text, deduplicated.
    pub weapons_found: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_from_json(json: &str) -> TweetRecord {
        serde_json::from_str(json).expect("record should deserialize")
    }

    #[test]
    fn flag_accepts_integers_booleans_and_strings() {
        for (raw, expected) in [
            (r#"{"TweetID":"1","text":"a","Antisemitic":1}"#, true),
            (r#"{"TweetID":"2","text":"a","Antisemitic":0}"#, false),
            (r#"{"TweetID":"3","text":"a","Antisemitic":true}"#, true),
            (r#"{"TweetID":"4","text":"a","Antisemitic":"1"}"#, true),
            (r#"{"TweetID":"5","text":"a","Antisemitic":"false"}"#, false),
        ] {
            assert_eq!(record_from_json(raw).antisemitic, expected, "raw: {raw}");
        }
    }

    #[test]
    fn flag_defaults_to_false_when_missing() {
        let record = record_from_json(r#"{"TweetID":"6","text":"a"}"#);
        assert!(!record.antisemitic);
    }

    #[test]
    fn created_at_parses_common_formats() {
        let mut record = record_from_json(r#"{"TweetID":"7","text":"a"}"#);

        record.create_date = Some("2020-06-15T12:30:00+00:00".to_string());
        assert!(record.created_at().is_some());

        record.create_date = Some("2020-06-15 12:30:00".to_string());
        assert!(record.created_at().is_some());

        record.create_date = Some("not a date".to_string());
        assert!(record.created_at().is_none());

        record.create_date = None;
        assert!(record.created_at().is_none());
    }

    #[test]
    fn label_thresholds() {
        assert_eq!(SentimentLabel::from_score(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(-0.05), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.049), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.049), SentimentLabel::Neutral);
    }
}
