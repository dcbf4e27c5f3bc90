//! Provides a generator for plausible sample tweet records.
//!
//! Used as a fallback when a configured dataset source fails to load, and in
//! tests where consistent, controllable data is needed without a real dump.

use crate::models::TweetRecord;
use chrono::{Duration, Utc};
use rand::{thread_rng, Rng};
use tracing::debug;

const CALM_PHRASES: &[&str] = &[
    "what a great day at the park",
    "just finished a really good book",
    "the weather is lovely today",
    "happy to see everyone at the meetup",
    "trying out a new recipe tonight",
];

const HOSTILE_PHRASES: &[&str] = &[
    "i hate everything about this place",
    "this is horrible and it makes me so angry",
    "you will all regret this",
    "they should be scared of what comes next",
];

const WEAPON_MENTIONS: &[&str] = &["a gun", "a knife", "an ak-47", "an assault rifle", "a grenade"];

/// Generates sample tweet records with the same shape as a real dataset.
pub struct SampleDataProvider;

impl SampleDataProvider {
    pub fn new() -> Self {
        debug!("Creating SampleDataProvider");
        Self
    }

    /// Generates `count` records. Roughly 40% are flagged; flagged records
    /// lean hostile and mention weapons more often, so every enrichment pass
    /// and query has matching rows to work with.
    pub fn generate(&self, count: usize) -> Vec<TweetRecord> {
        let mut rng = thread_rng();
        let run_id: u32 = rng.gen();
        let now = Utc::now();

        (0..count)
            .map(|i| {
                let flagged = rng.gen_bool(0.4);
                let base = if flagged {
                    HOSTILE_PHRASES[rng.gen_range(0..HOSTILE_PHRASES.len())]
                } else {
                    CALM_PHRASES[rng.gen_range(0..CALM_PHRASES.len())]
                };

                let armed_probability = if flagged { 0.6 } else { 0.1 };
                let text = if rng.gen_bool(armed_probability) {
                    format!(
                        "{} and i am bringing {}",
                        base,
                        WEAPON_MENTIONS[rng.gen_range(0..WEAPON_MENTIONS.len())]
                    )
                } else {
                    base.to_string()
                };

                let created = now - Duration::minutes(rng.gen_range(0..60 * 24 * 7));
                TweetRecord {
                    tweet_id: format!("sample-{run_id}-{i}"),
                    create_date: Some(created.format("%Y-%m-%d %H:%M:%S").to_string()),
                    antisemitic: flagged,
                    text,
                }
            })
            .collect()
    }
}

impl Default for SampleDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generates_requested_count_with_unique_ids() {
        let records = SampleDataProvider::new().generate(100);
        assert_eq!(records.len(), 100);

        let ids: HashSet<_> = records.iter().map(|r| r.tweet_id.clone()).collect();
        assert_eq!(ids.len(), 100);
        assert!(records.iter().all(|r| !r.text.is_empty()));
        assert!(records.iter().all(|r| r.created_at().is_some()));
    }

    #[test]
    fn flags_a_portion_of_records() {
        let records = SampleDataProvider::new().generate(100);
        let flagged = records.iter().filter(|r| r.antisemitic).count();
        assert!(flagged > 0 && flagged < 100, "flagged: {flagged}");
    }
}
