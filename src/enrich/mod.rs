//! Document enrichment: weapons detection, sentiment scoring, and cleanup.
//!
//! The pipeline runs three passes over the stored tweets, in order:
//! 1. weapons: match the term list against each text and record hits,
//! 2. sentiment: VADER compound score plus positive/negative/neutral label,
//! 3. cleanup: drop rows whose dataset flag is unset.
//!
//! Each pass walks the whole table in keyset-paginated batches, so tables
//! larger than the batch size are still fully enriched. Matching and
//! scoring are pure CPU work and run on the Rayon pool; only the batched
//! reads/writes touch the database.

mod weapons;

pub use weapons::WeaponMatcher;

use crate::db::Database;
use crate::error::Result;
use crate::models::SentimentLabel;
use crate::sentiment::SentimentIntensityAnalyzer;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

/// Default number of documents pulled per enrichment pass.
pub const DEFAULT_BATCH_SIZE: i64 = 7000;

/// Counters reported after a full enrichment run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichmentReport {
    /// Documents that received a `weapons_found` array.
    pub weapons_updated: u64,
    /// Documents that received a sentiment score and label.
    pub sentiment_updated: u64,
    /// Non-flagged documents removed in the cleanup pass.
    pub removed: u64,
}

/// Runs the enrichment passes against a database.
pub struct Enricher {
    db: Database,
    analyzer: SentimentIntensityAnalyzer,
    weapons: WeaponMatcher,
    batch_size: i64,
}

impl Enricher {
    pub fn new(
        db: Database,
        analyzer: SentimentIntensityAnalyzer,
        weapons: WeaponMatcher,
        batch_size: i64,
    ) -> Self {
        Self {
            db,
            analyzer,
            weapons,
            batch_size: batch_size.max(1),
        }
    }

    /// Runs all passes in order and returns the combined counters.
    pub async fn run(&self) -> Result<EnrichmentReport> {
        let weapons_updated = self.add_weapons_to_docs().await?;
        let sentiment_updated = self.add_sentiment_to_docs().await?;

        info!("Removing documents not flagged by the dataset...");
        let removed = self.db.delete_non_antisemitic().await?;
        info!("Removed {} non-flagged documents", removed);

        Ok(EnrichmentReport {
            weapons_updated,
            sentiment_updated,
            removed,
        })
    }

    /// Weapons pass: scan stored texts for weapon terms and record hits.
    ///
    /// Pages through the table by id until exhausted, so the update count
    /// covers every row and not just the first batch.
    pub async fn add_weapons_to_docs(&self) -> Result<u64> {
        if self.weapons.is_empty() {
            info!("No weapons loaded. Skipping weapons enrichment.");
            return Ok(0);
        }

        info!("Starting weapons enrichment...");
        let mut updated = 0u64;
        let mut last_id = 0;
        loop {
            let docs = self.db.fetch_texts_after(last_id, self.batch_size).await?;
            let Some((max_id, _)) = docs.last() else {
                break;
            };
            last_id = *max_id;

            let progress = new_progress_bar(docs.len() as u64, "matching weapons")?;
            let updates: Vec<(i32, Vec<String>)> = docs
                .par_iter()
                .map(|(id, text)| {
                    let found = self.weapons.find(text);
                    progress.inc(1);
                    (*id, found)
                })
                .filter(|(_, found)| !found.is_empty())
                .collect();
            progress.finish_and_clear();

            self.db.update_weapons(&updates).await?;
            updated += updates.len() as u64;

            if (docs.len() as i64) < self.batch_size {
                break;
            }
        }

        info!("Found {} documents with weapons to update.", updated);
        Ok(updated)
    }

    /// Sentiment pass: score every stored text and attach score + label.
    ///
    /// Pages through the table by id until exhausted, like the weapons pass.
    pub async fn add_sentiment_to_docs(&self) -> Result<u64> {
        info!("Starting sentiment enrichment...");
        let mut updated = 0u64;
        let mut last_id = 0;
        loop {
            let docs = self.db.fetch_texts_after(last_id, self.batch_size).await?;
            let Some((max_id, _)) = docs.last() else {
                break;
            };
            last_id = *max_id;

            let progress = new_progress_bar(docs.len() as u64, "scoring sentiment")?;
            let updates: Vec<(i32, f64, SentimentLabel)> = docs
                .par_iter()
                .map(|(id, text)| {
                    let compound = self.analyzer.compound(text);
                    progress.inc(1);
                    (*id, compound, SentimentLabel::from_score(compound))
                })
                .collect();
            progress.finish_and_clear();

            self.db.update_sentiments(&updates).await?;
            updated += updates.len() as u64;

            if (docs.len() as i64) < self.batch_size {
                break;
            }
        }

        info!("Prepared {} documents for sentiment update.", updated);
        Ok(updated)
    }
}

fn new_progress_bar(len: u64, msg: &'static str) -> Result<ProgressBar> {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("#>-"),
    );
    bar.set_message(msg);
    Ok(bar)
}
