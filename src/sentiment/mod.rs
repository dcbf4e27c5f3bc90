//! Native VADER sentiment scoring.
//!
//! The lexicon is read once from a local file at startup; scoring itself
//! never performs I/O, so it can run in parallel over large batches.

mod lexicon;
mod vader;

pub use lexicon::{load_lexicon, parse_lexicon};
pub use vader::{SentimentIntensityAnalyzer, SentimentScores};
