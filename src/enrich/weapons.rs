//! Weapon term matching against tweet text.
//!
//! Terms come from a newline-delimited file, one weapon per line. Matching is
//! case-insensitive and anchored on word boundaries, so "gun" matches
//! "Gun" and "gun." but never "gunner". Multi-word terms ("assault rifle")
//! are matched as phrases.

use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Compiled matcher over a canonical weapon term list.
pub struct WeaponMatcher {
    patterns: Vec<(String, Regex)>,
}

impl WeaponMatcher {
    /// Loads a term file. A missing or unreadable file degrades to an empty
    /// matcher with a warning, so enrichment can still run the other passes.
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => {
                let matcher = Self::from_terms(raw.lines());
                debug!(
                    "Loaded {} weapon terms from {}",
                    matcher.len(),
                    path.display()
                );
                matcher
            }
            Err(e) => {
                warn!(
                    "Weapons file not found at {}: {}. No weapons loaded.",
                    path.display(),
                    e
                );
                Self {
                    patterns: Vec::new(),
                }
            }
        }
    }

    /// Builds a matcher from raw terms: trimmed, lowercased, deduplicated,
    /// empty lines dropped.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut patterns = Vec::new();

        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || !seen.insert(term.clone()) {
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", regex::escape(&term));
            match Regex::new(&pattern) {
                Ok(re) => patterns.push((term, re)),
                Err(e) => warn!("Skipping unmatchable weapon term '{}': {}", term, e),
            }
        }

        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the canonical terms found in `text`, in term-list order.
    pub fn find(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(term, _)| term.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> WeaponMatcher {
        WeaponMatcher::from_terms(["gun", "Knife", "assault rifle", "ak-47", "", "gun"])
    }

    #[test]
    fn terms_are_normalized_and_deduplicated() {
        assert_eq!(matcher().len(), 4);
    }

    #[test]
    fn matches_are_case_insensitive() {
        let found = matcher().find("He pulled a GUN and a knife.");
        assert_eq!(found, vec!["gun".to_string(), "knife".to_string()]);
    }

    #[test]
    fn word_boundaries_are_respected() {
        let m = matcher();
        assert!(m.find("the gunner reloaded").is_empty());
        assert_eq!(m.find("the gun. reloaded"), vec!["gun".to_string()]);
    }

    #[test]
    fn multiword_and_hyphenated_terms_match_as_phrases() {
        let m = matcher();
        assert_eq!(
            m.find("seen with an Assault Rifle yesterday"),
            vec!["assault rifle".to_string()]
        );
        assert_eq!(m.find("an AK-47 was recovered"), vec!["ak-47".to_string()]);
        assert!(m.find("assault happened near the rifle range").is_empty());
    }

    #[test]
    fn missing_file_degrades_to_empty_matcher() {
        let m = WeaponMatcher::from_file(Path::new("/nonexistent/weapons.txt"));
        assert!(m.is_empty());
        assert!(m.find("a gun").is_empty());
    }
}
