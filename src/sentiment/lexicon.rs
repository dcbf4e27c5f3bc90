//! Parsing of VADER lexicon files.
//!
//! The file format is the one shipped by NLTK as `vader_lexicon.txt`: one
//! entry per line, tab-separated, with the token first and its mean valence
//! second. Trailing columns (standard deviation, raw ratings) are ignored,
//! so both the full NLTK file and trimmed two-column files load unchanged.

use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Loads a lexicon file from disk and parses it into a token → valence map.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be read and `AppError::Lexicon`
/// if it contains malformed entries or no entries at all.
pub fn load_lexicon(path: &Path) -> Result<HashMap<String, f64>> {
    let raw = fs::read_to_string(path)?;
    let lexicon = parse_lexicon(&raw)?;
    info!(
        "Loaded sentiment lexicon from {} ({} entries)",
        path.display(),
        lexicon.len()
    );
    Ok(lexicon)
}

/// Parses lexicon file contents. Blank lines and `#` comments are skipped;
/// tokens are lowercased on insertion since lookups are case-folded.
pub fn parse_lexicon(raw: &str) -> Result<HashMap<String, f64>> {
    let mut lexicon = HashMap::new();

    for (lineno, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split('\t');
        let token = fields.next().unwrap_or_default();
        let valence = fields
            .next()
            .ok_or_else(|| {
                AppError::Lexicon(format!("line {}: missing valence column", lineno + 1))
            })?
            .trim()
            .parse::<f64>()
            .map_err(|e| {
                AppError::Lexicon(format!("line {}: invalid valence: {}", lineno + 1, e))
            })?;

        lexicon.insert(token.to_lowercase(), valence);
    }

    if lexicon.is_empty() {
        return Err(AppError::Lexicon("lexicon contains no entries".to_string()));
    }

    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_nltk_rows_and_short_rows() {
        let raw = "# comment line\n\
                   good\t1.9\t0.9434\t[2, 1, 2, 2, 3, 2, 2, 2, 1, 2]\n\
                   bad\t-2.5\n\
                   \n\
                   LOVE\t3.2\t0.4\t[3, 3]\n";
        let lexicon = parse_lexicon(raw).unwrap();
        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon["good"], 1.9);
        assert_eq!(lexicon["bad"], -2.5);
        // Tokens are case-folded on insertion.
        assert_eq!(lexicon["love"], 3.2);
    }

    #[test]
    fn rejects_missing_or_invalid_valence() {
        assert!(matches!(
            parse_lexicon("good"),
            Err(AppError::Lexicon(_))
        ));
        assert!(matches!(
            parse_lexicon("good\tnot-a-number"),
            Err(AppError::Lexicon(_))
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            parse_lexicon("# only comments\n\n"),
            Err(AppError::Lexicon(_))
        ));
    }
}
