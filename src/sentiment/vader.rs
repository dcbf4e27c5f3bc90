//! VADER (Valence Aware Dictionary and sEntiment Reasoner) scoring.
//!
//! Implements the reference heuristics over a lexicon of token valences:
//! ALL-CAPS emphasis, booster/dampener words, negation flipping, "but"
//! clause re-weighting, punctuation emphasis, and the `x / sqrt(x^2 + 15)`
//! compound normalization. Scores match the reference semantics: compound
//! in [-1, 1], with pos/neg/neu ratios summing to ~1.

use crate::error::Result;
use crate::sentiment::lexicon::load_lexicon;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::path::Path;

// Empirically derived constants from the reference implementation.
const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't",
        "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt",
        "havent", "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't",
        "isn't", "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor",
        "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
        "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont",
        "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for word in [
        "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
        "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
        "fabulously", "flipping", "flippin", "fricking", "frickin", "frigging", "friggin",
        "fully", "fucking", "greatly", "hella", "highly", "hugely", "incredibly", "intensely",
        "majorly", "more", "most", "particularly", "purely", "quite", "really", "remarkably",
        "so", "substantially", "thoroughly", "totally", "tremendously", "uber", "unbelievably",
        "unusually", "utterly", "very",
    ] {
        m.insert(word, B_INCR);
    }
    for word in [
        "almost", "barely", "hardly", "kinda", "kindof", "kind-of", "less", "little",
        "marginally", "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta",
        "sortof", "sort-of",
    ] {
        m.insert(word, B_DECR);
    }
    m
});

/// The four sentiment metrics produced for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    /// Normalized weighted composite in [-1, 1]; the value used for labeling.
    pub compound: f64,
}

impl SentimentScores {
    fn zero() -> Self {
        Self {
            neg: 0.0,
            neu: 0.0,
            pos: 0.0,
            compound: 0.0,
        }
    }
}

/// Lexicon-driven sentiment analyzer.
///
/// Construction reads the lexicon once; `polarity_scores` is pure CPU work
/// afterwards, and the analyzer is `Send + Sync` so batches can be scored
/// with Rayon.
pub struct SentimentIntensityAnalyzer {
    lexicon: HashMap<String, f64>,
}

impl SentimentIntensityAnalyzer {
    /// Builds an analyzer from a lexicon file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            lexicon: load_lexicon(path)?,
        })
    }

    /// Builds an analyzer from in-memory entries. Used by tests and tooling.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            lexicon: entries
                .into_iter()
                .map(|(token, valence)| (token.into().to_lowercase(), valence))
                .collect(),
        }
    }

    /// Number of lexicon entries, for startup logging.
    pub fn lexicon_len(&self) -> usize {
        self.lexicon.len()
    }

    /// Convenience accessor for the compound score alone.
    ///
    /// Empty or entirely out-of-lexicon text scores 0.0 (neutral), matching
    /// how invalid input is treated upstream of labeling.
    pub fn compound(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }

    /// Computes the full set of sentiment metrics for `text`.
    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        let tokens = words_and_emoticons(text);
        let is_cap_diff = all_cap_differential(&tokens);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            // Boosters carry no valence of their own; they modify neighbors.
            // The two-word "kind of" behaves like the fused kinda/kindof
            // dampeners, so a leading "kind" is neutralized too.
            let lower = token.to_lowercase();
            let kind_of_bigram = lower == "kind"
                && tokens
                    .get(i + 1)
                    .is_some_and(|next| next.eq_ignore_ascii_case("of"));
            if BOOSTERS.contains_key(lower.as_str()) || kind_of_bigram {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.sentiment_valence(&tokens, i, is_cap_diff));
        }

        let sentiments = but_check(&tokens, sentiments);
        self.score_valence(&sentiments, text)
    }

    /// Valence of the token at `i`, adjusted by its surrounding context.
    fn sentiment_valence(&self, tokens: &[String], i: usize, is_cap_diff: bool) -> f64 {
        let token = &tokens[i];
        let Some(&lex_valence) = self.lexicon.get(&token.to_lowercase()) else {
            return 0.0;
        };
        let mut valence = lex_valence;

        if is_all_caps(token) && is_cap_diff {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        // Look back up to three tokens for boosters and negations, with the
        // booster effect damped by distance.
        for start_i in 0..3 {
            if i <= start_i {
                break;
            }
            let prev = &tokens[i - (start_i + 1)];
            if self.lexicon.contains_key(&prev.to_lowercase()) {
                continue;
            }
            let mut scalar = scalar_inc_dec(prev, valence, is_cap_diff);
            if scalar != 0.0 {
                if start_i == 1 {
                    scalar *= 0.95;
                } else if start_i == 2 {
                    scalar *= 0.9;
                }
            }
            valence += scalar;
            valence = negation_check(valence, tokens, start_i, i);
        }

        self.least_check(valence, tokens, i)
    }

    /// A preceding "least" flips valence, except in "at least" / "very least".
    fn least_check(&self, mut valence: f64, tokens: &[String], i: usize) -> f64 {
        if i == 0 {
            return valence;
        }
        let prev = tokens[i - 1].to_lowercase();
        if self.lexicon.contains_key(&prev) || prev != "least" {
            return valence;
        }
        if i > 1 {
            let prev2 = tokens[i - 2].to_lowercase();
            if prev2 == "at" || prev2 == "very" {
                return valence;
            }
        }
        valence *= N_SCALAR;
        valence
    }

    /// Folds per-token valences into the final metrics, applying punctuation
    /// emphasis and normalization.
    fn score_valence(&self, sentiments: &[f64], text: &str) -> SentimentScores {
        if sentiments.is_empty() {
            return SentimentScores::zero();
        }

        let punct_emphasis = amplify_exclamation(text) + amplify_question(text);

        let mut total_valence: f64 = sentiments.iter().sum();
        if total_valence > 0.0 {
            total_valence += punct_emphasis;
        } else if total_valence < 0.0 {
            total_valence -= punct_emphasis;
        }
        let compound = normalize(total_valence);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0usize;
        for &s in sentiments {
            if s > 0.0 {
                // +1 compensates for the neutral tokens counted as 1 each.
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1;
            }
        }

        if pos_sum > neg_sum.abs() {
            pos_sum += punct_emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= punct_emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count as f64;
        SentimentScores {
            pos: round3((pos_sum / total).abs()),
            neg: round3((neg_sum / total).abs()),
            neu: round3(neu_count as f64 / total),
            compound: round4(compound),
        }
    }
}

/// Splits on whitespace and strips edge punctuation from word-like tokens.
/// Short tokens are kept verbatim so emoticons like `:)` survive; tokens of a
/// single character are discarded.
fn words_and_emoticons(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(strip_punc_if_word)
        .filter(|t| t.chars().count() > 1)
        .collect()
}

fn strip_punc_if_word(token: &str) -> String {
    let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 2 {
        token.to_string()
    } else {
        stripped.to_string()
    }
}

fn is_all_caps(token: &str) -> bool {
    let mut has_alpha = false;
    for c in token.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if !c.is_uppercase() {
                return false;
            }
        }
    }
    has_alpha
}

/// True when the text mixes ALL-CAPS and normal-case tokens; only then does
/// capitalization carry emphasis.
fn all_cap_differential(tokens: &[String]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

/// Booster/dampener contribution of `token` relative to a target valence.
fn scalar_inc_dec(token: &str, valence: f64, is_cap_diff: bool) -> f64 {
    let lower = token.to_lowercase();
    let Some(&base) = BOOSTERS.get(lower.as_str()) else {
        return 0.0;
    };
    let mut scalar = base;
    if valence < 0.0 {
        scalar = -scalar;
    }
    if is_all_caps(token) && is_cap_diff {
        if valence > 0.0 {
            scalar += C_INCR;
        } else {
            scalar -= C_INCR;
        }
    }
    scalar
}

fn is_negation(token: &str) -> bool {
    let lower = token.to_lowercase();
    NEGATIONS.contains(lower.as_str()) || lower.contains("n't")
}

/// Applies negation flips for the context window position `start_i` behind
/// token `i`, including the "never so/this" intensifier and the
/// "without doubt" exception.
fn negation_check(mut valence: f64, tokens: &[String], start_i: usize, i: usize) -> f64 {
    match start_i {
        0 => {
            if is_negation(&tokens[i - 1]) {
                valence *= N_SCALAR;
            }
        }
        1 => {
            let w1 = tokens[i - 2].to_lowercase();
            let w2 = tokens[i - 1].to_lowercase();
            if w1 == "never" && (w2 == "so" || w2 == "this") {
                valence *= 1.25;
            } else if w1 == "without" && w2 == "doubt" {
                // "without doubt X" is affirmation, not negation
            } else if is_negation(&tokens[i - 2]) {
                valence *= N_SCALAR;
            }
        }
        2 => {
            let w1 = tokens[i - 3].to_lowercase();
            let w2 = tokens[i - 2].to_lowercase();
            let w3 = tokens[i - 1].to_lowercase();
            if w1 == "never" && (w2 == "so" || w2 == "this" || w3 == "so" || w3 == "this") {
                valence *= 1.25;
            } else if w1 == "without" && (w2 == "doubt" || w3 == "doubt") {
                // affirmation
            } else if is_negation(&tokens[i - 3]) {
                valence *= N_SCALAR;
            }
        }
        _ => {}
    }
    valence
}

/// Sentiment before a "but" is halved, sentiment after it amplified.
fn but_check(tokens: &[String], mut sentiments: Vec<f64>) -> Vec<f64> {
    if let Some(but_idx) = tokens.iter().position(|t| t.to_lowercase() == "but") {
        for (idx, s) in sentiments.iter_mut().enumerate() {
            if idx < but_idx {
                *s *= 0.5;
            } else if idx > but_idx {
                *s *= 1.5;
            }
        }
    }
    sentiments
}

/// Up to four exclamation marks each add 0.292 emphasis.
fn amplify_exclamation(text: &str) -> f64 {
    let count = text.chars().filter(|&c| c == '!').count().min(4);
    count as f64 * 0.292
}

/// Two or three question marks add 0.18 each; more saturate at 0.96.
fn amplify_question(text: &str) -> f64 {
    let count = text.chars().filter(|&c| c == '?').count();
    match count {
        0 | 1 => 0.0,
        2 | 3 => count as f64 * 0.18,
        _ => 0.96,
    }
}

fn normalize(score: f64) -> f64 {
    let norm = score / (score * score + NORMALIZATION_ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn analyzer() -> SentimentIntensityAnalyzer {
        SentimentIntensityAnalyzer::from_entries([
            ("good", 1.9),
            ("great", 3.1),
            ("happy", 2.7),
            ("love", 3.2),
            ("bad", -2.5),
            ("horrible", -2.5),
            ("hate", -2.7),
            ("kind", 2.4),
        ])
    }

    #[test]
    fn single_known_word_matches_normalization() {
        // 1.9 / sqrt(1.9^2 + 15)
        let compound = analyzer().compound("good");
        assert!((compound - 0.4404).abs() < 1e-3, "compound: {compound}");
    }

    #[rstest]
    #[case("I love this", 1.0)]
    #[case("I hate this", -1.0)]
    #[case("this is horrible and bad", -1.0)]
    fn sign_of_plain_sentences(#[case] text: &str, #[case] expected_sign: f64) {
        let compound = analyzer().compound(text);
        assert_eq!(compound.signum(), expected_sign, "text: {text}");
    }

    #[test]
    fn negation_flips_polarity() {
        let a = analyzer();
        assert!(a.compound("this is good") > 0.05);
        assert!(a.compound("this is not good") < -0.05);
        assert!(a.compound("this isn't good") < -0.05);
    }

    #[test]
    fn boosters_intensify_and_dampeners_soften() {
        let a = analyzer();
        let plain = a.compound("the movie was good");
        assert!(a.compound("the movie was really good") > plain);
        assert!(a.compound("the movie was slightly good") < plain);
    }

    #[test]
    fn caps_and_exclamation_add_emphasis() {
        let a = analyzer();
        let plain = a.compound("the movie is good");
        let emphatic = a.compound("the movie is GOOD!!!");
        assert!(emphatic > plain, "{emphatic} <= {plain}");
    }

    #[test]
    fn but_clause_shifts_weight_to_second_half() {
        let a = analyzer();
        let compound = a.compound("the food is great but the service is horrible");
        assert!(compound < 0.0, "compound: {compound}");
    }

    #[test]
    fn unknown_or_empty_text_is_neutral() {
        let a = analyzer();
        assert_eq!(a.compound(""), 0.0);
        assert_eq!(a.compound("zxqv wvut mnop"), 0.0);

        let scores = a.polarity_scores("");
        assert_eq!(scores.pos, 0.0);
        assert_eq!(scores.neg, 0.0);
        assert_eq!(scores.neu, 0.0);
    }

    #[test]
    fn ratios_sum_to_about_one() {
        let scores = analyzer().polarity_scores("the food was good and the staff was horrible");
        let total = scores.pos + scores.neg + scores.neu;
        assert!((total - 1.0).abs() < 0.01, "total: {total}");
    }

    #[test]
    fn kind_followed_by_of_carries_no_valence() {
        let a = analyzer();
        // "kind" scores from the lexicon on its own, but in the "kind of"
        // bigram it is a modifier and must not contribute valence itself.
        assert!(a.compound("that was kind") > 0.0);
        assert_eq!(a.compound("kind of good"), a.compound("good"));
        assert_eq!(a.compound("Kind of good"), a.compound("good"));
    }

    #[test]
    fn never_so_intensifies_instead_of_negating() {
        let a = analyzer();
        // "never so good" is an intensified positive in the reference rules.
        assert!(a.compound("I was never so happy") > 0.0);
    }
}
