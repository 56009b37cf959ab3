// In crates/sentiment/src/scorer.rs

use crate::Lexicon;
use std::sync::Arc;

/// Scores a piece of text into a compound polarity in [-1, 1].
///
/// Implementations must be deterministic: the same text always gets the same score.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

// Empirically derived constants of the VADER model.
const BOOST_INCREMENT: f64 = 0.293;
const BOOST_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_WEIGHT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const BUT_BEFORE_WEIGHT: f64 = 0.5;
const BUT_AFTER_WEIGHT: f64 = 1.5;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never", "none", "nope",
    "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "without", "wont", "wouldnt", "rarely", "seldom", "despite", "uh-uh",
];

const INCREMENTS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously", "fully",
    "greatly", "highly", "hugely", "incredibly", "intensely", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "uber", "unbelievably", "unusually", "utterly",
    "very", "sharply", "steeply",
];

const DECREMENTS: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
    "partly", "scarcely", "slightly", "somewhat", "sorta",
];

/// A lexicon-and-rules scorer in the style of VADER.
///
/// Word valences come from the lexicon and are adjusted by capitalization emphasis,
/// booster/dampener words, negation, a contrastive "but", and trailing punctuation.
#[derive(Debug, Clone)]
pub struct VaderScorer {
    lexicon: Arc<Lexicon>,
}

impl VaderScorer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    fn word_valence(&self, tokens: &[Token], i: usize, caps_differ: bool) -> f64 {
        let token = &tokens[i];
        let Some(mut valence) = self.lexicon.valence(&token.lower) else {
            return 0.0;
        };

        if token.is_upper && caps_differ {
            valence += CAPS_INCREMENT.copysign(valence);
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let preceding = &tokens[i - distance];
            // Sentiment-bearing words are scored on their own, not as boosters.
            if !self.lexicon.contains(&preceding.lower) {
                let mut scalar = booster_scalar(preceding, valence, caps_differ);
                match distance {
                    2 => scalar *= 0.95,
                    3 => scalar *= 0.9,
                    _ => {}
                }
                valence += scalar;
                if is_negation(&preceding.lower) {
                    valence *= NEGATION_SCALAR;
                }
            }
        }

        // "least X" dampens and flips X, except in "at least" / "very least".
        if i >= 1 && tokens[i - 1].lower == "least" && !self.lexicon.contains("least") {
            let before = i.checked_sub(2).map(|j| tokens[j].lower.as_str());
            if !matches!(before, Some("at") | Some("very")) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let upper_count = tokens.iter().filter(|t| t.is_upper).count();
        let caps_differ = upper_count > 0 && upper_count < tokens.len();

        let mut valences: Vec<f64> = (0..tokens.len())
            .map(|i| {
                if is_booster(&tokens[i].lower) {
                    0.0
                } else {
                    self.word_valence(&tokens, i, caps_differ)
                }
            })
            .collect();

        if let Some(but) = tokens.iter().position(|t| t.lower == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < but {
                    *v *= BUT_BEFORE_WEIGHT;
                } else if i > but {
                    *v *= BUT_AFTER_WEIGHT;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }

        let emphasis = punctuation_emphasis(text);
        sum += emphasis.copysign(sum);

        normalize(sum)
    }
}

#[derive(Debug)]
struct Token {
    lower: String,
    is_upper: bool,
}

/// Splits on whitespace and strips surrounding punctuation. Stripping is skipped when
/// it would leave two characters or fewer, so emoticons survive; one-character tokens
/// are dropped.
fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let stripped = raw.trim_matches(|c: char| c.is_ascii_punctuation());
            let word = if stripped.chars().count() <= 2 { raw } else { stripped };
            if word.chars().count() <= 1 {
                return None;
            }
            let has_letters = word.chars().any(char::is_alphabetic);
            Some(Token {
                lower: word.to_lowercase(),
                is_upper: has_letters && !word.chars().any(char::is_lowercase),
            })
        })
        .collect()
}

fn is_booster(word: &str) -> bool {
    INCREMENTS.contains(&word) || DECREMENTS.contains(&word)
}

fn booster_scalar(token: &Token, valence: f64, caps_differ: bool) -> f64 {
    let mut scalar = if INCREMENTS.contains(&token.lower.as_str()) {
        BOOST_INCREMENT
    } else if DECREMENTS.contains(&token.lower.as_str()) {
        BOOST_DECREMENT
    } else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if token.is_upper && caps_differ {
        scalar += CAPS_INCREMENT.copysign(valence);
    }
    scalar
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64 * EXCLAMATION_WEIGHT;
    let questions = match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + questions
}

/// Maps an unbounded sum into [-1, 1], rounded to 4 places.
fn normalize(sum: f64) -> f64 {
    let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    (score.clamp(-1.0, 1.0) * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> VaderScorer {
        VaderScorer::new(Arc::new(Lexicon::from_entries([
            ("good", 1.9),
            ("great", 3.1),
            ("surge", 1.8),
            ("gains", 1.4),
            ("loss", -1.3),
            ("bad", -2.5),
            ("crash", -2.9),
            (":)", 2.0),
        ])))
    }

    #[test]
    fn empty_and_neutral_titles_score_zero() {
        let s = scorer();
        assert_eq!(s.score(""), 0.0);
        assert_eq!(s.score("   "), 0.0);
        assert_eq!(s.score("Nifty closes the session at 22,000"), 0.0);
    }

    #[test]
    fn single_word_matches_normalized_valence() {
        // 1.9 / sqrt(1.9^2 + 15)
        assert_eq!(scorer().score("good"), 0.4404);
        assert_eq!(scorer().score("Results look good."), 0.4404);
    }

    #[test]
    fn polarity_follows_the_words() {
        let s = scorer();
        assert!(s.score("Reliance shares surge on strong gains") > 0.0);
        assert!(s.score("Markets crash after bad loss") < 0.0);
    }

    #[test]
    fn negation_flips_polarity() {
        let s = scorer();
        assert!(s.score("results are not good") < 0.0);
        assert!(s.score("results weren't great") < 0.0);
        assert!(s.score("never a bad quarter") > 0.0);
    }

    #[test]
    fn boosters_and_dampeners_change_magnitude() {
        let s = scorer();
        let plain = s.score("good results");
        assert!(s.score("very good results") > plain);
        assert!(s.score("slightly good results") < plain);
        assert!(s.score("very bad results") < s.score("bad results"));
    }

    #[test]
    fn capitalized_emphasis_counts_only_in_mixed_case() {
        let s = scorer();
        assert!(s.score("results are GOOD") > s.score("results are good"));
        assert_eq!(s.score("GOOD"), s.score("good"));
    }

    #[test]
    fn but_shifts_weight_to_the_second_clause() {
        let s = scorer();
        assert!(s.score("good start but bad finish") < 0.0);
        assert!(s.score("bad start but good finish") > 0.0);
    }

    #[test]
    fn exclamations_amplify_in_the_direction_of_the_sum() {
        let s = scorer();
        assert!(s.score("good!!!") > s.score("good"));
        assert!(s.score("bad!!!") < s.score("bad"));
        assert_eq!(s.score("nothing here!!!"), 0.0);
    }

    #[test]
    fn emoticons_survive_tokenization() {
        assert!(scorer().score("Sensex up :)") > 0.0);
    }

    #[test]
    fn scores_are_bounded_and_repeatable() {
        let s = scorer();
        let title = "GREAT great GREAT surge surge gains!!!! really very good";
        let first = s.score(title);
        assert!((-1.0..=1.0).contains(&first));
        assert_eq!(first, s.score(title));
        let negative = "crash crash crash bad bad loss loss!!!!";
        assert!((-1.0..=1.0).contains(&s.score(negative)));
    }
}
