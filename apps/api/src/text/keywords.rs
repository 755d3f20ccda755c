//! Keyword extraction: the set of salient, normalized terms in a text.
//!
//! Two strategies sit behind the `KeywordExtractor` trait:
//! - `LexiconKeywordExtractor`: part-of-speech tagging and lemmatization backed by a
//!   lexicon file, plus named-entity lookup for organizations, products and places.
//! - `StopwordKeywordExtractor`: whitespace split filtered through a closed stopword list.
//!
//! The strategy is picked once at startup by `build_keyword_extractor`; callers only
//! ever see `Arc<dyn KeywordExtractor>`.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::text::stopwords::{is_english_stopword, is_fallback_stopword};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Arc<dyn KeywordExtractor>`.
pub trait KeywordExtractor: Send + Sync {
    fn extract_keywords(&self, text: &str) -> BTreeSet<String>;

    /// "lexicon" | "stopword"; reported in logs only.
    fn strategy(&self) -> &'static str;
}

/// Loads the lexicon strategy when `lexicon_path` is set and readable, otherwise
/// falls back to the stopword strategy with a warning.
pub fn build_keyword_extractor(lexicon_path: Option<&Path>) -> Arc<dyn KeywordExtractor> {
    let Some(path) = lexicon_path else {
        warn!("No keyword lexicon configured. Using fallback keyword extraction.");
        return Arc::new(StopwordKeywordExtractor);
    };

    match Lexicon::load(path) {
        Ok(lexicon) => {
            info!(
                "Keyword lexicon loaded from {} ({} words, {} entities)",
                path.display(),
                lexicon.words.len(),
                lexicon.entities.len()
            );
            Arc::new(LexiconKeywordExtractor::new(lexicon))
        }
        Err(e) => {
            warn!("Keyword lexicon issue ({e}). Using fallback keyword extraction.");
            Arc::new(StopwordKeywordExtractor)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback strategy
// ────────────────────────────────────────────────────────────────────────────

pub struct StopwordKeywordExtractor;

impl KeywordExtractor for StopwordKeywordExtractor {
    fn extract_keywords(&self, text: &str) -> BTreeSet<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter(|w| w.chars().count() > 2 && !is_fallback_stopword(w))
            .map(String::from)
            .collect()
    }

    fn strategy(&self) -> &'static str {
        "stopword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lexicon strategy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("cannot read lexicon: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed lexicon line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("lexicon contains no entries")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Adverb,
    Other,
}

impl PartOfSpeech {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "NOUN" => Self::Noun,
            "PROPN" => Self::ProperNoun,
            "ADJ" => Self::Adjective,
            "VERB" => Self::Verb,
            "ADV" => Self::Adverb,
            _ => Self::Other,
        }
    }

    fn is_content(self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun | Self::Adjective)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Org,
    Product,
    Gpe,
}

#[derive(Debug, Clone)]
struct LexEntry {
    pos: PartOfSpeech,
    lemma: String,
}

/// Tab-separated lexicon. Each non-comment line is `surface<TAB>TAG[<TAB>lemma]`.
/// TAG is a part-of-speech (`NOUN`, `PROPN`, `ADJ`, `VERB`, `ADV`, ...) or an entity
/// label (`ORG`, `PRODUCT`, `GPE`); entity surfaces may span several words.
#[derive(Debug, Default)]
pub struct Lexicon {
    words: HashMap<String, LexEntry>,
    entities: HashMap<String, EntityLabel>,
    max_entity_words: usize,
}

impl Lexicon {
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, LexiconError> {
        let mut lexicon = Lexicon::default();

        for (idx, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let cols: Vec<&str> = line.split('\t').map(str::trim).collect();
            if cols.len() < 2 || cols[0].is_empty() {
                return Err(LexiconError::Malformed {
                    line: idx + 1,
                    reason: "expected at least surface and tag columns".to_string(),
                });
            }
            let surface = cols[0].to_lowercase();
            let label = match cols[1] {
                "ORG" => Some(EntityLabel::Org),
                "PRODUCT" => Some(EntityLabel::Product),
                "GPE" => Some(EntityLabel::Gpe),
                _ => None,
            };

            if let Some(label) = label {
                let words = surface.split_whitespace().count();
                lexicon.max_entity_words = lexicon.max_entity_words.max(words);
                lexicon.entities.insert(surface, label);
            } else {
                let lemma = cols
                    .get(2)
                    .filter(|l| !l.is_empty())
                    .map(|l| l.to_lowercase())
                    .unwrap_or_else(|| surface.clone());
                lexicon.words.insert(
                    surface,
                    LexEntry {
                        pos: PartOfSpeech::from_tag(cols[1]),
                        lemma,
                    },
                );
            }
        }

        if lexicon.words.is_empty() && lexicon.entities.is_empty() {
            return Err(LexiconError::Empty);
        }
        Ok(lexicon)
    }
}

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w[\w+#]*(?:\.\w+)*[+#]*").expect("valid regex"));

pub struct LexiconKeywordExtractor {
    lexicon: Lexicon,
}

impl LexiconKeywordExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    fn tag(&self, token: &str, lower: &str, sentence_start: bool) -> (PartOfSpeech, String) {
        if let Some(entry) = self.lexicon.words.get(lower) {
            return (entry.pos, entry.lemma.clone());
        }
        let pos = guess_pos(token, lower, sentence_start);
        let lemma = if pos == PartOfSpeech::Noun {
            guess_noun_lemma(lower)
        } else {
            lower.to_string()
        };
        (pos, lemma)
    }
}

impl KeywordExtractor for LexiconKeywordExtractor {
    fn extract_keywords(&self, text: &str) -> BTreeSet<String> {
        let mut keywords = BTreeSet::new();
        let mut lowered_tokens = Vec::new();
        let mut sentence_start = true;
        let mut last_end = 0;

        for m in TOKEN.find_iter(text) {
            if text[last_end..m.start()].contains(['.', '!', '?', '\n']) {
                sentence_start = true;
            }
            last_end = m.end();

            let token = m.as_str();
            let lower = token.to_lowercase();
            lowered_tokens.push(lower.clone());

            let (pos, lemma) = self.tag(token, &lower, sentence_start);
            sentence_start = false;

            if pos.is_content() && !is_english_stopword(&lower) && lower.chars().count() > 2 {
                keywords.insert(lemma);
            }
        }

        // Named entities, longest window first at each position.
        let max_n = self.lexicon.max_entity_words;
        let mut i = 0;
        while i < lowered_tokens.len() {
            let mut matched = 1;
            for n in (1..=max_n.min(lowered_tokens.len() - i)).rev() {
                let candidate = lowered_tokens[i..i + n].join(" ");
                if self.lexicon.entities.contains_key(&candidate) {
                    keywords.insert(candidate);
                    matched = n;
                    break;
                }
            }
            i += matched;
        }

        keywords
    }

    fn strategy(&self) -> &'static str {
        "lexicon"
    }
}

fn guess_pos(token: &str, lower: &str, sentence_start: bool) -> PartOfSpeech {
    if lower.chars().all(|c| c.is_ascii_digit()) {
        return PartOfSpeech::Other;
    }
    if !sentence_start && token.chars().next().is_some_and(char::is_uppercase) {
        return PartOfSpeech::ProperNoun;
    }
    const ADJ_SUFFIXES: &[&str] = &["ous", "ive", "able", "ible", "ful", "less", "ical", "ic"];
    if ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s) && lower.len() > s.len() + 2) {
        return PartOfSpeech::Adjective;
    }
    if lower.ends_with("ly") && lower.len() > 4 {
        return PartOfSpeech::Adverb;
    }
    if lower.ends_with("ed") && lower.len() > 4 {
        return PartOfSpeech::Verb;
    }
    PartOfSpeech::Noun
}

fn guess_noun_lemma(lower: &str) -> String {
    if let Some(stem) = lower.strip_suffix("ies").filter(|s| s.len() > 2) {
        return format!("{stem}y");
    }
    if lower.ends_with("sses") {
        return lower[..lower.len() - 2].to_string();
    }
    if lower.len() > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return lower[..lower.len() - 1].to_string();
    }
    lower.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LEXICON: &str = "# test lexicon\n\
        managers\tNOUN\tmanager\n\
        agile\tADJ\n\
        led\tVERB\tlead\n\
        google\tORG\n\
        google cloud\tPRODUCT\n\
        bangalore\tGPE\n";

    fn lexicon_extractor() -> LexiconKeywordExtractor {
        LexiconKeywordExtractor::new(Lexicon::parse(LEXICON).unwrap())
    }

    #[test]
    fn test_fallback_filters_short_words_and_stopwords() {
        let kw = StopwordKeywordExtractor.extract_keywords("The Rust and Go engineer with SQL");
        assert!(kw.contains("rust"));
        assert!(kw.contains("engineer"));
        assert!(kw.contains("sql"));
        assert!(!kw.contains("the"));
        assert!(!kw.contains("and"));
        assert!(!kw.contains("go"));
    }

    #[test]
    fn test_fallback_empty_text() {
        assert!(StopwordKeywordExtractor.extract_keywords("").is_empty());
    }

    #[test]
    fn test_lexicon_lemmatizes_known_words() {
        let kw = lexicon_extractor().extract_keywords("We hire managers for agile teams");
        assert!(kw.contains("manager"));
        assert!(kw.contains("agile"));
        assert!(kw.contains("team"));
        assert!(!kw.contains("managers"));
    }

    #[test]
    fn test_lexicon_drops_verbs_and_stopwords() {
        let kw = lexicon_extractor().extract_keywords("She led the project");
        assert!(!kw.contains("lead"));
        assert!(!kw.contains("led"));
        assert!(!kw.contains("the"));
        assert!(kw.contains("project"));
    }

    #[test]
    fn test_lexicon_extracts_multiword_entities() {
        let kw = lexicon_extractor().extract_keywords("Deployed on Google Cloud in Bangalore.");
        assert!(kw.contains("google cloud"));
        assert!(kw.contains("bangalore"));
    }

    #[test]
    fn test_lexicon_keeps_symbol_skills() {
        let kw = lexicon_extractor().extract_keywords("Experience with C++ and Node.js required");
        assert!(kw.contains("node.js"));
        assert!(kw.contains("experience"));
    }

    #[test]
    fn test_parse_rejects_malformed_line() {
        let err = Lexicon::parse("onlyonecolumn\n").unwrap_err();
        assert!(matches!(err, LexiconError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_empty_lexicon() {
        assert!(matches!(Lexicon::parse("# nothing\n\n"), Err(LexiconError::Empty)));
    }

    #[test]
    fn test_build_falls_back_without_path() {
        assert_eq!(build_keyword_extractor(None).strategy(), "stopword");
    }

    #[test]
    fn test_build_falls_back_on_missing_file() {
        let path = Path::new("/nonexistent/lexicon.tsv");
        assert_eq!(build_keyword_extractor(Some(path)).strategy(), "stopword");
    }

    #[test]
    fn test_build_loads_lexicon_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LEXICON.as_bytes()).unwrap();
        let extractor = build_keyword_extractor(Some(file.path()));
        assert_eq!(extractor.strategy(), "lexicon");
    }

    #[test]
    fn test_noun_lemma_guesses() {
        assert_eq!(guess_noun_lemma("companies"), "company");
        assert_eq!(guess_noun_lemma("classes"), "class");
        assert_eq!(guess_noun_lemma("skills"), "skill");
        assert_eq!(guess_noun_lemma("status"), "status");
        assert_eq!(guess_noun_lemma("analysis"), "analysis");
    }
}
