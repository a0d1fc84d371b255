use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer as Snowball};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
}

/// Maps a lowercase word to the lemma it is indexed under.
///
/// The index builder and the query lexer must share one lemmatizer, otherwise
/// query operands never meet the keys the corpus was indexed under. Any
/// `Fn(&str) -> String` closure works as a lemmatizer.
pub trait Lemmatizer {
    fn lemma(&self, word: &str) -> String;
}

impl<F> Lemmatizer for F
where
    F: Fn(&str) -> String,
{
    fn lemma(&self, word: &str) -> String { self(word) }
}

/// Keeps the word as is (lowercased). For indexes whose lemmas came from an
/// external pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lowercase;

impl Lemmatizer for Lowercase {
    fn lemma(&self, word: &str) -> String { word.to_lowercase() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Russian,
    English,
}

/// NFKC + lowercase + Snowball stemming.
pub struct Stemmer {
    inner: Snowball,
}

impl Stemmer {
    pub fn new(language: Language) -> Self {
        let algorithm = match language {
            Language::Russian => Algorithm::Russian,
            Language::English => Algorithm::English,
        };
        Self { inner: Snowball::create(algorithm) }
    }
}

impl Lemmatizer for Stemmer {
    fn lemma(&self, word: &str) -> String {
        let normalized = word.nfkc().collect::<String>().to_lowercase();
        self.inner.stem(&normalized).into_owned()
    }
}

/// Name of a normalizer, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizerKind {
    Lowercase,
    Russian,
    English,
}

impl NormalizerKind {
    pub fn build(self) -> Normalizer {
        match self {
            NormalizerKind::Lowercase => Normalizer::Lowercase(Lowercase),
            NormalizerKind::Russian => Normalizer::Stem(Stemmer::new(Language::Russian)),
            NormalizerKind::English => Normalizer::Stem(Stemmer::new(Language::English)),
        }
    }
}

impl FromStr for NormalizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lowercase" => Ok(NormalizerKind::Lowercase),
            "russian" => Ok(NormalizerKind::Russian),
            "english" => Ok(NormalizerKind::English),
            other => Err(format!("unknown normalizer '{other}', expected lowercase, russian or english")),
        }
    }
}

impl fmt::Display for NormalizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NormalizerKind::Lowercase => "lowercase",
            NormalizerKind::Russian => "russian",
            NormalizerKind::English => "english",
        })
    }
}

/// Runtime choice of lemmatizer.
pub enum Normalizer {
    Lowercase(Lowercase),
    Stem(Stemmer),
}

impl Lemmatizer for Normalizer {
    fn lemma(&self, word: &str) -> String {
        match self {
            Normalizer::Lowercase(l) => l.lemma(word),
            Normalizer::Stem(s) => s.lemma(word),
        }
    }
}

/// Extracts words from free text and maps each through `lemmatizer`, in order.
pub fn lemmas<L: Lemmatizer + ?Sized>(text: &str, lemmatizer: &L) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    WORD_RE
        .find_iter(&normalized)
        .map(|m| lemmatizer.lemma(m.as_str()))
        .collect()
}
