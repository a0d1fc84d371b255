//! Boolean retrieval over a lemma -> document inverted index.
//!
//! A query string flows through [`lexer`], [`validate`], [`postfix`] and
//! [`eval`]; [`QueryEngine`] wires those stages together around a loaded
//! [`InvertedIndex`].

pub mod eval;
pub mod index;
pub mod lemmatizer;
pub mod lexer;
pub mod persist;
pub mod postfix;
pub mod query;
pub mod validate;

pub use index::{DocId, InvertedIndex};
pub use lemmatizer::{Language, Lemmatizer, Lowercase, Normalizer, NormalizerKind, Stemmer};
pub use lexer::{Lexer, Token};
pub use query::{QueryEngine, QueryError};
