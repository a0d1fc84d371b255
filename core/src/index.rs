use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type DocId = u32;

/// Lemma -> ids of the documents containing it.
///
/// Posting lists are kept exactly as loaded: unordered and possibly holding
/// duplicates. Nothing reorders them in place; readers take sorted copies.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<DocId>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Records that `lemma` occurs in `doc_id`.
    pub fn add(&mut self, lemma: &str, doc_id: DocId) {
        self.postings.entry(lemma.to_string()).or_default().push(doc_id);
    }

    /// The stored posting list, untouched.
    pub fn postings(&self, lemma: &str) -> Option<&[DocId]> {
        self.postings.get(lemma).map(Vec::as_slice)
    }

    /// Ascending, deduplicated copy of the posting list for `lemma`.
    /// Unknown lemmas yield an empty list.
    pub fn sorted_postings(&self, lemma: &str) -> Vec<DocId> {
        let mut ids = self.postings(lemma).map(<[DocId]>::to_vec).unwrap_or_default();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Every document id that appears in any posting list, ascending.
    pub fn universe(&self) -> Vec<DocId> {
        let mut ids: Vec<DocId> = self.postings.values().flatten().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn num_lemmas(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.postings.iter().map(|(lemma, ids)| (lemma.as_str(), ids.as_slice()))
    }
}

impl From<HashMap<String, Vec<DocId>>> for InvertedIndex {
    fn from(postings: HashMap<String, Vec<DocId>>) -> Self { Self { postings } }
}

impl<'a> FromIterator<(&'a str, Vec<DocId>)> for InvertedIndex {
    fn from_iter<I: IntoIterator<Item = (&'a str, Vec<DocId>)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (lemma, ids) in iter {
            index.postings.entry(lemma.to_string()).or_default().extend(ids);
        }
        index
    }
}
