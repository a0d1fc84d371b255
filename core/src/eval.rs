use crate::lexer::Token;
use crate::query::QueryError;
use crate::{DocId, InvertedIndex};
use std::cmp::Ordering;

/// Runs a postfix sequence against `index` on a stack of sorted id lists.
///
/// A NOT with nothing on the stack stands for the whole corpus. Any other
/// shortage of operands, or anything but exactly one list left at the end,
/// is an error rather than a partial answer.
pub fn evaluate(postfix: &[Token], index: &InvertedIndex) -> Result<Vec<DocId>, QueryError> {
    let mut stack: Vec<Vec<DocId>> = Vec::new();
    let mut universe: Option<Vec<DocId>> = None;

    for token in postfix {
        match token {
            Token::Operand(lemma) => stack.push(index.sorted_postings(lemma)),
            Token::And | Token::Or => {
                let depth = stack.len();
                let (right, left) = match (stack.pop(), stack.pop()) {
                    (Some(right), Some(left)) => (right, left),
                    _ => return Err(QueryError::StackUnderflow { operator: token.clone(), depth }),
                };
                let merged = match token {
                    Token::And => intersect(&left, &right),
                    _ => union(&left, &right),
                };
                stack.push(merged);
            }
            Token::Not => {
                let universe = universe.get_or_insert_with(|| index.universe());
                let negated = match stack.pop() {
                    Some(operand) => difference(universe, &operand),
                    None => universe.clone(),
                };
                stack.push(negated);
            }
            Token::LeftParen | Token::RightParen => return Err(QueryError::UnexpectedParen),
        }
    }

    let depth = stack.len();
    match stack.pop() {
        Some(result) if depth == 1 => Ok(result),
        _ => Err(QueryError::UnbalancedStack { depth }),
    }
}

/// Ids present in both sorted slices.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                push_unique(&mut out, a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Ids present in either sorted slice.
pub fn union(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                push_unique(&mut out, a[i]);
                i += 1;
            }
            Ordering::Greater => {
                push_unique(&mut out, b[j]);
                j += 1;
            }
            Ordering::Equal => {
                push_unique(&mut out, a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    for &id in a[i..].iter().chain(&b[j..]) {
        push_unique(&mut out, id);
    }
    out
}

/// Ids of sorted `all` that are absent from sorted `exclude`.
pub fn difference(all: &[DocId], exclude: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(all.len().saturating_sub(exclude.len()));
    let mut j = 0;
    for &id in all {
        while j < exclude.len() && exclude[j] < id {
            j += 1;
        }
        if j < exclude.len() && exclude[j] == id {
            continue;
        }
        push_unique(&mut out, id);
    }
    out
}

// inputs are sorted, so a repeat can only sit right behind the last push
fn push_unique(out: &mut Vec<DocId>, id: DocId) {
    if out.last() != Some(&id) {
        out.push(id);
    }
}
