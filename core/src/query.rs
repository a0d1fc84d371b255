use crate::eval::evaluate;
use crate::lemmatizer::Lemmatizer;
use crate::lexer::{Lexer, Token};
use crate::postfix::to_postfix;
use crate::validate::validate;
use crate::{DocId, InvertedIndex};
use tracing::debug;

/// Why a query was refused. Positions are 1-based token offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("empty query")]
    EmptyQuery,
    #[error("query is a lone operator")]
    LoneOperator,
    #[error("query cannot end with an operator")]
    TrailingOperator,
    #[error("unmatched ')' at token {position}")]
    UnmatchedClose { position: usize },
    #[error("unclosed '(' at token {position}")]
    UnclosedParen { position: usize },
    #[error("{operator} at token {position} is followed by another operator")]
    OperatorSequence { operator: Token, position: usize },
    #[error("{operator} at token {position} is followed by ')'")]
    OperatorBeforeClose { operator: Token, position: usize },
    #[error("missing operator before token {position}")]
    MissingOperator { position: usize },
    #[error("{operator} at token {position} has no left operand")]
    MissingOperand { operator: Token, position: usize },
    #[error("empty parentheses at token {position}")]
    EmptyGroup { position: usize },
    #[error("{operator} needs two operands, found {depth}")]
    StackUnderflow { operator: Token, depth: usize },
    #[error("parenthesis in postfix expression")]
    UnexpectedParen,
    #[error("expression leaves {depth} results instead of one")]
    UnbalancedStack { depth: usize },
}

/// Answers boolean queries against one loaded index.
pub struct QueryEngine<L> {
    index: InvertedIndex,
    lemmatizer: L,
}

impl<L: Lemmatizer> QueryEngine<L> {
    pub fn new(index: InvertedIndex, lemmatizer: L) -> Self { Self { index, lemmatizer } }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn tokenize(&self, query: &str) -> Vec<Token> { Lexer::new(&self.lemmatizer).tokenize(query) }

    /// Matching document ids in ascending order.
    pub fn search(&self, query: &str) -> Result<Vec<DocId>, QueryError> {
        let tokens = self.tokenize(query);
        validate(&tokens)?;
        let postfix = to_postfix(&tokens);
        debug!(tokens = %render(&tokens), postfix = %render(&postfix), "parsed query");
        let hits = evaluate(&postfix, &self.index)?;
        debug!(hits = hits.len(), "evaluated query");
        Ok(hits)
    }
}

fn render(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmatizer::Lowercase;

    fn engine() -> QueryEngine<Lowercase> {
        let index: InvertedIndex = [("a", vec![1, 2]), ("b", vec![2, 3])].into_iter().collect();
        QueryEngine::new(index, Lowercase)
    }

    #[test]
    fn validator_errors_surface() {
        assert_eq!(engine().search("   "), Err(QueryError::EmptyQuery));
        assert_eq!(engine().search("a OR"), Err(QueryError::TrailingOperator));
    }

    #[test]
    fn messages_name_the_offender() {
        let err = engine().search("a AND OR b").unwrap_err();
        assert_eq!(err.to_string(), "AND at token 2 is followed by another operator");
        let err = engine().search("(a").unwrap_err();
        assert_eq!(err.to_string(), "unclosed '(' at token 1");
    }

    #[test]
    fn operators_are_case_insensitive() {
        assert_eq!(engine().search("A and B"), Ok(vec![2]));
        assert_eq!(engine().search("a Or b"), Ok(vec![1, 2, 3]));
    }
}
