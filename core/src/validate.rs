//! Structural checks run on a token sequence before it is converted.
//!
//! The checks run in a fixed order and the first failure wins:
//! emptiness, lone operator, trailing operator, parenthesis balance,
//! operator adjacency, and finally operand placement.

use crate::lexer::Token;
use crate::query::QueryError;

pub fn validate(tokens: &[Token]) -> Result<(), QueryError> {
    let last = tokens.last().ok_or(QueryError::EmptyQuery)?;
    if tokens.len() == 1 && last.is_operator() {
        return Err(QueryError::LoneOperator);
    }
    if last.is_operator() {
        return Err(QueryError::TrailingOperator);
    }
    check_parens(tokens)?;
    check_adjacent_operators(tokens)?;
    check_operand_positions(tokens)
}

fn check_parens(tokens: &[Token]) -> Result<(), QueryError> {
    let mut open: Vec<usize> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LeftParen => open.push(i + 1),
            Token::RightParen => {
                if open.pop().is_none() {
                    return Err(QueryError::UnmatchedClose { position: i + 1 });
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(position) => Err(QueryError::UnclosedParen { position }),
        None => Ok(()),
    }
}

/// AND/OR may not be followed by AND/OR; no operator may be followed by `)`.
/// Any operator may be followed by NOT.
fn check_adjacent_operators(tokens: &[Token]) -> Result<(), QueryError> {
    for (i, pair) in tokens.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        if !current.is_operator() {
            continue;
        }
        let position = i + 1;
        if *next == Token::RightParen {
            return Err(QueryError::OperatorBeforeClose { operator: current.clone(), position });
        }
        if *current != Token::Not && next.is_operator() && *next != Token::Not {
            return Err(QueryError::OperatorSequence { operator: current.clone(), position });
        }
    }
    Ok(())
}

/// Walks the sequence tracking whether the last token closed a value (an
/// operand or `)`). After a value only a binary operator or `)` may follow;
/// anywhere else only an operand, `(` or NOT may.
fn check_operand_positions(tokens: &[Token]) -> Result<(), QueryError> {
    let mut after_value = false;
    for (i, token) in tokens.iter().enumerate() {
        let position = i + 1;
        match token {
            Token::Operand(_) | Token::LeftParen | Token::Not if after_value => {
                return Err(QueryError::MissingOperator { position });
            }
            Token::And | Token::Or if !after_value => {
                return Err(QueryError::MissingOperand { operator: token.clone(), position });
            }
            // an operator before `)` was rejected earlier, so only `(` gets here
            Token::RightParen if !after_value => {
                return Err(QueryError::EmptyGroup { position });
            }
            _ => {}
        }
        after_value = matches!(token, Token::Operand(_) | Token::RightParen);
    }
    Ok(())
}
