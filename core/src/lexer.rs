use crate::lemmatizer::Lemmatizer;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    Operand(String),
}

impl Token {
    pub fn is_operator(&self) -> bool { matches!(self, Token::And | Token::Or | Token::Not) }

    /// Binding strength: NOT > AND > OR. Zero for anything that is not an operator.
    pub fn precedence(&self) -> u8 {
        match self {
            Token::Not => 3,
            Token::And => 2,
            Token::Or => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::And => f.write_str("AND"),
            Token::Or => f.write_str("OR"),
            Token::Not => f.write_str("NOT"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Operand(lemma) => f.write_str(lemma),
        }
    }
}

/// Splits a raw query into tokens. Parentheses always stand alone, whitespace
/// separates everything else, and each non-operator word is lowercased and
/// lemmatized.
pub struct Lexer<'a, L: ?Sized> {
    lemmatizer: &'a L,
}

impl<'a, L: Lemmatizer + ?Sized> Lexer<'a, L> {
    pub fn new(lemmatizer: &'a L) -> Self { Self { lemmatizer } }

    pub fn tokenize(&self, query: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word = String::new();
        for ch in query.chars() {
            match ch {
                '(' => {
                    self.flush(&mut word, &mut tokens);
                    tokens.push(Token::LeftParen);
                }
                ')' => {
                    self.flush(&mut word, &mut tokens);
                    tokens.push(Token::RightParen);
                }
                c if c.is_whitespace() => self.flush(&mut word, &mut tokens),
                c => word.push(c),
            }
        }
        self.flush(&mut word, &mut tokens);
        tokens
    }

    fn flush(&self, word: &mut String, tokens: &mut Vec<Token>) {
        if word.is_empty() {
            return;
        }
        let token = match word.to_uppercase().as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            "NOT" => Token::Not,
            _ => Token::Operand(self.lemmatizer.lemma(&word.to_lowercase())),
        };
        tokens.push(token);
        word.clear();
    }
}
