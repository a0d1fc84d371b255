use crate::lexer::Token;

/// Shunting-yard conversion of a validated infix sequence into postfix.
///
/// Binary operators of equal precedence are popped before the incoming one
/// is pushed (left to right). NOT is prefix and stacks on itself, so a NOT on
/// the stack is never popped by another NOT.
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<&Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Operand(_) => output.push(token.clone()),
            Token::LeftParen => stack.push(token),
            Token::RightParen => {
                while let Some(top) = stack.pop() {
                    if *top == Token::LeftParen {
                        break;
                    }
                    output.push(top.clone());
                }
            }
            Token::And | Token::Or | Token::Not => {
                while let Some(top) = stack.last() {
                    let pops = match token {
                        Token::Not => top.precedence() > token.precedence(),
                        _ => top.precedence() >= token.precedence(),
                    };
                    if !pops {
                        break;
                    }
                    output.push((*top).clone());
                    stack.pop();
                }
                stack.push(token);
            }
        }
    }

    // unbalanced input can leave a '(' behind; it has no place in postfix
    output.extend(stack.into_iter().rev().filter(|t| t.is_operator()).cloned());
    output
}
