use crate::interpreter::operator::BinaryOperator;
use std::fmt;
use std::fmt::Formatter;

/// A discrete part of a postfix expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LiteralInteger(f64),
    Identifier(String),
    Operator(BinaryOperator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::LiteralInteger(value) => write!(f, "{}", value),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Operator(operator) => write!(f, "{}", operator),
        }
    }
}
