use crate::interpreter::operator::BinaryOperator;
use thiserror::Error;

/// Failure to turn input text into an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized character {character:?} at position {position}")]
    Lexical { character: char, position: usize },
    #[error("malformed expression: {0}")]
    MalformedExpression(Malformation),
}

/// The ways a postfix token sequence can fail to reduce to a single expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformation {
    #[error("operator '{operator}' needs two operands but only {available} available")]
    StackUnderflow {
        operator: BinaryOperator,
        available: usize,
    },
    #[error("{0} operands were left without an operator")]
    LeftoverOperands(usize),
    #[error("there is nothing to evaluate")]
    Empty,
}

/// Failure while computing the value of an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl From<Malformation> for ParseError {
    fn from(malformation: Malformation) -> Self {
        ParseError::MalformedExpression(malformation)
    }
}
