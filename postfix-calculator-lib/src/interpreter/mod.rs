pub mod context;
pub mod error;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

use crate::interpreter::context::Context;
use crate::interpreter::error::{EvaluationError, InterpreterError, ParseError};
use log::debug;
use syntax::expression_tree::Expression;

/// Converts the given postfix text into an equivalent expression tree,
/// which can then be evaluated any number of times.
///
/// # Arguments
///
/// * `expression`: The text-representation of the postfix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use postfix_calculator::interpreter::parse;
/// # use postfix_calculator::interpreter::error::ParseError;
///
/// # fn main() -> Result<(), ParseError> {
/// let tree = parse("3 4 + x *")?;
/// assert_eq!(tree.leaf_count(), 3);
/// # Ok(()) }
/// ```
pub fn parse(expression: &str) -> Result<Expression, ParseError> {
    let tokens = lexer::tokenize(expression);
    parser::parse(tokens)
}

/// Computes the value of an expression tree, resolving variables through `context`.
/// Unbound variables evaluate to zero.
///
/// # Examples
///
/// ```
/// use postfix_calculator::interpreter::context::Context;
/// use postfix_calculator::interpreter::error::EvaluationError;
/// use postfix_calculator::interpreter::{evaluate, parse};
///
/// let context = Context::new();
///
/// let tree = parse("10 0 /").unwrap();
/// assert_eq!(evaluate(&tree, &context), Err(EvaluationError::DivisionByZero));
/// ```
pub fn evaluate(tree: &Expression, context: &Context) -> Result<f64, EvaluationError> {
    let value = tree.evaluate(context)?;
    debug!("evaluated {} leaves to {}", tree.leaf_count(), value);
    Ok(value)
}

/// Parses and evaluates the given postfix text in one step.
///
/// # Examples
///
/// ```
/// use postfix_calculator::interpreter::calculate;
/// use postfix_calculator::interpreter::context::Context;
/// # use postfix_calculator::interpreter::error::InterpreterError;
///
/// # fn main() -> Result<(), InterpreterError> {
/// let mut context = Context::new();
/// context.set("x", 3.0);
///
/// let result = calculate("x 4 -", &context)?;
/// assert_eq!(result, -1.0);
/// # Ok(()) }
/// ```
pub fn calculate(expression: &str, context: &Context) -> Result<f64, InterpreterError> {
    let tree = parse(expression)?;
    Ok(evaluate(&tree, context)?)
}
