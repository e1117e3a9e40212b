use crate::interpreter::error::{Malformation, ParseError};
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::expression_tree::Expression;
use crate::interpreter::token::Token;
use log::trace;

/// Reduces a postfix token sequence into a single expression tree.
///
/// Values are pushed onto an operand stack. An operator pops its right operand first
/// and its left operand second, then pushes the combined node back. Exactly one
/// expression must remain once the tokens run out.
///
/// Errors in the token sequence are reported in source order; the first one aborts
/// parsing and no partial tree is returned.
///
/// # Arguments
///
/// * `tokens`: The tokens to parse, in postfix order, as produced by the lexer.
///
/// returns: The root of the generated expression tree.
///
/// # Examples
///
/// ```
/// # use postfix_calculator::interpreter::error::ParseError;
/// # fn main() -> Result<(), ParseError> {
/// use postfix_calculator::interpreter::operator::BinaryOperator;
/// use postfix_calculator::interpreter::parser::parse;
/// use postfix_calculator::interpreter::token::Token;
///
/// let postfix_tokens = vec![
///     Token::Identifier("x".to_string()),
///     Token::LiteralInteger(2.0),
///     Token::Operator(BinaryOperator::Divide),
/// ];
/// let tree = parse(postfix_tokens.into_iter().map(Ok))?;
/// assert_eq!(tree.leaf_count(), 2);
/// # Ok(()) }
/// ```
pub fn parse<I>(tokens: I) -> Result<Expression, ParseError>
where
    I: IntoIterator<Item = Result<Token, ParseError>>,
{
    let mut operands: Vec<Expression> = Vec::new();

    for token in tokens {
        let token = token?;
        trace!("shifting '{}'", token);
        match token {
            Token::LiteralInteger(value) => operands.push(Expression::new_number(value)),
            Token::Identifier(name) => operands.push(Expression::new_variable(name)),
            Token::Operator(operator) => {
                let node = reduce(&mut operands, operator)?;
                trace!("reduced '{}', {} operands pending", operator, operands.len());
                operands.push(node);
            }
        }
    }

    let root = operands.pop().ok_or(Malformation::Empty)?;
    if !operands.is_empty() {
        return Err(Malformation::LeftoverOperands(operands.len() + 1).into());
    }
    Ok(root)
}

fn reduce(
    operands: &mut Vec<Expression>,
    operator: BinaryOperator,
) -> Result<Expression, Malformation> {
    let available = operands.len();
    // The right operand is on top of the stack, so it is popped first.
    let right_operand = operands.pop();
    let left_operand = operands.pop();
    match (left_operand, right_operand) {
        (Some(left_operand), Some(right_operand)) => Ok(Expression::new_binary(
            operator,
            left_operand,
            right_operand,
        )),
        _ => Err(Malformation::StackUnderflow {
            operator,
            available,
        }),
    }
}
