use crate::interpreter::error::EvaluationError;
use std::fmt;
use std::fmt::Formatter;

/// A binary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<BinaryOperator> {
        match symbol {
            '+' => Some(BinaryOperator::Add),
            '-' => Some(BinaryOperator::Subtract),
            '*' => Some(BinaryOperator::Multiply),
            '/' => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    /// Combines two evaluated operands. A divisor of exactly zero is rejected
    /// before any division takes place.
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, EvaluationError> {
        match self {
            BinaryOperator::Add => Ok(a + b),
            BinaryOperator::Subtract => Ok(a - b),
            BinaryOperator::Multiply => Ok(a * b),
            BinaryOperator::Divide if b == 0.0 => Err(EvaluationError::DivisionByZero),
            BinaryOperator::Divide => Ok(a / b),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[parameterized(
    symbol = { '+', '-', '*', '/' },
    expected = {
    BinaryOperator::Add,
    BinaryOperator::Subtract,
    BinaryOperator::Multiply,
    BinaryOperator::Divide,
    }
    )]
    fn symbol_converts_to_matching_operator(symbol: char, expected: BinaryOperator) {
        let operator = BinaryOperator::from_symbol(symbol).unwrap();

        assert_eq!(operator, expected);
        assert_eq!(operator.symbol(), symbol);
    }

    #[test]
    fn unknown_symbol_is_not_an_operator() {
        assert_eq!(BinaryOperator::from_symbol('^'), None);
    }

    #[test]
    fn operator_displays_as_its_symbol() {
        assert_eq!(BinaryOperator::Divide.to_string(), "/");
    }

    #[parameterized(
    operator = {
    BinaryOperator::Add,
    BinaryOperator::Subtract,
    BinaryOperator::Multiply,
    BinaryOperator::Divide,
    },
    expected = { 12.0, 8.0, 20.0, 5.0 }
    )]
    fn apply_combines_left_with_right(operator: BinaryOperator, expected: f64) {
        assert_eq!(operator.apply(10.0, 2.0), Ok(expected));
    }

    #[parameterized(
    divisor = { 0.0, -0.0 }
    )]
    fn apply_rejects_zero_divisor(divisor: f64) {
        assert_eq!(
            BinaryOperator::Divide.apply(1.0, divisor),
            Err(EvaluationError::DivisionByZero)
        );
    }

    #[test]
    fn apply_divides_zero_dividend() {
        assert_eq!(BinaryOperator::Divide.apply(0.0, 5.0), Ok(0.0));
    }

    #[test]
    fn apply_is_real_division() {
        assert_eq!(BinaryOperator::Divide.apply(7.0, 2.0), Ok(3.5));
    }
}
