use crate::interpreter::error::ParseError;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::token::Token;
use itertools::Itertools;
use std::iter::{Enumerate, FusedIterator, Peekable};
use std::str::Chars;

/// Splits the given text into postfix tokens.
///
/// Tokens are produced lazily, in source order. Whitespace separates tokens and is
/// otherwise discarded. The first unrecognized character is yielded as an error,
/// after which the tokenizer is exhausted. Cloning the tokenizer, or calling this
/// function again, restarts the sequence.
///
/// # Examples
///
/// ```
/// use postfix_calculator::interpreter::lexer::tokenize;
/// use postfix_calculator::interpreter::operator::BinaryOperator;
/// use postfix_calculator::interpreter::token::Token;
///
/// let tokens: Vec<Token> = tokenize("x 12 +").collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Identifier("x".to_string()),
///         Token::LiteralInteger(12.0),
///         Token::Operator(BinaryOperator::Add),
///     ]
/// );
/// ```
pub fn tokenize(expression: &str) -> Tokenizer<'_> {
    Tokenizer {
        characters: expression.chars().enumerate().peekable(),
        exhausted: false,
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    characters: Peekable<Enumerate<Chars<'a>>>,
    exhausted: bool,
}

impl Tokenizer<'_> {
    fn skip_whitespace(&mut self) {
        while self
            .characters
            .next_if(|(_, character)| character.is_whitespace())
            .is_some()
        {}
    }

    fn take_run(&mut self, belongs: impl Fn(&char) -> bool) -> String {
        self.characters
            .peeking_take_while(|(_, character)| belongs(character))
            .map(|(_, character)| character)
            .collect()
    }

    fn read_integer(&mut self) -> f64 {
        let digits = self.take_run(char::is_ascii_digit);
        // A run of ASCII digits is always a valid float; too many digits give infinity.
        digits.parse().unwrap_or(f64::INFINITY)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        self.skip_whitespace();
        let &(position, character) = self.characters.peek()?;

        let token = if character.is_ascii_digit() {
            Token::LiteralInteger(self.read_integer())
        } else if character.is_alphabetic() {
            Token::Identifier(self.take_run(|character| character.is_alphabetic()))
        } else if let Some(operator) = BinaryOperator::from_symbol(character) {
            self.characters.next();
            Token::Operator(operator)
        } else {
            self.exhausted = true;
            return Some(Err(ParseError::Lexical {
                character,
                position,
            }));
        };

        Some(Ok(token))
    }
}

impl FusedIterator for Tokenizer<'_> {}
