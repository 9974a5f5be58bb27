//! Infix to postfix conversion.
//!
//! Provides the `Tokenizer`, which splits an expression into lexemes,
//! and `Postfix`, the compiled Reverse Polish form produced by the
//! shunting-yard algorithm. A `Postfix` is immutable and can be
//! evaluated any number of times.

use crate::collections::{Queue, Stack};
use crate::error::RollError;
use crate::precedence::PrecedenceTable;
use crate::token::{Operator, Token};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use tracing::{debug, trace};

/// A unit of infix input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    /// A run of decimal digits, not yet range checked.
    Number(String),
    /// An operator or the `(` bracket.
    Operator(Operator),
    /// The `)` bracket.
    Close,
}

/// Character scanner for infix expressions.
///
/// Digits are accumulated into a single `Number`; any other character
/// ends it. Characters that are neither digits, brackets nor operators
/// (whitespace included) are dropped.
///
/// # Examples
///
/// ```rust
/// use zzroll::postfix::{Lexeme, Tokenizer};
/// use zzroll::Operator;
///
/// let lexemes: Vec<_> = Tokenizer::new("12 d 6").collect();
/// assert_eq!(
///     lexemes,
///     vec![
///         Lexeme::Number("12".into()),
///         Lexeme::Operator(Operator::Dice),
///         Lexeme::Number("6".into()),
///     ]
/// );
/// ```
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(expression: &'a str) -> Self {
        Self {
            chars: expression.chars().peekable(),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        loop {
            let c = self.chars.next()?;

            if c.is_ascii_digit() {
                let mut digits = String::from(c);
                while let Some(&next) = self.chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    digits.push(next);
                    self.chars.next();
                }
                return Some(Lexeme::Number(digits));
            }

            if c == ')' {
                return Some(Lexeme::Close);
            }

            match Operator::from_symbol(c) {
                Some(op) => return Some(Lexeme::Operator(op)),
                None => trace!("skipping character {:?}", c),
            }
        }
    }
}

/// A compiled postfix expression.
///
/// # Examples
///
/// ```rust
/// use zzroll::{PrecedenceTable, Postfix};
///
/// let postfix = Postfix::compile("1 + 2 * 3", &PrecedenceTable::default()).unwrap();
/// assert_eq!(postfix.to_string(), "1 2 3 * +");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    /// Convert an infix expression with the shunting-yard algorithm.
    ///
    /// Brackets and arity are not validated here: malformed input yields
    /// whatever the stack produces and is caught by the evaluator. The
    /// only failure is an integer literal that does not fit in `i64`.
    pub fn compile(expression: &str, precedence: &PrecedenceTable) -> Result<Self, RollError> {
        let mut operators: Stack<Operator> = Stack::new();
        let mut output: Queue<Token> = Queue::new();

        for lexeme in Tokenizer::new(expression) {
            match lexeme {
                Lexeme::Number(digits) => {
                    let value = digits
                        .parse::<i64>()
                        .map_err(|_| RollError::LiteralOutOfRange(digits.clone()))?;
                    output.enqueue(Token::Integer(value));
                }
                Lexeme::Close => {
                    // An unmatched `)` drains the whole stack.
                    while let Some(op) = operators.pop() {
                        if op == Operator::Open {
                            break;
                        }
                        output.enqueue(Token::Operator(op));
                    }
                }
                Lexeme::Operator(Operator::Open) => operators.push(Operator::Open),
                Lexeme::Operator(op) => {
                    let weight = precedence.weight(op);
                    while let Some(&top) = operators.peek() {
                        if precedence.weight(top) < weight {
                            break;
                        }
                        output.enqueue(Token::Operator(top));
                        operators.pop();
                    }
                    operators.push(op);
                }
            }
        }

        while let Some(op) = operators.pop() {
            output.enqueue(Token::Operator(op));
        }

        let postfix = Self {
            tokens: output.into_iter().collect(),
        };
        debug!(expression, postfix = %postfix, "compiled expression");
        Ok(postfix)
    }

    /// Build a postfix expression directly from tokens.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Tokens in evaluation order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the expression compiled to no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether evaluating this expression draws random numbers.
    pub fn has_dice(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| *token == Token::Operator(Operator::Dice))
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpn(expression: &str) -> String {
        Postfix::compile(expression, &PrecedenceTable::default())
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_tokenizer_multi_digit_numbers() {
        let lexemes: Vec<_> = Tokenizer::new("123+45").collect();
        assert_eq!(
            lexemes,
            vec![
                Lexeme::Number("123".into()),
                Lexeme::Operator(Operator::Add),
                Lexeme::Number("45".into()),
            ]
        );
    }

    #[test]
    fn test_tokenizer_skips_unknown_characters() {
        let lexemes: Vec<_> = Tokenizer::new(" o a s ").collect();
        assert!(lexemes.is_empty());
    }

    #[test]
    fn test_tokenizer_whitespace_splits_numbers() {
        let lexemes: Vec<_> = Tokenizer::new("1 2").collect();
        assert_eq!(
            lexemes,
            vec![Lexeme::Number("1".into()), Lexeme::Number("2".into())]
        );
    }

    #[test]
    fn test_precedence_ordering() {
        assert_eq!(rpn("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(rpn("1 * 2 + 3"), "1 2 * 3 +");
    }

    #[test]
    fn test_left_associative_ties() {
        assert_eq!(rpn("8 - 3 - 2"), "8 3 - 2 -");
        assert_eq!(rpn("2 ^ 3 ^ 2"), "2 3 ^ 2 ^");
    }

    #[test]
    fn test_brackets_are_not_emitted() {
        assert_eq!(rpn("(1 + 2) * 3"), "1 2 + 3 *");
        assert_eq!(rpn("(12+2^3)/10*8%5"), "12 2 3 ^ + 10 / 8 * 5 %");
    }

    #[test]
    fn test_dice_binds_tightest() {
        assert_eq!(rpn("2d4 + 3d6 - 1"), "2 4 d 3 6 d + 1 -");
        assert_eq!(rpn("2^3d6"), "2 3 6 d ^");
    }

    #[test]
    fn test_factorial_and_choose() {
        assert_eq!(rpn("5!"), "5 !");
        assert_eq!(rpn("5C2"), "5 2 C");
        assert_eq!(rpn("5c2"), "5 2 C");
    }

    #[test]
    fn test_unclosed_bracket_is_left_in_output() {
        assert_eq!(rpn("(9*7"), "9 7 * (");
    }

    #[test]
    fn test_unmatched_close_bracket_drains_stack() {
        assert_eq!(rpn("1+2)*3"), "1 2 + 3 *");
    }

    #[test]
    fn test_literal_out_of_range() {
        let result = Postfix::compile("99999999999999999999", &PrecedenceTable::default());
        assert_eq!(
            result,
            Err(RollError::LiteralOutOfRange("99999999999999999999".into()))
        );
    }

    #[test]
    fn test_len_and_is_empty() {
        let table = PrecedenceTable::default();
        let postfix = Postfix::compile("2d6 + 1", &table).unwrap();
        assert_eq!(postfix.len(), 5);
        assert_eq!(postfix.tokens()[2], Token::Operator(Operator::Dice));
        assert!(!postfix.is_empty());
        assert!(Postfix::compile(" x ", &table).unwrap().is_empty());
    }

    #[test]
    fn test_has_dice() {
        let table = PrecedenceTable::default();
        assert!(Postfix::compile("3d6", &table).unwrap().has_dice());
        assert!(!Postfix::compile("3*6", &table).unwrap().has_dice());
    }

    #[test]
    fn test_custom_precedence() {
        let table = PrecedenceTable {
            add: 6,
            ..PrecedenceTable::default()
        };
        let postfix = Postfix::compile("1 + 2 * 3", &table).unwrap();
        assert_eq!(postfix.to_string(), "1 2 + 3 *");
    }
}
