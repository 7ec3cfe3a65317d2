// Turn a polynomial written as text into a flat stream of tokens
//
// The grammar is deliberately small: numeric literals, the variable x, and
// the operators +, - and ^. Coefficients are implied by juxtaposition so
// "3x^2" is the coefficient 3 followed by x raised to 2, and a bare "x"
// has an implied coefficient of 1.

use std::fmt;
use std::io;

use thiserror::Error;

pub const VARIABLE : char = 'x';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Caret
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Variable,
    Op(Operator),
    // Start or end of a parsed expression
    Boundary
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Empty expression")]
    Empty,

    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character : char, position : usize },

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Unexpected {found} after {after}")]
    UnexpectedToken { found : Token, after : Token },

    #[error("Exponent marker is not followed by a number")]
    MissingExponent,

    #[error("Expression ends with an operator")]
    TrailingOperator,

    #[error("Unsupported exponent {0}, only non-negative integers are allowed")]
    UnsupportedExponent(f64)
}

impl From<ParseError> for io::Error {
    fn from(err : ParseError) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

impl Operator {
    fn from_char(c : char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            '^' => Some(Operator::Caret),
            _ => None
        }
    }

    pub fn is_additive(self : &Self) -> bool {
        matches!(self, Operator::Plus | Operator::Minus)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::Plus => write!(f, "+"),
            Operator::Minus => write!(f, "-"),
            Operator::Caret => write!(f, "^")
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(val) => write!(f, "{}", val),
            Token::Variable => write!(f, "{}", VARIABLE),
            Token::Op(op) => write!(f, "'{}'", op),
            Token::Boundary => write!(f, "boundary")
        }
    }
}

fn is_numeric(c : char) -> bool {
    c.is_ascii_digit() || c == '.'
}

// Checks an exponent literal is something we know how to differentiate
pub(crate) fn integral_exponent(val : f64) -> Result<u32, ParseError> {
    if val >= 0.0 && val.fract() == 0.0 && val <= u32::MAX as f64 {
        Ok(val as u32)
    } else {
        Err(ParseError::UnsupportedExponent(val))
    }
}

// Insert the implied coefficient 1 in front of every variable that isn't
// already preceded by a number. Whitespace is dropped, except that it may
// not split a numeric literal in two.
fn with_implicit_coefficients(equation : &str) -> Result<Vec<(usize, char)>, ParseError> {
    let mut chars : Vec<(usize, char)> = Vec::with_capacity(equation.len() + 4);
    let mut prev : Option<char> = None;
    let mut gap : Option<(usize, char)> = None;
    for (pos, c) in equation.char_indices() {
        if c.is_whitespace() {
            gap = gap.or(Some((pos, c)));
            continue;
        }
        if let Some((gap_pos, gap_char)) = gap.take() {
            if is_numeric(c) && prev.map_or(false, is_numeric) {
                return Err(ParseError::UnexpectedCharacter { character : gap_char, position : gap_pos });
            }
        }
        if c == VARIABLE && !prev.map_or(false, is_numeric) {
            chars.push((pos, '1'));
        }
        chars.push((pos, c));
        prev = Some(c);
    }
    Ok(chars)
}

// Where we are inside a single term while checking the structure
#[derive(Clone, Copy, PartialEq)]
enum TermState {
    Start,
    Sign,
    Coefficient,
    Variable,
    Caret,
    Exponent
}

// Every term must look like [sign] number [x [^ integer]]
fn check_structure(tokens : &[Token]) -> Result<(), ParseError> {
    let mut state = TermState::Start;
    let mut prev = Token::Boundary;
    for token in tokens.iter() {
        state = match (state, token) {
            (_, Token::Boundary) => state,
            (TermState::Start, Token::Op(op)) if op.is_additive() => TermState::Sign,
            (TermState::Start | TermState::Sign, Token::Number(_)) => TermState::Coefficient,
            (TermState::Coefficient, Token::Variable) => TermState::Variable,
            (TermState::Variable, Token::Op(Operator::Caret)) => TermState::Caret,
            (TermState::Caret, Token::Number(val)) => {
                integral_exponent(*val)?;
                TermState::Exponent
            },
            (TermState::Caret, _) => return Err(ParseError::MissingExponent),
            (
                TermState::Coefficient | TermState::Variable | TermState::Exponent,
                Token::Op(op)
            ) if op.is_additive() => TermState::Sign,
            (_, found) => return Err(
                ParseError::UnexpectedToken { found : *found, after : prev }
            )
        };
        prev = *token;
    }
    match state {
        TermState::Coefficient | TermState::Variable | TermState::Exponent => Ok(()),
        TermState::Caret => Err(ParseError::MissingExponent),
        TermState::Sign => Err(ParseError::TrailingOperator),
        TermState::Start => Err(ParseError::Empty)
    }
}

// Parse an expression into tokens wrapped by a start and end boundary
pub fn tokenize(equation : &str) -> Result<Vec<Token>, ParseError> {
    let chars = with_implicit_coefficients(equation)?;
    if chars.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut tokens = vec![Token::Boundary];
    let mut iter = chars.iter().peekable();
    while let Some(&(pos, c)) = iter.next() {
        if is_numeric(c) {
            let mut literal = String::from(c);
            while let Some(&&(_, next)) = iter.peek() {
                if !is_numeric(next) {
                    break;
                }
                literal.push(next);
                iter.next();
            }
            let val = literal.parse::<f64>().map_err(
                |_| ParseError::InvalidNumber(literal.clone())
            )?;
            tokens.push(Token::Number(val));
        } else if c == VARIABLE {
            tokens.push(Token::Variable);
        } else if let Some(op) = Operator::from_char(c) {
            tokens.push(Token::Op(op));
        } else {
            return Err(ParseError::UnexpectedCharacter { character : c, position : pos });
        }
    }
    tokens.push(Token::Boundary);
    check_structure(&tokens)?;
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    use Operator::*;
    use Token::*;

    #[test]
    fn test_tokenize_cubic() {
        let tokens = tokenize("x^3-1").unwrap();
        assert_eq!(tokens, vec!(
            Boundary, Number(1.0), Variable, Op(Caret), Number(3.0),
            Op(Minus), Number(1.0), Boundary
        ));
    }

    #[test]
    fn test_tokenize_multi_digit_literals() {
        let tokens = tokenize("12.5x^10+0.25").unwrap();
        assert_eq!(tokens, vec!(
            Boundary, Number(12.5), Variable, Op(Caret), Number(10.0),
            Op(Plus), Number(0.25), Boundary
        ));
    }

    #[test]
    fn test_tokenize_leading_sign() {
        let tokens = tokenize("-x").unwrap();
        assert_eq!(tokens, vec!(Boundary, Op(Minus), Number(1.0), Variable, Boundary));
    }

    #[test]
    fn test_implicit_coefficient_on_every_term() {
        // Each of the variables needs its own coefficient however many there are
        let tokens = tokenize("x+x+x+x").unwrap();
        let coefficients = tokens.iter().filter(|t| **t == Number(1.0)).count();
        assert_eq!(coefficients, 4);
    }

    #[test]
    fn test_whitespace_ignored() {
        assert_eq!(tokenize(" 2x ^ 2 - 1 ").unwrap(), tokenize("2x^2-1").unwrap());
    }

    #[test]
    fn test_whitespace_inside_number() {
        // A space must not join two literals into one
        assert_eq!(
            tokenize("x^1 0"),
            Err(ParseError::UnexpectedCharacter { character : ' ', position : 3 })
        );
        assert_eq!(
            tokenize("1 2x"),
            Err(ParseError::UnexpectedCharacter { character : ' ', position : 1 })
        );
        assert!(tokenize("1.\t5x").is_err());
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(tokenize(""), Err(ParseError::Empty));
        assert_eq!(tokenize("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize("x^2*3"),
            Err(ParseError::UnexpectedCharacter { character : '*', position : 3 })
        );
        assert!(tokenize("y^2").is_err());
    }

    #[test]
    fn test_missing_exponent() {
        assert_eq!(tokenize("x^"), Err(ParseError::MissingExponent));
        assert_eq!(tokenize("x^-2"), Err(ParseError::MissingExponent));
    }

    #[test]
    fn test_unsupported_exponent() {
        assert_eq!(tokenize("x^1.5"), Err(ParseError::UnsupportedExponent(1.5)));
    }

    #[test]
    fn test_malformed_structure() {
        assert_eq!(tokenize("x+"), Err(ParseError::TrailingOperator));
        assert!(matches!(tokenize("2^3"), Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(tokenize("x--1"), Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(tokenize("xx"), Err(ParseError::UnexpectedToken { .. })));
        assert_eq!(tokenize("1..2x"), Err(ParseError::InvalidNumber("1..2".to_string())));
    }
}
