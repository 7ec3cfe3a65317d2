// Evaluate a token stream at a complex point or across a grid of points
//
// The stream is split into term blocks at every + and -, each block is
// read as coefficient * x^exponent, and the contributions are summed.

use num::complex::Complex64;

use crate::grid::Grid;

use super::differentiate::differentiate;
use super::tokens::{integral_exponent, tokenize, Operator, ParseError, Token};

// A single monomial
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Term {
    pub coefficient : f64,
    pub exponent : u32
}

impl Term {
    fn from_block(negate : bool, block : &[Token]) -> Result<Term, ParseError> {
        let (coefficient, exponent) = match block {
            [Token::Number(c)] => (*c, 0.0),
            [Token::Number(c), Token::Variable] => (*c, 1.0),
            [Token::Number(c), Token::Variable, Token::Op(Operator::Caret), Token::Number(e)] |
            [Token::Number(c), Token::Op(Operator::Caret), Token::Number(e)] => (*c, *e),
            [Token::Number(_), .., Token::Op(Operator::Caret)] => {
                return Err(ParseError::MissingExponent)
            },
            [first, second, ..] => return Err(
                ParseError::UnexpectedToken { found : *second, after : *first }
            ),
            [first] => return Err(
                ParseError::UnexpectedToken { found : *first, after : Token::Boundary }
            ),
            [] => return Err(ParseError::Empty)
        };
        Ok(Term {
            coefficient : if negate { -coefficient } else { coefficient },
            exponent : integral_exponent(exponent)?
        })
    }

    pub fn evaluate(self : &Self, z : Complex64) -> Complex64 {
        self.coefficient * z.powu(self.exponent)
    }
}

// Split a stream into its monomials. Boundaries count as a +.
pub fn term_blocks(tokens : &[Token]) -> Result<Vec<Term>, ParseError> {
    let mut terms = Vec::new();
    let mut block : Vec<Token> = Vec::new();
    let mut negate = false;
    let separators = std::iter::once(&Token::Boundary)
        .chain(tokens.iter())
        .chain(std::iter::once(&Token::Boundary));
    for token in separators {
        let sign = match token {
            Token::Boundary | Token::Op(Operator::Plus) => Some(false),
            Token::Op(Operator::Minus) => Some(true),
            _ => None
        };
        match sign {
            Some(next_negate) => {
                if !block.is_empty() {
                    terms.push(Term::from_block(negate, &block)?);
                    block.clear();
                }
                negate = next_negate;
            },
            None => block.push(*token)
        }
    }
    Ok(terms)
}

// Something a polynomial can be evaluated at
pub trait EvaluationInput {
    type Output;

    fn evaluate_terms(self : &Self, terms : &[Term]) -> Self::Output;
}

impl EvaluationInput for Complex64 {
    type Output = Complex64;

    fn evaluate_terms(self : &Self, terms : &[Term]) -> Complex64 {
        terms.iter().fold(
            Complex64::new(0.0, 0.0),
            |acc, term| acc + term.evaluate(*self)
        )
    }
}

impl EvaluationInput for Grid<Complex64> {
    type Output = Grid<Complex64>;

    fn evaluate_terms(self : &Self, terms : &[Term]) -> Grid<Complex64> {
        self.map(|z| z.evaluate_terms(terms))
    }
}

// Parse the equation afresh, differentiate if asked, and evaluate at the point
pub fn evaluate_equation<I>(
    equation : &str,
    point : &I,
    differentiate_first : bool
) -> Result<I::Output, ParseError>
    where I : EvaluationInput
{
    let tokens = tokenize(equation)?;
    let stream = if differentiate_first {
        differentiate(&tokens)
    } else {
        tokens
    };
    let terms = term_blocks(&stream)?;
    Ok(point.evaluate_terms(&terms))
}
