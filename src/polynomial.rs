// A single variable polynomial read from text
//
// The text is tokenized, differentiated term by term, and both streams are
// reduced to lists of monomials so the polynomial and its derivative can be
// evaluated repeatedly without parsing again.

use std::fmt;
use std::str::FromStr;

pub mod tokens;
pub mod differentiate;
pub mod evaluate;

use tokens::{tokenize, ParseError, Token};
use differentiate::differentiate;
use evaluate::{term_blocks, EvaluationInput, Term};

#[derive(Clone, Debug)]
pub struct Polynomial {
    equation : String,
    tokens : Vec<Token>,
    derivative_tokens : Vec<Token>,
    terms : Vec<Term>,
    derivative_terms : Vec<Term>
}

impl Polynomial {
    pub fn parse(equation : &str) -> Result<Polynomial, ParseError> {
        let tokens = tokenize(equation)?;
        let derivative_tokens = differentiate(&tokens);
        let terms = term_blocks(&tokens)?;
        let derivative_terms = term_blocks(&derivative_tokens)?;
        Ok(Polynomial {
            equation : equation.to_string(),
            tokens,
            derivative_tokens,
            terms,
            derivative_terms
        })
    }

    pub fn equation(self : &Self) -> &str {
        &self.equation
    }

    pub fn tokens(self : &Self) -> &[Token] {
        &self.tokens
    }

    pub fn derivative_tokens(self : &Self) -> &[Token] {
        &self.derivative_tokens
    }

    pub fn degree(self : &Self) -> u32 {
        self.terms.iter().filter(
            |term| term.coefficient != 0.0
        ).map(|term| term.exponent).max().unwrap_or(0)
    }

    pub fn evaluate<I : EvaluationInput>(self : &Self, point : &I) -> I::Output {
        point.evaluate_terms(&self.terms)
    }

    pub fn evaluate_derivative<I : EvaluationInput>(self : &Self, point : &I) -> I::Output {
        point.evaluate_terms(&self.derivative_terms)
    }
}

impl FromStr for Polynomial {
    type Err = ParseError;

    fn from_str(s : &str) -> Result<Polynomial, ParseError> {
        Polynomial::parse(s)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.equation)
    }
}

#[cfg(test)]
mod tests {
    use num::complex::Complex64;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use super::evaluate::evaluate_equation;
    use super::tokens::Operator;

    #[test]
    fn test_matches_fresh_parse() {
        // Parsing once must give the same numbers as parsing on every call
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for equation in ["x^3-1", "x^7-x-1", "x^5-3x^4+9x^3+2x^2-x-1", "-2.5x^2+x", "7"] {
            let polynomial : Polynomial = equation.parse().unwrap();
            for _ in 0..20 {
                let z = Complex64::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
                assert_eq!(polynomial.evaluate(&z), evaluate_equation(equation, &z, false).unwrap());
                assert_eq!(
                    polynomial.evaluate_derivative(&z),
                    evaluate_equation(equation, &z, true).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_degree() {
        assert_eq!(Polynomial::parse("x^7-x-1").unwrap().degree(), 7);
        assert_eq!(Polynomial::parse("0x^4+x^2").unwrap().degree(), 2);
        assert_eq!(Polynomial::parse("3").unwrap().degree(), 0);
    }

    #[test]
    fn test_display() {
        let polynomial = Polynomial::parse("x^3-1").unwrap();
        assert_eq!(polynomial.to_string(), "x^3-1");
        assert_eq!(polynomial.tokens(), &[
            Token::Boundary, Token::Number(1.0), Token::Variable, Token::Op(Operator::Caret),
            Token::Number(3.0), Token::Op(Operator::Minus), Token::Number(1.0), Token::Boundary
        ][..]);
        assert_eq!(polynomial.derivative_tokens(), &[
            Token::Number(3.0), Token::Variable, Token::Op(Operator::Caret), Token::Number(2.0),
            Token::Op(Operator::Plus)
        ][..]);
    }

    #[test]
    fn test_parse_error() {
        assert!("x^2+".parse::<Polynomial>().is_err());
    }
}
