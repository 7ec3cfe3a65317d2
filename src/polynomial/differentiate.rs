// Term by term formal differentiation of a token stream
//
// Walks the stream looking at each token's neighbours. Every coefficient
// is copied across and multiplied by its exponent, exponents are lowered
// by one, and terms in x alone collapse to a constant marked with ^0.
// Constant terms contribute nothing.

use super::tokens::{Operator, Token};

// Lower an exponent by one, never going below zero
fn lower_exponent(exponent : f64) -> f64 {
    if exponent > 0.0 {
        exponent - 1.0
    } else {
        exponent
    }
}

pub fn differentiate(tokens : &[Token]) -> Vec<Token> {
    let mut derivative : Vec<Token> = Vec::with_capacity(tokens.len() + 2);
    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1);
        let prev = i.checked_sub(1).and_then(|j| tokens.get(j));
        let prev_prev = i.checked_sub(2).and_then(|j| tokens.get(j));
        match token {
            Token::Number(val) => {
                if next == Some(&Token::Variable) {
                    // Start of a new term
                    derivative.push(Token::Number(*val));
                } else if
                    prev == Some(&Token::Op(Operator::Caret)) &&
                    prev_prev == Some(&Token::Variable)
                {
                    derivative.push(Token::Number(lower_exponent(*val)));
                }
            },
            Token::Variable => {
                match (next, tokens.get(i + 2)) {
                    (Some(Token::Op(Operator::Caret)), Some(Token::Number(exponent))) => {
                        if let Some(Token::Number(coeff)) = derivative.last_mut() {
                            *coeff *= exponent;
                        }
                        derivative.push(Token::Variable);
                    },
                    _ => {
                        // Implicit exponent of 1 so only the coefficient survives
                        derivative.push(Token::Op(Operator::Caret));
                        derivative.push(Token::Number(0.0));
                    }
                }
            },
            Token::Op(op) => derivative.push(Token::Op(*op)),
            Token::Boundary => {}
        }
    }
    // The last term is usually a constant which leaves a dangling operator
    while let Some(last) = derivative.last() {
        if matches!(last, Token::Number(_)) {
            break;
        }
        derivative.pop();
    }
    derivative.push(Token::Op(Operator::Plus));
    derivative
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::tokens::tokenize;

    use Operator::*;
    use Token::*;

    fn derive(equation : &str) -> Vec<Token> {
        differentiate(&tokenize(equation).unwrap())
    }

    #[test]
    fn test_differentiate_cubic() {
        assert_eq!(derive("x^3-1"), vec!(
            Number(3.0), Variable, Op(Caret), Number(2.0), Op(Plus)
        ));
    }

    #[test]
    fn test_differentiate_linear_term() {
        assert_eq!(derive("x"), vec!(Number(1.0), Op(Caret), Number(0.0), Op(Plus)));
        assert_eq!(derive("4x+7"), vec!(Number(4.0), Op(Caret), Number(0.0), Op(Plus)));
    }

    #[test]
    fn test_differentiate_mixed_signs() {
        assert_eq!(derive("-x^2+3x-5"), vec!(
            Op(Minus), Number(2.0), Variable, Op(Caret), Number(1.0),
            Op(Plus), Number(3.0), Op(Caret), Number(0.0), Op(Plus)
        ));
    }

    #[test]
    fn test_differentiate_zero_exponent() {
        // x^0 is constant so its coefficient becomes 0 and the exponent stays at 0
        assert_eq!(derive("2x^0"), vec!(
            Number(0.0), Variable, Op(Caret), Number(0.0), Op(Plus)
        ));
    }

    #[test]
    fn test_differentiate_constant() {
        assert_eq!(derive("5"), vec!(Op(Plus)));
    }

    #[test]
    fn test_input_untouched() {
        let tokens = tokenize("x^4-2x^2").unwrap();
        let copy = tokens.clone();
        differentiate(&tokens);
        assert_eq!(tokens, copy);
    }
}
