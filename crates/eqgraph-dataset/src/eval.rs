//! Plain-arithmetic expression evaluation.
//!
//! A small recursive-descent evaluator over `+ - * / % **`, unary minus,
//! parentheses, numeric literals, and `pi`. It covers the sub-expressions
//! the dependency linker needs to reduce to numbers; anything else (named
//! function calls, unknown symbols) comes back as an [`DatasetError::Evaluation`]
//! and the caller keeps the text unevaluated.
//!
//! `%` follows the modulo convention of the source data (result takes the
//! sign of the divisor), and `**` is right-associative and binds tighter
//! than unary minus, so `-2**2` is `-4`.

use crate::error::DatasetError;

/// Evaluates a plain arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, DatasetError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        source: expression,
        tokens,
        pos: 0,
    };
    let value = parser.expr()?;
    parser.expect_end()?;
    Ok(value)
}

/// Returns `true` if the text is a bare numeric literal (no operators).
pub fn is_plain_number(text: &str) -> bool {
    text.parse::<f64>().is_ok()
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Power,
    LParen,
    RParen,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, DatasetError> {
    let error = |reason: String| DatasetError::Evaluation {
        expression: expression.to_string(),
        reason,
    };

    let mut tokens = Vec::new();
    let chars: Vec<char> = expression.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Power);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|e| error(format!("bad numeric literal '{}': {}", literal, e)))?;
                tokens.push(Token::Number(value));
            }
            'a'..='z' | 'A'..='Z' => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => return Err(error(format!("unexpected character '{}'", other))),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> DatasetError {
        DatasetError::Evaluation {
            expression: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_end(&self) -> Result<(), DatasetError> {
        if self.pos == self.tokens.len() {
            Ok(())
        } else {
            Err(self.error("trailing input after expression"))
        }
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, DatasetError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Result<f64, DatasetError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(self.error("division by zero"));
                    }
                    value /= divisor;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(self.error("modulo by zero"));
                    }
                    value = ((value % divisor) + divisor) % divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    // unary := '-' unary | power
    fn unary(&mut self) -> Result<f64, DatasetError> {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            Ok(-self.unary()?)
        } else {
            self.power()
        }
    }

    // power := primary ('**' unary)?   (right-associative)
    fn power(&mut self) -> Result<f64, DatasetError> {
        let base = self.primary()?;
        if self.peek() == Some(&Token::Power) {
            self.pos += 1;
            let exponent = self.unary()?;
            Ok(base.powf(exponent))
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> Result<f64, DatasetError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Ident(name)) if name == "pi" => Ok(std::f64::consts::PI),
            Some(Token::Ident(name)) => Err(self.error(format!("unknown symbol '{}'", name))),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(self.error("unclosed parenthesis")),
                }
            }
            Some(other) => Err(self.error(format!("unexpected token {:?}", other))),
            None => Err(self.error("empty expression")),
        }
    }
}
