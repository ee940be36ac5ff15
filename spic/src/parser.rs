use spinum::Number;
use spispan::{Span, Spand};
use thiserror::Error;

use crate::lexer::{LexResult, Lexer};
use crate::op::{InfixOp, Prec};
use crate::token::{Token, TokenKind};
use crate::{ArithmeticError, EvalResult};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected integer or '(', found '{0}'")]
    ExpectedOperand(TokenKind),
    #[error("expected '{expected}', found '{found}'")]
    Expected {
        expected: TokenKind,
        found:    TokenKind,
    },
    #[error("unexpected '{0}' after end of expression")]
    TrailingInput(TokenKind),
    #[error("parentheses nested deeper than {} levels", MAX_DEPTH)]
    NestingTooDeep,
}

/// Deepest parenthesized group accepted. Bounds the recursion of
/// `parse_factor` so it fits a default thread stack.
pub const MAX_DEPTH: usize = 256;

pub type ParseError = Spand<ParseErrorKind>;
pub type ParseResult<T> = Result<T, ParseError>;

/// A computed value together with the source it was computed from.
pub type Value = Spand<Number>;

/// Recursive descent evaluator over
///
/// ```text
/// expr   := term ( (PLUS | MINUS) term )*
/// term   := factor ( (STAR | SLASH) factor )*
/// factor := INTEGER | LPAREN expr RPAREN
/// ```
///
/// Tokens are pulled from the lexer one at a time; only the lookahead is
/// ever held.
pub struct Parser<'a> {
    lexer:   Lexer<'a>,
    current: Token,

    /// open parentheses enclosing the current production
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Binds to `lexer` and primes the lookahead with its first token.
    pub fn new(mut lexer: Lexer<'a>) -> LexResult<Self> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    #[must_use]
    pub const fn peek(&self) -> Token {
        self.current
    }

    fn advance(&mut self) -> EvalResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn eat(&mut self, expect: TokenKind) -> EvalResult<Span> {
        let Token { kind, span } = self.current;
        if kind == expect {
            self.advance().map(|tk| tk.span)
        } else {
            let kind = ParseErrorKind::Expected {
                expected: expect,
                found:    kind,
            };
            Err(ParseError::new(kind, span).into())
        }
    }

    /// Evaluates a whole line. Anything left after the expression is an error.
    pub fn evaluate(&mut self) -> EvalResult<Number> {
        let value = self.parse_expr()?;
        match self.peek() {
            Token {
                kind: TokenKind::Eof,
                ..
            } => Ok(value.into_kind()),
            Token { kind, span } => {
                Err(ParseError::new(ParseErrorKind::TrailingInput(kind), span).into())
            }
        }
    }

    pub fn parse_expr(&mut self) -> EvalResult<Value> {
        let lhs = self.parse_term()?;
        self.parse_infix(lhs, Prec::Sum, Self::parse_term)
    }

    pub fn parse_term(&mut self) -> EvalResult<Value> {
        let lhs = self.parse_factor()?;
        self.parse_infix(lhs, Prec::Product, Self::parse_factor)
    }

    pub fn parse_factor(&mut self) -> EvalResult<Value> {
        let Token { kind, span } = self.peek();
        match kind {
            TokenKind::Integer(x) => {
                self.eat(kind)?;
                Ok(Value::new(Number::Int(x), span))
            }
            TokenKind::LParen => {
                if self.depth >= MAX_DEPTH {
                    return Err(ParseError::new(ParseErrorKind::NestingTooDeep, span).into());
                }
                self.eat(kind)?;
                self.depth += 1;
                let inner = self.parse_expr();
                self.depth -= 1;
                let inner = inner?;
                let closing = self.eat(TokenKind::RParen)?;
                Ok(Value::new(inner.kind, span.join(closing)))
            }
            _ => Err(ParseError::new(ParseErrorKind::ExpectedOperand(kind), span).into()),
        }
    }

    /// Folds `lhs (op operand)*` from the left for every `op` at `prec`.
    fn parse_infix(
        &mut self,
        mut lhs: Value,
        prec: Prec,
        operand: impl Fn(&mut Self) -> EvalResult<Value>,
    ) -> EvalResult<Value> {
        while let Some(op) = InfixOp::from_token(self.peek().kind).filter(|op| op.prec() == prec) {
            self.advance()?;
            let rhs = operand(self)?;
            let span = lhs.span.join(rhs.span);
            let value = op
                .apply(lhs.kind, rhs.kind)
                .map_err(|err| ArithmeticError::new(err, span))?;
            lhs = Value::new(value, span);
        }

        Ok(lhs)
    }
}
