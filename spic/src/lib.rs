//! Tokenizer and evaluating recursive descent parser for integer
//! arithmetic with `+ - * /` and parentheses.

use spinum::{ArithError, Number};
use spispan::{Span, Spand};
use thiserror::Error;

use crate::lexer::{LexError, Lexer};
use crate::parser::{ParseError, Parser};

pub mod lexer;
pub mod op;
pub mod parser;
pub mod token;

pub type ArithmeticError = Spand<ArithError>;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Arith(#[from] ArithmeticError),
}

impl EvalError {
    /// Where in the input the evaluation failed.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(err) => err.span,
            Self::Parse(err) => err.span,
            Self::Arith(err) => err.span,
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluates one line of input.
///
/// Each call builds its own lexer and parser, so nothing carries over from
/// one evaluation to the next.
pub fn evaluate(text: &str) -> EvalResult<Number> {
    let result = Parser::new(Lexer::new(text))
        .map_err(EvalError::from)
        .and_then(|mut parser| parser.evaluate());

    match &result {
        Ok(value) => log::debug!("{text:?} => {value}"),
        Err(err) => log::debug!("{text:?} failed at {}: {err}", err.span()),
    }

    result
}
