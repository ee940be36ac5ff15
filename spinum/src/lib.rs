//! Numeric values produced by evaluating an arithmetic expression.

pub mod arith;

use std::fmt::Display;

/// Result of an evaluation: an exact integer, or the true quotient of a
/// division that did not come out even.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[must_use]
    pub const fn is_zero(self) -> bool {
        match self {
            Self::Int(x) => x == 0,
            Self::Float(x) => x == 0.0,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(x) => write!(f, "{x}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ArithError {
    #[error("division by zero in {lhs} / {rhs}")]
    DivisionByZero { lhs: Number, rhs: Number },
    #[error("integer overflow in {lhs} {op} {rhs}")]
    Overflow { op: char, lhs: Number, rhs: Number },
}

pub type ArithResult<T> = Result<T, ArithError>;
