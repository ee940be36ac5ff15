use spinum::{ArithResult, Number};

use crate::token::TokenKind;

/// Binding strength of an infix operator. Every level associates to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prec {
    Sum,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl InfixOp {
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Star => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            _ => None,
        }
    }

    #[must_use]
    pub const fn prec(self) -> Prec {
        match self {
            Self::Add | Self::Sub => Prec::Sum,
            Self::Mul | Self::Div => Prec::Product,
        }
    }

    pub fn apply(self, lhs: Number, rhs: Number) -> ArithResult<Number> {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}
