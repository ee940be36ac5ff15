use std::fmt::Display;

use spispan::Spand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Integer(i64),

    Plus,
    Minus,
    Star,
    Slash,

    LParen,
    RParen,

    Eof,
}

pub type Token = Spand<TokenKind>;

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(x) => write!(f, "{x}"),

            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),

            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),

            Self::Eof => write!(f, "<eof>"),
        }
    }
}
