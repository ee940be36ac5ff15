use std::str::Chars;

use spispan::{Span, Spand};
use thiserror::Error;

use crate::token::{Token, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("invalid character '{0}'")]
    InvalidChar(char),
    #[error("integer literal does not fit in 64 bits")]
    IntegerOverflow,
}

/// On-demand tokenizer over one line of input.
///
/// Yields one token per call to [`Lexer::next_token`]. Once the input is
/// exhausted every further call yields [`TokenKind::Eof`].
pub struct Lexer<'a> {
    input: &'a str,
    chars: Chars<'a>,

    /// start byte position of current token
    byte_start: u32,

    /// byte position of cursor
    byte: u32,
}

const EOF: char = '\0';

pub type LexError = Spand<LexErrorKind>;
pub type LexResult<T> = Result<T, LexError>;

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        assert!(u32::try_from(input.len()).is_ok());

        Self {
            input,
            chars: input.chars(),
            byte_start: 0,
            byte: 0,
        }
    }

    /// Tokens up to, not including, [`TokenKind::Eof`].
    pub fn lex_all(self) -> Result<Vec<Token>, Vec<LexError>> {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        for item in self {
            match item {
                Ok(ok) => tokens.push(ok),
                Err(err) => errors.push(err),
            }
        }

        if errors.is_empty() {
            Ok(tokens)
        } else {
            Err(errors)
        }
    }

    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF)
    }

    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    fn bump(&mut self) -> Option<char> {
        #[allow(clippy::cast_possible_truncation)]
        self.chars
            .next()
            .inspect(|c| self.byte += c.len_utf8() as u32)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while !self.is_eof() && pred(self.first()) {
            self.bump();
        }
    }

    const fn make_span(&self) -> Span {
        Span::new(self.byte_start, self.byte)
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    fn view(&self) -> &'a str {
        &self.input[self.byte_start as usize..self.byte as usize]
    }

    fn integer(&mut self) -> LexResult<Token> {
        self.eat_while(|c| c.is_ascii_digit());

        let span = self.make_span();
        self.view()
            .parse()
            .map(|value| Token::new(TokenKind::Integer(value), span))
            .map_err(|_| LexError::new(LexErrorKind::IntegerOverflow, span))
    }

    pub fn next_token(&mut self) -> LexResult<Token> {
        macro_rules! token {
            ($name:ident) => {
                Ok(Token::new(TokenKind::$name, self.make_span()))
            };
        }

        self.skip_whitespace();

        self.byte_start = self.byte;
        let Some(c) = self.bump() else {
            return Ok(Token::new(TokenKind::Eof, Span::at(self.byte)));
        };

        let token = match c {
            '(' => token!(LParen),
            ')' => token!(RParen),
            '+' => token!(Plus),
            '-' => token!(Minus),
            '*' => token!(Star),
            '/' => token!(Slash),
            '0'..='9' => self.integer(),

            _ => Err(LexError::new(
                LexErrorKind::InvalidChar(c),
                self.make_span(),
            )),
        };

        if let Ok(token) = &token {
            log::trace!("lexed '{}' at {}", token.kind, token.span);
        }

        token
    }
}

impl Iterator for Lexer<'_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Token {
                kind: TokenKind::Eof,
                ..
            }) => None,
            item => Some(item),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .lex_all()
            .unwrap()
            .into_iter()
            .map(|tk| tk.kind)
            .collect()
    }

    #[test]
    fn operators_and_parens() {
        use crate::token::TokenKind::{LParen, Minus, Plus, RParen, Slash, Star};

        assert_eq!(kinds("+-*/()"), [Plus, Minus, Star, Slash, LParen, RParen]);
    }

    #[test]
    fn integers_take_whole_digit_run() {
        assert_eq!(
            kinds("12 345 6"),
            [
                TokenKind::Integer(12),
                TokenKind::Integer(345),
                TokenKind::Integer(6)
            ]
        );
        assert_eq!(kinds("007"), [TokenKind::Integer(7)]);
    }

    #[test]
    fn whitespace_is_never_a_token() {
        assert_eq!(kinds("  1\t+\n 2  "), kinds("1+2"));
        assert!(kinds(" \t ").is_empty());
    }

    #[test]
    fn spans_are_byte_ranges() {
        let tokens = Lexer::new(" 12 + (3)").lex_all().unwrap();
        let spans: Vec<_> = tokens.iter().map(|tk| (tk.span.lo(), tk.span.hi())).collect();
        assert_eq!(spans, [(1, 3), (4, 5), (6, 7), (7, 8), (8, 9)]);
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::new("7 ");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Integer(7));
        for _ in 0..3 {
            let tk = lexer.next_token().unwrap();
            assert_eq!(tk.kind, TokenKind::Eof);
            assert_eq!(tk.span, Span::at(2));
        }
    }

    #[test]
    fn invalid_char_reports_position() {
        let mut lexer = Lexer::new("2 $ 3");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Integer(2));

        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidChar('$'));
        assert_eq!(err.span, Span::new(2, 3));

        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Integer(3));
    }

    #[test]
    fn multibyte_invalid_char() {
        let errors = Lexer::new("1 × 2").lex_all().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::InvalidChar('×'));
        assert_eq!(errors[0].span, Span::new(2, 4));
    }

    #[test]
    fn integer_overflow() {
        let err = Lexer::new("99999999999999999999").next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IntegerOverflow);
        assert_eq!(err.span, Span::new(0, 20));
    }
}
