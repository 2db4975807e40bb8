use std::str::Chars;

use thiserror::Error;

use crate::span::{Span, Spand};
use crate::token::{Token, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("invalid character '{0}'")]
    InvalidChar(char),
    #[error("second decimal point in number")]
    ExtraDecimalPoint,
    #[error("malformed number")]
    MalformedNumber,
    #[error("expression is longer than {0} bytes")]
    TooLong(usize),
}

impl LexErrorKind {
    /// The character the error points at, when there is a single one.
    #[must_use]
    pub const fn character(self) -> Option<char> {
        match self {
            Self::InvalidChar(c) => Some(c),
            Self::ExtraDecimalPoint | Self::MalformedNumber => Some('.'),
            Self::TooLong(_) => None,
        }
    }
}

/// Lazy tokenizer over an expression string.
///
/// A clone is an independent cursor at the same position; [`Lexer::new`]
/// starts over from the beginning.
#[derive(Clone)]
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

    /// Lexes the whole input, stopping at the first error.
    pub fn lex_all(self) -> LexResult<Vec<Token>> {
        self.collect()
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
        self.eat_while(|c| c.is_ascii_whitespace());
    }

    fn view(&self) -> &'a str {
        &self.input[self.byte_start as usize..self.byte as usize]
    }

    /// Called with the first digit or point already bumped.
    fn number(&mut self, first: char) -> LexResult<Token> {
        let mut seen_point = first == '.';

        loop {
            self.eat_while(|c| c.is_ascii_digit());
            if self.first() != '.' {
                break;
            }
            if seen_point {
                let at = self.byte;
                self.bump();
                return Err(LexError::new(
                    LexErrorKind::ExtraDecimalPoint,
                    Span::new(at, self.byte),
                ));
            }
            seen_point = true;
            self.bump();
        }

        let value = self
            .view()
            .parse()
            .map_err(|_| LexError::new(LexErrorKind::MalformedNumber, self.make_span()))?;

        Ok(Token::new(TokenKind::Number(value), self.make_span()))
    }

    pub fn next_token(&mut self) -> Option<LexResult<Token>> {
        macro_rules! token {
            ($name:ident) => {
                Some(Ok(Token::new(TokenKind::$name, self.make_span())))
            };
        }

        self.skip_whitespace();

        self.byte_start = self.byte;
        let c = self.bump()?;

        match c {
            '(' => token!(LParen),
            ')' => token!(RParen),
            '+' => token!(Plus),
            '-' => token!(Minus),
            '*' => token!(Star),
            '/' => token!(Slash),
            '0'..='9' | '.' => Some(self.number(c)),

            _ => Some(Err(LexError::new(
                LexErrorKind::InvalidChar(c),
                self.make_span(),
            ))),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Starts a lazy token stream over `input`.
#[must_use]
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}
