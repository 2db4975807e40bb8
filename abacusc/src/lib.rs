//! Arithmetic front end for the calculator: a tokenizer, a recursive-descent
//! parser and a tree-walking evaluator for `+ - * /`, unary minus and
//! parentheses over decimal numbers.
//!
//! ```
//! assert_eq!(abacusc::evaluate_expression("2*(3+4)").unwrap(), "14");
//! assert_eq!(abacusc::evaluate_expression("7/2").unwrap(), "3.5");
//! ```

use thiserror::Error;
use tracing::debug;

use crate::ast::Expr;
use crate::eval::{RuntimeError, RuntimeErrorKind, eval};
use crate::format::format_number;
use crate::lexer::{LexError, LexErrorKind, Lexer};
use crate::parser::{ParseError, Parser};
use crate::span::Span;

pub mod ast;
pub mod eval;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use crate::lexer::tokenize;

/// Default cap on the expression length in bytes.
pub const MAX_LEN: usize = 1024;

/// Largest nesting depth an [`Evaluator`] accepts, whatever its [`Limits`] ask for.
pub const DEPTH_CEILING: usize = 1024;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl EvalError {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(err) => err.span,
            Self::Parse(err) => err.span,
            Self::Runtime(err) => err.span,
        }
    }

    #[must_use]
    pub const fn is_divide_by_zero(&self) -> bool {
        matches!(
            self,
            Self::Runtime(RuntimeError {
                kind: RuntimeErrorKind::DivideByZero,
                ..
            })
        )
    }
}

/// Bounds on the work a single evaluation may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_len:   usize,
    pub max_depth: usize,
}

impl Limits {
    /// Caps `max_depth` at [`DEPTH_CEILING`] so parsing stays within the stack.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            max_depth: self.max_depth.min(DEPTH_CEILING),
            ..self
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_len:   MAX_LEN,
            max_depth: parser::MAX_DEPTH,
        }
    }
}

/// Stateless evaluator; every call is independent of the others.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    limits: Limits,
}

impl Evaluator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits: limits.clamped(),
        }
    }

    #[must_use]
    pub const fn limits(&self) -> Limits {
        self.limits
    }

    fn check_len(&self, input: &str) -> Result<(), LexError> {
        let max_len = self.limits.max_len.min(u32::MAX as usize);
        if input.len() <= max_len {
            return Ok(());
        }

        let lo = (0..=max_len)
            .rev()
            .find(|&at| input.is_char_boundary(at))
            .unwrap_or_default();
        let lo = u32::try_from(lo).unwrap_or(u32::MAX);
        let hi = u32::try_from(input.len()).unwrap_or(u32::MAX);

        Err(LexError::new(
            LexErrorKind::TooLong(self.limits.max_len),
            Span::new(lo, hi),
        ))
    }

    pub fn parse(&self, input: &str) -> Result<Expr, EvalError> {
        self.check_len(input)?;

        let tokens = Lexer::new(input).lex_all()?;
        let mut parser = Parser::new(tokens).with_max_depth(self.limits.max_depth);
        Ok(parser.parse()?)
    }

    pub fn evaluate(&self, input: &str) -> Result<f64, EvalError> {
        let expr = self.parse(input)?;
        Ok(eval(&expr)?)
    }

    /// Evaluates `expression` and renders the result for the display.
    pub fn evaluate_expression(&self, expression: &str) -> Result<String, EvalError> {
        let result = self.evaluate(expression).map(format_number);
        match &result {
            Ok(shown) => debug!(expression, display = %shown, "evaluated"),
            Err(err) => debug!(expression, %err, "rejected"),
        }
        result
    }
}

/// Evaluates `expression` with the default [`Limits`].
pub fn evaluate_expression(expression: &str) -> Result<String, EvalError> {
    Evaluator::default().evaluate_expression(expression)
}
