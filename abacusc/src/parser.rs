use std::fmt::Display;

use thiserror::Error;

use crate::ast::{Expr, ExprKind, InfixOp, PrefixOp};
use crate::span::{Span, Spand};
use crate::token::{Token, TokenKind};

/// Default bound on nested parentheses and unary minus.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expected {
    Operand,
    Token(TokenKind),
    OperatorOrEnd,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operand => write!(f, "a number or '('"),
            Self::Token(kind) => write!(f, "'{kind}'"),
            Self::OperatorOrEnd => write!(f, "an operator or end of input"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Found {
    Token(TokenKind),
    End,
}

impl Display for Found {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(kind) => write!(f, "'{kind}'"),
            Self::End => write!(f, "end of input"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    Unexpected { expected: Expected, found: Found },
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}

impl ParseErrorKind {
    #[must_use]
    pub const fn expected(self) -> Option<Expected> {
        match self {
            Self::Unexpected { expected, .. } => Some(expected),
            Self::TooDeep(_) => None,
        }
    }

}

pub type ParseError = Spand<ParseErrorKind>;
pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser:
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/') unary)*
/// unary   := '-' unary | primary
/// primary := NUMBER | '(' expr ')'
/// ```
pub struct Parser {
    tokens:  Vec<Token>,
    current: usize,

    /// where "end of input" is reported
    end: Span,

    depth:     usize,
    max_depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|tk| Span::point(tk.span.hi()))
            .unwrap_or_default();

        Self {
            tokens,
            current: 0,
            end,
            depth: 0,
            max_depth: MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.current).copied()
    }

    const fn eat(&mut self) {
        self.current += 1;
    }

    fn found(&self) -> (Found, Span) {
        self.peek().map_or((Found::End, self.end), |tk| {
            (Found::Token(tk.kind), tk.span)
        })
    }

    fn unexpected(&self, expected: Expected) -> ParseError {
        let (found, span) = self.found();
        ParseError::new(ParseErrorKind::Unexpected { expected, found }, span)
    }

    fn expect(&mut self, expect: TokenKind) -> ParseResult<Span> {
        match self.peek() {
            Some(Token { kind, span }) if kind == expect => {
                self.eat();
                Ok(span)
            }
            _ => Err(self.unexpected(Expected::Token(expect))),
        }
    }

    fn nested<T>(
        &mut self,
        span: Span,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                ParseErrorKind::TooDeep(self.max_depth),
                span,
            ));
        }
        self.depth += 1;
        let res = parse(self);
        self.depth -= 1;
        res
    }

    fn infix(op: InfixOp, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span.join(rhs.span);
        let kind = ExprKind::Infix {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
        Expr::new(kind, span)
    }

    /// Parses the whole token stream as one expression.
    pub fn parse(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_expr()?;
        if self.peek().is_some() {
            return Err(self.unexpected(Expected::OperatorOrEnd));
        }
        Ok(expr)
    }

    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_term()?;
        while let Some(op) = self.peek().and_then(|tk| InfixOp::additive(tk.kind)) {
            self.eat();
            let rhs = self.parse_term()?;
            lhs = Self::infix(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_unary()?;
        while let Some(op) = self
            .peek()
            .and_then(|tk| InfixOp::multiplicative(tk.kind))
        {
            self.eat();
            let rhs = self.parse_unary()?;
            lhs = Self::infix(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let Some(Token { kind, span }) = self.peek() else {
            return self.parse_primary();
        };
        let Some(op) = PrefixOp::from_token(kind) else {
            return self.parse_primary();
        };

        self.eat();
        let expr = self.nested(span, Self::parse_unary)?;
        let span = span.join(expr.span);
        let kind = ExprKind::Prefix {
            op,
            expr: Box::new(expr),
        };
        Ok(Expr::new(kind, span))
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Number(x),
                span,
            }) => {
                self.eat();
                Ok(Expr::new(ExprKind::Number(x), span))
            }
            Some(Token {
                kind: TokenKind::LParen,
                span,
            }) => {
                self.eat();
                let expr = self.nested(span, Self::parse_expr)?;
                let closing = self.expect(TokenKind::RParen)?;
                Ok(Expr::new(expr.kind, span.join(closing)))
            }
            _ => Err(self.unexpected(Expected::Operand)),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::Lexer;

    fn parse(input: &str) -> ParseResult<Expr> {
        let tokens = Lexer::new(input).lex_all().unwrap();
        Parser::new(tokens).parse()
    }

    fn shape(input: &str) -> String {
        parse(input).unwrap().to_string()
    }

    fn unexpected(input: &str) -> (Expected, Found, Span) {
        let err = parse(input).unwrap_err();
        match err.kind {
            ParseErrorKind::Unexpected { expected, found } => (expected, found, err.span),
            ParseErrorKind::TooDeep(_) => panic!("unexpected depth error for {input:?}"),
        }
    }

    #[test]
    fn precedence() {
        assert_eq!(shape("1+2*3"), "(1 + (2 * 3))");
        assert_eq!(shape("1*2+3"), "((1 * 2) + 3)");
        assert_eq!(shape("(1+2)*3"), "((1 + 2) * 3)");
    }

    #[test]
    fn left_associative() {
        assert_eq!(shape("1-2-3"), "((1 - 2) - 3)");
        assert_eq!(shape("8/4/2"), "((8 / 4) / 2)");
        assert_eq!(shape("1-2+3"), "((1 - 2) + 3)");
    }

    #[test]
    fn unary_minus() {
        assert_eq!(shape("-2*3"), "((-2) * 3)");
        assert_eq!(shape("2*-3"), "(2 * (-3))");
        assert_eq!(shape("--2"), "(-(-2))");
        assert_eq!(shape("2--3"), "(2 - (-3))");
        assert_eq!(shape("-(1+2)"), "(-(1 + 2))");
    }

    #[test]
    fn group_span_covers_parens() {
        let expr = parse("2*(3+4)").unwrap();
        let ExprKind::Infix { rhs, .. } = &expr.kind else {
            panic!("expected infix");
        };
        assert_eq!(rhs.span, Span::new(2, 7));
        assert_eq!(expr.span, Span::new(0, 7));
    }

    #[test]
    fn missing_operand() {
        assert_eq!(
            unexpected("2+"),
            (Expected::Operand, Found::End, Span::point(2))
        );
        assert_eq!(
            unexpected("2*/3"),
            (
                Expected::Operand,
                Found::Token(TokenKind::Slash),
                Span::new(2, 3)
            )
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            unexpected(""),
            (Expected::Operand, Found::End, Span::point(0))
        );
    }

    #[test]
    fn unbalanced_parens() {
        assert_eq!(
            unexpected("(1+2"),
            (
                Expected::Token(TokenKind::RParen),
                Found::End,
                Span::point(4)
            )
        );
        assert_eq!(
            unexpected("1+2)"),
            (
                Expected::OperatorOrEnd,
                Found::Token(TokenKind::RParen),
                Span::new(3, 4)
            )
        );
        assert_eq!(
            unexpected("()"),
            (
                Expected::Operand,
                Found::Token(TokenKind::RParen),
                Span::new(1, 2)
            )
        );
    }

    #[test]
    fn trailing_tokens() {
        let (expected, found, _) = unexpected("2(3)");
        assert_eq!(expected, Expected::OperatorOrEnd);
        assert_eq!(found, Found::Token(TokenKind::LParen));
        let (_, found, _) = unexpected("2 3");
        assert_eq!(found, Found::Token(TokenKind::Number(3.0)));
    }

    #[test]
    fn depth_limit() {
        let deep = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        let tokens = Lexer::new(&deep).lex_all().unwrap();
        assert!(Parser::new(tokens.clone()).with_max_depth(10).parse().is_ok());

        let err = Parser::new(tokens).with_max_depth(9).parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooDeep(9));
        assert_eq!(err.span, Span::new(9, 10));

        let negs = Lexer::new("---1").lex_all().unwrap();
        let err = Parser::new(negs).with_max_depth(2).parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooDeep(2));
    }

    #[test]
    fn long_chain_is_not_nesting() {
        let input = format!("{}1", "2*".repeat(5_000));
        let tokens = Lexer::new(&input).lex_all().unwrap();
        let expr = Parser::new(tokens).with_max_depth(2).parse().unwrap();
        assert_eq!(expr.span, Span::new(0, 10_001));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            parse("(1+2").unwrap_err().to_string(),
            "expected ')', found end of input"
        );
        assert_eq!(
            parse("2+*").unwrap_err().to_string(),
            "expected a number or '(', found '*'"
        );
    }
}
