use std::fmt::Display;

use crate::span::Spand;
use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl PrefixOp {
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(Self::Neg),
            _ => None,
        }
    }
}

impl InfixOp {
    /// Operators of the `expr` level.
    #[must_use]
    pub const fn additive(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            _ => None,
        }
    }

    /// Operators of the `term` level.
    #[must_use]
    pub const fn multiplicative(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Star => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            _ => None,
        }
    }
}

impl Display for PrefixOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neg => write!(f, "-"),
        }
    }
}

impl Display for InfixOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Number(f64),

    Prefix {
        op:   PrefixOp,
        expr: Box<Expr>,
    },

    Infix {
        op:  InfixOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

pub type Expr = Spand<ExprKind>;

/// Unlinks the left spine one node at a time, so dropping a long operator
/// chain does not recurse once per operator.
impl Drop for ExprKind {
    fn drop(&mut self) {
        let mut spine = Vec::new();
        if let Self::Infix { lhs, .. } = self {
            spine.push(std::mem::replace(&mut lhs.kind, Self::Number(0.0)));
        }
        while let Some(mut kind) = spine.pop() {
            if let Self::Infix { lhs, .. } = &mut kind {
                spine.push(std::mem::replace(&mut lhs.kind, Self::Number(0.0)));
            }
        }
    }
}

/// Fully parenthesized form, mainly for logs and tests.
impl Display for ExprKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(x) => write!(f, "{x}"),
            Self::Prefix { op, expr } => write!(f, "({op}{expr})"),
            Self::Infix { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
        }
    }
}
