use thiserror::Error;

use crate::ast::{Expr, ExprKind, InfixOp, PrefixOp};
use crate::span::{Span, Spand};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    #[error("division by zero")]
    DivideByZero,
    #[error("number is out of range")]
    Overflow,
}

pub type RuntimeError = Spand<RuntimeErrorKind>;
pub type RuntimeResult<T> = Result<T, RuntimeError>;

fn finite(value: f64, span: Span) -> RuntimeResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RuntimeError::new(RuntimeErrorKind::Overflow, span))
    }
}

fn apply(op: InfixOp, x: f64, rhs: &Expr) -> RuntimeResult<f64> {
    let y = eval(rhs)?;
    match op {
        InfixOp::Add => Ok(x + y),
        InfixOp::Sub => Ok(x - y),
        InfixOp::Mul => Ok(x * y),
        InfixOp::Div if y == 0.0 => Err(RuntimeError::new(
            RuntimeErrorKind::DivideByZero,
            rhs.span,
        )),
        InfixOp::Div => Ok(x / y),
    }
}

/// Evaluates `expr` depth-first, left operand before right.
///
/// Operator chains such as `1+2+3+...` form a left spine whose length is
/// bounded only by the input length, so the spine is walked with an explicit
/// stack. Recursion happens only for right operands and unary minus.
pub fn eval(expr: &Expr) -> RuntimeResult<f64> {
    let mut folds = Vec::new();
    let mut leftmost = expr;
    let mut acc = loop {
        match &leftmost.kind {
            ExprKind::Infix { op, lhs, rhs } => {
                folds.push((*op, rhs.as_ref(), leftmost.span));
                leftmost = lhs;
            }
            ExprKind::Number(x) => break finite(*x, leftmost.span)?,
            ExprKind::Prefix {
                op: PrefixOp::Neg,
                expr: inner,
            } => break -eval(inner)?,
        }
    };

    for (op, rhs, span) in folds.into_iter().rev() {
        acc = finite(apply(op, acc, rhs)?, span)?;
    }
    Ok(acc)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn run(input: &str) -> RuntimeResult<f64> {
        let tokens = Lexer::new(input).lex_all().unwrap();
        let expr = Parser::new(tokens).parse().unwrap();
        eval(&expr)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(run("2+2"), Ok(4.0));
        assert_eq!(run("2*(3+4)"), Ok(14.0));
        assert_eq!(run("7/2"), Ok(3.5));
        assert_eq!(run("1-2-3"), Ok(-4.0));
        assert_eq!(run("-3*-3"), Ok(9.0));
        assert_eq!(run("0.1+0.2"), Ok(0.1 + 0.2));
    }

    #[test]
    fn division_by_zero() {
        let err = run("10/0").unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::DivideByZero);
        assert_eq!(err.span, Span::new(3, 4));

        let err = run("1/(2-2)").unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::DivideByZero);
        assert_eq!(err.span, Span::new(2, 7));

        assert_eq!(run("1/-0").unwrap_err().kind, RuntimeErrorKind::DivideByZero);
    }

    #[test]
    fn zero_numerator_is_fine() {
        assert_eq!(run("0/5"), Ok(0.0));
    }

    #[test]
    fn long_chain_folds_left_to_right() {
        let input = format!("{}1", "1-".repeat(50_000));
        assert_eq!(run(&input), Ok(-49_999.0));

        let input = format!("1/0{}", "+1".repeat(50_000));
        let err = run(&input).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::DivideByZero);
        assert_eq!(err.span, Span::new(2, 3));
    }

    #[test]
    fn overflow() {
        let big = "9".repeat(400);
        let err = run(&big).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::Overflow);

        let huge = format!("1{}", "0".repeat(300));
        let err = run(&format!("{huge}*{huge}")).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::Overflow);
        assert_eq!(err.span, Span::new(0, 603));
    }
}
