//! Constant folding and algebraic identities.

use super::compiler::CompiledExpr;
use super::parser::BinaryOp;

/// Simplify a compiled expression bottom-up.
///
/// Folding only happens when the folded value is finite, so `1/0` stays a
/// division and still reports a non-finite result when evaluated.
pub fn optimize(expr: CompiledExpr) -> CompiledExpr {
    match expr {
        CompiledExpr::Neg(inner) => match optimize(*inner) {
            CompiledExpr::Const(c) => CompiledExpr::Const(-c),
            CompiledExpr::Neg(inner) => *inner,
            other => CompiledExpr::Neg(Box::new(other)),
        },
        CompiledExpr::Binary { op, lhs, rhs } => {
            simplify_binary(op, optimize(*lhs), optimize(*rhs))
        },
        CompiledExpr::Call { func, arg } => match optimize(*arg) {
            CompiledExpr::Const(c) if func.accepts(c) && func.apply(c).is_finite() => {
                CompiledExpr::Const(func.apply(c))
            },
            other => CompiledExpr::Call {
                func,
                arg: Box::new(other),
            },
        },
        leaf => leaf,
    }
}

fn simplify_binary(op: BinaryOp, lhs: CompiledExpr, rhs: CompiledExpr) -> CompiledExpr {
    use CompiledExpr::Const;

    if let (Const(a), Const(b)) = (&lhs, &rhs) {
        let folded = op.apply(*a, *b);
        if folded.is_finite() {
            return Const(folded);
        }
    }

    match (op, lhs, rhs) {
        (BinaryOp::Add, Const(z), e) | (BinaryOp::Add, e, Const(z)) if z == 0.0 => e,
        (BinaryOp::Sub, e, Const(z)) if z == 0.0 => e,
        (BinaryOp::Mul, Const(o), e) | (BinaryOp::Mul, e, Const(o)) if o == 1.0 => e,
        (BinaryOp::Div, e, Const(o)) if o == 1.0 => e,
        (BinaryOp::Pow, e, Const(o)) if o == 1.0 => e,
        // a^0 keeps `a` when `a` can fail, so its domain errors survive
        (BinaryOp::Pow, e, Const(z)) if z == 0.0 && e.is_total() => Const(1.0),
        (op, lhs, rhs) => CompiledExpr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{compile, parse, Expression, Function};

    fn optimized(text: &str) -> CompiledExpr {
        optimize(compile(&parse(text).unwrap()).unwrap())
    }

    #[test]
    fn folds_constant_subtrees() {
        assert_eq!(optimized("2 * 3 + 4"), CompiledExpr::Const(10.0));
        assert_eq!(
            optimized("x * (2 ^ 3)"),
            CompiledExpr::Binary {
                op: BinaryOp::Mul,
                lhs: Box::new(CompiledExpr::X),
                rhs: Box::new(CompiledExpr::Const(8.0)),
            }
        );
        assert_eq!(optimized("cos(0)"), CompiledExpr::Const(1.0));
    }

    #[test]
    fn removes_identities() {
        assert_eq!(optimized("0 + x * 1"), CompiledExpr::X);
        assert_eq!(optimized("(x - 0) / 1"), CompiledExpr::X);
        assert_eq!(optimized("x ^ 1"), CompiledExpr::X);
        assert_eq!(optimized("--x"), CompiledExpr::X);
        assert_eq!(optimized("sin(x) ^ 0"), CompiledExpr::Const(1.0));
    }

    #[test]
    fn keeps_non_finite_folds_unevaluated() {
        let expr = optimized("1 / 0");
        assert!(matches!(expr, CompiledExpr::Binary { op: BinaryOp::Div, .. }));
        assert!(expr.evaluate(0.0).is_err());

        let expr = optimized("ln(0 - 1)");
        assert_eq!(
            expr,
            CompiledExpr::Call {
                func: Function::Ln,
                arg: Box::new(CompiledExpr::Const(-1.0)),
            }
        );
    }

    #[test]
    fn zero_power_keeps_domain_errors() {
        let raw = compile(&parse("ln(x) ^ 0").unwrap()).unwrap();
        let opt = optimize(raw.clone());
        assert!(matches!(opt, CompiledExpr::Binary { op: BinaryOp::Pow, .. }));
        for x in [-1.0, 0.0] {
            assert!(raw.evaluate(x).is_err());
            assert!(opt.evaluate(x).is_err());
        }
        assert_eq!(opt.evaluate(2.0).unwrap(), 1.0);
    }

    #[test]
    fn optimization_preserves_values() {
        let raw = compile(&parse("3 * sin(x) + 0 * 1 - 2 ^ 2").unwrap()).unwrap();
        let opt = optimize(raw.clone());
        for x in [-2.0, -0.5, 0.0, 1.25, 3.0] {
            let a = raw.evaluate(x).unwrap();
            let b = opt.evaluate(x).unwrap();
            assert!((a - b).abs() < 1e-12);
        }
    }
}
