//! Name resolution and evaluation.

use super::parser::{BinaryOp, ParseTree};
use super::{CompileError, EvalError, Expression};

/// Built-in single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Arcsine.
    Asin,
    /// Arccosine.
    Acos,
    /// Arctangent.
    Atan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    /// Base-10 logarithm (`log` and `log10`).
    Log10,
    /// Base-2 logarithm.
    Log2,
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
    /// Round down.
    Floor,
    /// Round up.
    Ceil,
}

impl Function {
    /// Look up a function by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let f = match name.to_ascii_lowercase().as_str() {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" => Self::Ln,
            "log" | "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            _ => return None,
        };
        Some(f)
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
        }
    }

    /// Whether every finite or infinite argument is inside the domain.
    pub fn is_total(self) -> bool {
        !matches!(
            self,
            Self::Ln | Self::Log10 | Self::Log2 | Self::Sqrt | Self::Asin | Self::Acos
        )
    }

    /// Whether `v` lies inside the function's real domain.
    pub fn accepts(self, v: f64) -> bool {
        match self {
            Self::Ln | Self::Log10 | Self::Log2 => v > 0.0,
            Self::Sqrt => v >= 0.0,
            Self::Asin | Self::Acos => (-1.0..=1.0).contains(&v),
            _ => true,
        }
    }

    /// Apply the function without a domain check.
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Asin => v.asin(),
            Self::Acos => v.acos(),
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
            Self::Log10 => v.log10(),
            Self::Log2 => v.log2(),
            Self::Sqrt => v.sqrt(),
            Self::Abs => v.abs(),
            Self::Floor => v.floor(),
            Self::Ceil => v.ceil(),
        }
    }
}

/// Expression with every name resolved, ready to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledExpr {
    /// Constant value.
    Const(f64),
    /// The free variable `x`.
    X,
    /// Unary minus.
    Neg(Box<CompiledExpr>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<CompiledExpr>,
        /// Right operand.
        rhs: Box<CompiledExpr>,
    },
    /// Function application.
    Call {
        /// Function.
        func: Function,
        /// Argument.
        arg: Box<CompiledExpr>,
    },
}

impl CompiledExpr {
    fn eval_at(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Self::Const(c) => Ok(*c),
            Self::X => Ok(x),
            Self::Neg(inner) => Ok(-inner.eval_at(x)?),
            Self::Binary { op, lhs, rhs } => Ok(op.apply(lhs.eval_at(x)?, rhs.eval_at(x)?)),
            Self::Call { func, arg } => {
                let v = arg.eval_at(x)?;
                if !func.accepts(v) {
                    return Err(EvalError::Domain {
                        function: func.name(),
                        x,
                    });
                }
                Ok(func.apply(v))
            },
        }
    }

    /// Whether evaluation can never hit a domain error.
    pub fn is_total(&self) -> bool {
        match self {
            Self::Const(_) | Self::X => true,
            Self::Neg(inner) => inner.is_total(),
            Self::Binary { lhs, rhs, .. } => lhs.is_total() && rhs.is_total(),
            Self::Call { func, arg } => func.is_total() && arg.is_total(),
        }
    }
}

impl Expression for CompiledExpr {
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        let y = self.eval_at(x)?;
        if y.is_finite() {
            Ok(y)
        } else {
            Err(EvalError::NonFinite { x })
        }
    }
}

/// Resolve names in a parse tree.
pub fn compile(tree: &ParseTree) -> Result<CompiledExpr, CompileError> {
    let compiled = match tree {
        ParseTree::Number(n) => CompiledExpr::Const(*n),
        ParseTree::Ident(name) => match name.to_ascii_lowercase().as_str() {
            "x" => CompiledExpr::X,
            "pi" => CompiledExpr::Const(std::f64::consts::PI),
            "e" => CompiledExpr::Const(std::f64::consts::E),
            _ if Function::from_name(name).is_some() => {
                return Err(CompileError::MissingArgument(name.clone()))
            },
            _ => return Err(CompileError::UnknownVariable(name.clone())),
        },
        ParseTree::Neg(inner) => CompiledExpr::Neg(Box::new(compile(inner)?)),
        ParseTree::Binary { op, lhs, rhs } => CompiledExpr::Binary {
            op: *op,
            lhs: Box::new(compile(lhs)?),
            rhs: Box::new(compile(rhs)?),
        },
        ParseTree::Call { name, arg } => {
            let func = Function::from_name(name)
                .ok_or_else(|| CompileError::UnknownFunction(name.clone()))?;
            CompiledExpr::Call {
                func,
                arg: Box::new(compile(arg)?),
            }
        },
    };
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parse;

    fn compiled(text: &str) -> CompiledExpr {
        compile(&parse(text).unwrap()).unwrap()
    }

    #[test]
    fn resolves_variable_and_constants_case_insensitively() {
        let expr = compiled("X * PI + e");
        let y = expr.evaluate(2.0).unwrap();
        assert!((y - (2.0 * std::f64::consts::PI + std::f64::consts::E)).abs() < 1e-12);
    }

    #[test]
    fn evaluates_functions() {
        assert_eq!(compiled("sqrt(x)").evaluate(9.0).unwrap(), 3.0);
        assert_eq!(compiled("abs(x) + floor(x)").evaluate(-1.5).unwrap(), -0.5);
        assert!((compiled("log(x)").evaluate(1000.0).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn reports_domain_errors() {
        assert_eq!(
            compiled("ln(x)").evaluate(-1.0),
            Err(EvalError::Domain {
                function: "ln",
                x: -1.0
            })
        );
        assert!(compiled("asin(x)").evaluate(2.0).is_err());
    }

    #[test]
    fn reports_non_finite_results() {
        assert_eq!(
            compiled("1 / x").evaluate(0.0),
            Err(EvalError::NonFinite { x: 0.0 })
        );
        assert_eq!(compiled("1 / (1 / x)").evaluate(0.0).unwrap(), 0.0);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = compile(&parse("foo(x)").unwrap()).unwrap_err();
        assert_eq!(err, CompileError::UnknownFunction("foo".to_string()));

        let err = compile(&parse("x * t").unwrap()).unwrap_err();
        assert_eq!(err, CompileError::UnknownVariable("t".to_string()));

        let err = compile(&parse("sin + 1").unwrap()).unwrap_err();
        assert_eq!(err, CompileError::MissingArgument("sin".to_string()));
    }

    #[test]
    fn totality_follows_restricted_functions() {
        assert!(compiled("sin(2 * x) / x").is_total());
        assert!(!compiled("1 + sqrt(x)").is_total());
        assert!(!compiled("abs(ln(x))").is_total());
    }
}
