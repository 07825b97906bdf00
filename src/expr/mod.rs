//! Single-variable expression engine.
//!
//! Turns the text of one equation line into something that can be evaluated
//! at any `x`:
//!
//! - `parser`    : tokenizer and recursive-descent parser producing a [`ParseTree`]
//! - `compiler`  : name resolution, producing a [`CompiledExpr`]
//! - `optimizer` : constant folding and algebraic identities
//!
//! The graph pipeline only sees the [`Expression`] trait.

mod compiler;
mod optimizer;
mod parser;

pub use compiler::{compile, CompiledExpr, Function};
pub use optimizer::optimize;
pub use parser::{parse, BinaryOp, ParseTree, MAX_DEPTH};

use thiserror::Error;

/// Something that maps `x` to `y`.
pub trait Expression: std::fmt::Debug {
    /// Evaluate at `x`.
    fn evaluate(&self, x: f64) -> Result<f64, EvalError>;
}

/// Parse, compile and optimize one line.
pub fn build(text: &str) -> Result<CompiledExpr, ExprError> {
    let tree = parse(text)?;
    let compiled = compile(&tree)?;
    Ok(optimize(compiled))
}

/// Text could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Nothing but whitespace.
    #[error("empty expression")]
    Empty,

    /// A character that starts no token.
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    /// A token in a position the grammar does not allow.
    #[error("unexpected '{found}' at {pos}")]
    UnexpectedToken { found: String, pos: usize },

    /// Input stopped in the middle of an expression.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// An opening parenthesis without a closing one, or the reverse.
    #[error("unmatched parenthesis at {pos}")]
    UnmatchedParen { pos: usize },

    /// A malformed numeric literal.
    #[error("invalid number '{text}' at {pos}")]
    InvalidNumber { text: String, pos: usize },

    /// Groups, signs or operators nested past the supported depth.
    #[error("expression nested too deeply at {pos}")]
    TooDeep { pos: usize },
}

/// A parse tree could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// An identifier that is neither `x` nor a known constant.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A call to a function that does not exist.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// A function name used without an argument.
    #[error("function '{0}' needs an argument")]
    MissingArgument(String),
}

/// Either stage of building an expression failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// Parsing failed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Compilation failed.
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),
}

/// Evaluation at a single point failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The result was NaN or infinite.
    #[error("non-finite result at x = {x}")]
    NonFinite { x: f64 },

    /// The argument is outside the function's domain.
    #[error("{function} is undefined at x = {x}")]
    Domain { function: &'static str, x: f64 },

    /// The expression cannot be evaluated at all.
    #[error("evaluation failed: {0}")]
    Fatal(String),
}

impl EvalError {
    /// Whether sampling may skip this point and continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Fatal(_))
    }
}
