//! Reading equation files.

use std::path::Path;

use crate::error::{GraphError, Result};
use crate::expr::{build, CompiledExpr};

/// One successfully compiled line, before it gets a color.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledLine {
    /// Display label: the line text followed by `= y`.
    pub label: String,
    /// Compiled and optimized expression.
    pub expression: CompiledExpr,
}

/// Compile every line of `source`, one equation per line.
///
/// Blank lines are skipped. The first failing line aborts the whole source.
pub fn compile_lines(source: &str) -> Result<Vec<CompiledLine>> {
    let mut compiled = Vec::new();
    for (index, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let expression =
            build(line).map_err(|e| GraphError::invalid_equation(index + 1, line, e))?;
        compiled.push(CompiledLine {
            label: format!("{}= y", line),
            expression,
        });
    }
    Ok(compiled)
}

/// Read and compile an equation file.
pub fn read_equation_file(path: &Path) -> Result<Vec<CompiledLine>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| GraphError::file_open(path.to_path_buf(), e))?;
    let lines = compile_lines(&source)?;
    tracing::info!("Compiled {} equations from {}", lines.len(), path.display());
    Ok(lines)
}
