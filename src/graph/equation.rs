//! A loaded equation and its sampled point series.

use ndarray::Array1;
use ratatui::style::Color;
use thiserror::Error;

use super::Range;
use crate::config::SamplingConfig;
use crate::expr::{EvalError, Expression};

/// Stable identity of an equation inside one registry.
///
/// Ids grow with insertion order and are never reused, so sorting by id
/// gives registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EquationId(pub u64);

impl std::fmt::Display for EquationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The whole curve could not be sampled.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot sample {label}: {source}")]
pub struct SampleError {
    /// Equation that failed.
    pub equation: EquationId,
    /// Its label.
    pub label: String,
    /// The unrecoverable evaluation error.
    #[source]
    pub source: EvalError,
}

/// Sampled points of one equation, tagged back to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSeries {
    /// Owning equation.
    pub equation: EquationId,
    /// Owning equation's label.
    pub label: String,
    /// Owning equation's color.
    pub color: Color,
    /// Samples in increasing x order.
    pub points: Vec<(f64, f64)>,
}

impl PointSeries {
    /// Smallest and largest y, if there are any points.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, &(_, y)| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }

    /// Smallest and largest x, if there are any points.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        match (self.points.first(), self.points.last()) {
            (Some(&(first, _)), Some(&(last, _))) => Some((first, last)),
            _ => None,
        }
    }
}

/// One compiled equation plus its display metadata.
pub struct Equation {
    id: EquationId,
    label: String,
    expression: Box<dyn Expression>,
    color: Color,
    enabled: bool,
    step_multiplier: f64,
}

impl std::fmt::Debug for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Equation")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("color", &self.color)
            .field("enabled", &self.enabled)
            .field("step_multiplier", &self.step_multiplier)
            .finish_non_exhaustive()
    }
}

impl Equation {
    /// Create an enabled equation. The id is assigned when it enters a
    /// registry.
    pub fn new(
        label: impl Into<String>,
        expression: Box<dyn Expression>,
        color: Color,
        step_multiplier: f64,
    ) -> Self {
        Self {
            id: EquationId(0),
            label: label.into(),
            expression,
            color,
            enabled: true,
            step_multiplier,
        }
    }

    /// Registry identity.
    pub fn id(&self) -> EquationId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EquationId) {
        self.id = id;
    }

    /// Display label, e.g. `x^2= y`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Line color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the equation is drawn.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Sample density factor.
    pub fn step_multiplier(&self) -> f64 {
        self.step_multiplier
    }

    /// Sample the equation from `range.left()` to `range.right()` inclusive.
    ///
    /// Points that fail to evaluate (singularities, domain errors) are
    /// skipped. Only an unrecoverable evaluation error fails the series.
    pub fn sample_over_range(
        &self,
        range: &Range,
        sampling: &SamplingConfig,
    ) -> Result<PointSeries, SampleError> {
        let intervals = sampling.intervals(self.step_multiplier);
        let mut grid = Array1::linspace(range.left(), range.right(), intervals + 1);
        // linspace may drift by an ulp at the far end
        grid[intervals] = range.right();

        let mut points = Vec::with_capacity(grid.len());
        for &x in grid.iter() {
            match self.expression.evaluate(x) {
                Ok(y) if y.is_finite() => points.push((x, y)),
                Ok(_) => {},
                Err(e) if e.is_recoverable() => {},
                Err(e) => {
                    return Err(SampleError {
                        equation: self.id,
                        label: self.label.clone(),
                        source: e,
                    })
                },
            }
        }

        tracing::debug!(
            "Sampled {} over {}: {}/{} points",
            self.label,
            range,
            points.len(),
            grid.len()
        );

        Ok(PointSeries {
            equation: self.id,
            label: self.label.clone(),
            color: self.color,
            points,
        })
    }
}
