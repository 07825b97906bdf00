//! The graph model: single writer of the equation registry.

use std::path::Path;

use super::loader::{compile_lines, read_equation_file, CompiledLine};
use super::{
    ColorAssigner, Equation, EquationId, EquationRegistry, PointSelection, PointSeries, Range,
    SeriesSynchronizer,
};
use crate::config::{GraphConfig, SamplingConfig};
use crate::error::{GraphError, Result};

/// Owns the equations, their colors and the derived series.
#[derive(Debug)]
pub struct GraphModel {
    registry: EquationRegistry,
    synchronizer: SeriesSynchronizer,
    colors: ColorAssigner,
    sampling: SamplingConfig,
}

impl GraphModel {
    /// Create an empty model.
    pub fn new(config: &GraphConfig) -> Self {
        let (left, right) = config.view.default_range;
        let range = Range::new(left, right).unwrap_or_default();
        Self {
            registry: EquationRegistry::new(),
            synchronizer: SeriesSynchronizer::new(range, config.sampling, config.sync),
            colors: ColorAssigner::new(),
            sampling: config.sampling,
        }
    }

    /// Give each compiled line its color. Only called once a whole source
    /// compiled, so a failed load consumes no colors.
    fn color_lines(&mut self, lines: Vec<CompiledLine>) -> Vec<Equation> {
        lines
            .into_iter()
            .map(|line| {
                Equation::new(
                    line.label,
                    Box::new(line.expression),
                    self.colors.next(),
                    self.sampling.step_multiplier,
                )
            })
            .collect()
    }

    /// Replace everything with the equations of a file.
    pub fn load_from_file(&mut self, path: &Path) -> Result<usize> {
        let lines = read_equation_file(path).map_err(|e| {
            tracing::error!("Error loading {}: {}", path.display(), e);
            e
        })?;
        Ok(self.replace_with(lines))
    }

    /// Add the equations of a file after the loaded ones.
    pub fn append_from_file(&mut self, path: &Path) -> Result<Vec<EquationId>> {
        let lines = read_equation_file(path).map_err(|e| {
            tracing::error!("Error appending {}: {}", path.display(), e);
            e
        })?;
        Ok(self.append_lines(lines))
    }

    /// Replace everything with the equations in `source`.
    pub fn load_from_str(&mut self, source: &str) -> Result<usize> {
        let lines = compile_lines(source)?;
        Ok(self.replace_with(lines))
    }

    /// Add the equations in `source` after the loaded ones.
    pub fn append_from_str(&mut self, source: &str) -> Result<Vec<EquationId>> {
        let lines = compile_lines(source)?;
        Ok(self.append_lines(lines))
    }

    fn replace_with(&mut self, lines: Vec<CompiledLine>) -> usize {
        let equations = self.color_lines(lines);
        let count = equations.len();
        self.registry.replace_all(equations, &mut self.synchronizer);
        count
    }

    fn append_lines(&mut self, lines: Vec<CompiledLine>) -> Vec<EquationId> {
        let equations = self.color_lines(lines);
        self.registry.append(equations, &mut self.synchronizer)
    }

    /// Move the visible range and rebuild every series.
    pub fn rerange_x(&mut self, min_x: f64, max_x: f64) -> Result<()> {
        self.synchronizer.set_range(&self.registry, min_x, max_x)
    }

    /// Rebuild every series over the current range.
    pub fn update(&mut self) {
        self.synchronizer.refresh(&self.registry);
    }

    /// Show or hide an equation.
    pub fn set_enabled(&mut self, id: EquationId, enabled: bool) -> Result<()> {
        self.registry.set_enabled(id, enabled, &mut self.synchronizer)
    }

    /// Flip an equation's enabled flag, returning the new value.
    pub fn toggle(&mut self, id: EquationId) -> Result<bool> {
        let enabled = !self
            .registry
            .get(id)
            .ok_or(GraphError::EquationNotFound(id))?
            .is_enabled();
        self.set_enabled(id, enabled)?;
        Ok(enabled)
    }

    /// Drop one equation and its series.
    pub fn remove(&mut self, id: EquationId) -> Result<()> {
        self.registry.remove(id, &mut self.synchronizer).map(|_| ())
    }

    /// Loaded equations.
    pub fn equations(&self) -> &EquationRegistry {
        &self.registry
    }

    /// Drawable series.
    pub fn series(&self) -> &[PointSeries] {
        self.synchronizer.series()
    }

    /// The series synchronizer, for failures and lookups.
    pub fn synchronizer(&self) -> &SeriesSynchronizer {
        &self.synchronizer
    }

    /// Visible range.
    pub fn current_range(&self) -> Range {
        self.synchronizer.current_range()
    }

    /// Sample closest to a point on the chart.
    pub fn select_point(&self, x: f64, y: f64, y_scale: f64) -> Option<PointSelection> {
        self.synchronizer.nearest_point(x, y, y_scale)
    }
}

impl Default for GraphModel {
    fn default() -> Self {
        Self::new(&GraphConfig::default())
    }
}
