//! Keeps the drawable series in step with the registry and the visible range.

use super::{Equation, EquationId, EquationRegistry, PointSeries, Range, RegistryEvent};
use super::{RegistryListener, SampleError};
use crate::config::{SamplingConfig, SyncConfig};
use crate::error::Result;

/// A sample picked by pointing at the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSelection {
    /// Equation the sample belongs to.
    pub equation: EquationId,
    /// Its label.
    pub label: String,
    /// Sample x.
    pub x: f64,
    /// Sample y.
    pub y: f64,
}

/// Derived series list: one entry per enabled equation, sampled over the
/// current range.
///
/// Appends and toggles are handled incrementally. Range changes and bulk
/// replaces rebuild everything.
#[derive(Debug)]
pub struct SeriesSynchronizer {
    range: Range,
    series: Vec<PointSeries>,
    failures: Vec<SampleError>,
    sampling: SamplingConfig,
    sync: SyncConfig,
}

impl SeriesSynchronizer {
    /// Create an empty synchronizer over `range`.
    pub fn new(range: Range, sampling: SamplingConfig, sync: SyncConfig) -> Self {
        Self {
            range,
            series: Vec::new(),
            failures: Vec::new(),
            sampling,
            sync,
        }
    }

    /// Current series, in draw order.
    pub fn series(&self) -> &[PointSeries] {
        &self.series
    }

    /// Series of one equation, if it is drawn.
    pub fn series_for(&self, id: EquationId) -> Option<&PointSeries> {
        self.series.iter().find(|s| s.equation == id)
    }

    /// Range the series were sampled over.
    pub fn current_range(&self) -> Range {
        self.range
    }

    /// Equations left out because sampling them failed.
    pub fn failures(&self) -> &[SampleError] {
        &self.failures
    }

    /// Sampling settings.
    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Switch to a new visible range and rebuild every series.
    ///
    /// Invalid bounds leave the range and the series untouched.
    pub fn set_range(&mut self, registry: &EquationRegistry, min_x: f64, max_x: f64) -> Result<()> {
        let range = Range::new(min_x, max_x)?;
        tracing::info!("Range changed: {} -> {}", self.range, range);
        self.range = range;
        self.rebuild(registry);
        Ok(())
    }

    /// Rebuild every series over the last known range.
    pub fn refresh(&mut self, registry: &EquationRegistry) {
        self.rebuild(registry);
    }

    fn sample(&mut self, equation: &Equation) -> Option<PointSeries> {
        match equation.sample_over_range(&self.range, &self.sampling) {
            Ok(series) => {
                self.failures.retain(|f| f.equation != equation.id());
                Some(series)
            },
            Err(err) => {
                tracing::warn!("{}", err);
                self.failures.retain(|f| f.equation != err.equation);
                self.failures.push(err);
                None
            },
        }
    }

    fn rebuild(&mut self, registry: &EquationRegistry) {
        self.failures.clear();
        // Swapped in at the end so readers never see a half-built list.
        let mut rebuilt = Vec::with_capacity(registry.enabled_count());
        for equation in registry.iter().filter(|e| e.is_enabled()) {
            if let Some(series) = self.sample(equation) {
                rebuilt.push(series);
            }
        }
        self.series = rebuilt;
        tracing::debug!(
            "Rebuilt {} series over {} ({} failed)",
            self.series.len(),
            self.range,
            self.failures.len()
        );
    }

    fn append_new(&mut self, registry: &EquationRegistry, ids: &[EquationId]) {
        let mut added = Vec::with_capacity(ids.len());
        for equation in ids.iter().filter_map(|&id| registry.get(id)) {
            if equation.is_enabled() {
                if let Some(series) = self.sample(equation) {
                    added.push(series);
                }
            }
        }
        self.series.extend(added);
    }

    fn toggle(&mut self, registry: &EquationRegistry, id: EquationId) {
        let Some(equation) = registry.get(id) else {
            self.drop_series(id);
            return;
        };

        if !equation.is_enabled() {
            self.drop_series(id);
            return;
        }
        if self.series_for(id).is_some() {
            return;
        }

        if let Some(series) = self.sample(equation) {
            self.series.push(series);
            if self.sync.restore_draw_order {
                self.series.sort_by_key(|s| s.equation);
            }
        }
    }

    fn drop_series(&mut self, id: EquationId) {
        self.series.retain(|s| s.equation != id);
        self.failures.retain(|f| f.equation != id);
    }

    /// Closest sample to `(x, y)`.
    ///
    /// `y_scale` is the ratio of x units to y units on screen, so distances
    /// are measured the way the user sees them.
    pub fn nearest_point(&self, x: f64, y: f64, y_scale: f64) -> Option<PointSelection> {
        let mut best: Option<(f64, &PointSeries, (f64, f64))> = None;
        for series in &self.series {
            for &(px, py) in &series.points {
                let dx = px - x;
                let dy = (py - y) * y_scale;
                let d = dx * dx + dy * dy;
                if best.map_or(true, |(bd, _, _)| d < bd) {
                    best = Some((d, series, (px, py)));
                }
            }
        }
        best.map(|(_, series, (px, py))| PointSelection {
            equation: series.equation,
            label: series.label.clone(),
            x: px,
            y: py,
        })
    }
}

impl RegistryListener for SeriesSynchronizer {
    fn on_registry_event(&mut self, registry: &EquationRegistry, event: &RegistryEvent) {
        match event {
            RegistryEvent::BulkReplace => self.rebuild(registry),
            RegistryEvent::ItemsAdded(ids) => self.append_new(registry, ids),
            RegistryEvent::ItemChanged(id) => self.toggle(registry, *id),
            RegistryEvent::ItemRemoved(id) => self.drop_series(*id),
        }
    }
}
