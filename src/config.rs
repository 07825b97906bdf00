//! Configuration for sampling, series synchronization and the viewport.

/// Controls how densely an equation is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Number of intervals per unit of step multiplier.
    pub base_samples: usize,
    /// Step multiplier given to every newly loaded equation.
    pub step_multiplier: f64,
}

impl SamplingConfig {
    /// Number of intervals used for an equation with the given multiplier.
    ///
    /// Independent of the range width, so zooming in refines the step.
    pub fn intervals(&self, step_multiplier: f64) -> usize {
        let n = (self.base_samples as f64 * step_multiplier).ceil();
        if n.is_finite() && n >= 1.0 {
            n as usize
        } else {
            1
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            base_samples: 200,
            step_multiplier: 2.0,
        }
    }
}

/// Behaviour of the series synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Re-sort series by registry order when an equation is re-enabled.
    pub restore_draw_order: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            restore_draw_order: true,
        }
    }
}

/// Viewport behaviour for the interactive chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    /// Range shown at startup and after a reset.
    pub default_range: (f64, f64),
    /// Zooming out never goes past `[-max_extent, max_extent]`.
    pub max_extent: f64,
    /// Fraction of the width moved by one pan step.
    pub pan_fraction: f64,
    /// Width ratio applied by one zoom step.
    pub zoom_factor: f64,
    /// Padding factor for the Y axis (0.15 = 15% margin).
    pub y_padding_factor: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_range: (-10.0, 10.0),
            max_extent: 10_000.0,
            pan_fraction: 0.1,
            zoom_factor: 1.25,
            y_padding_factor: 0.15,
        }
    }
}

/// Combined configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraphConfig {
    /// Sampling density.
    pub sampling: SamplingConfig,
    /// Series synchronization.
    pub sync: SyncConfig,
    /// Interactive viewport.
    pub view: ViewConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_density_is_four_hundred_intervals() {
        let cfg = SamplingConfig::default();
        assert_eq!(cfg.intervals(cfg.step_multiplier), 400);
    }

    #[test]
    fn degenerate_multiplier_still_gives_one_interval() {
        let cfg = SamplingConfig::default();
        assert_eq!(cfg.intervals(0.0), 1);
        assert_eq!(cfg.intervals(-3.0), 1);
        assert_eq!(cfg.intervals(f64::NAN), 1);
    }
}
