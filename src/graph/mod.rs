//! Equation-to-series pipeline.
//!
//! This module owns the loaded equations and everything derived from them:
//! line colors, the ordered registry with its change notifications, and the
//! point series that follow the registry and the visible range.

mod color;
mod equation;
mod loader;
mod model;
mod range;
mod registry;
mod series;

pub use color::{ColorAssigner, DEFAULT_PALETTE};
pub use equation::{Equation, EquationId, PointSeries, SampleError};
pub use loader::{compile_lines, read_equation_file, CompiledLine};
pub use model::GraphModel;
pub use range::Range;
pub use registry::{EquationRegistry, RegistryEvent, RegistryListener};
pub use series::{PointSelection, SeriesSynchronizer};
