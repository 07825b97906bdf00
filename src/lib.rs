//! eqplot - plot y = f(x) equations in the terminal.
//!
//! Equations are read from text files, one expression in `x` per line,
//! compiled into evaluators and sampled over the visible x range. The
//! resulting point series follow every change to the loaded equations and
//! to the range, and are drawn with ratatui.
//!
//! # Features
//!
//! - Arithmetic, powers, constants and the usual math functions
//! - Whole-file validation: one bad line rejects the file
//! - Load, append, toggle and remove equations
//! - Pan and zoom with the keyboard or mouse
//! - Point selection with clipboard copy
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```
//! use eqplot::config::GraphConfig;
//! use eqplot::graph::GraphModel;
//!
//! let mut model = GraphModel::new(&GraphConfig::default());
//! model.load_from_str("sin(x)\nx^2 / 10")?;
//! model.rerange_x(-5.0, 5.0)?;
//!
//! for series in model.series() {
//!     println!("{}: {} points", series.label, series.points.len());
//! }
//! # Ok::<(), eqplot::GraphError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod expr;
pub mod file_browser;
pub mod graph;
pub mod ui;

pub use error::{GraphError, Result};
