//! Application state and logic.
//!
//! `App` is the view coordinator: it turns key presses, mouse gestures and
//! file selections into calls on the [`GraphModel`] and keeps the status
//! line up to date.

use std::path::{Path, PathBuf};

use ratatui::layout::Rect;

use crate::clipboard;
use crate::config::GraphConfig;
use crate::file_browser::FileBrowserState;
use crate::graph::{EquationId, GraphModel, PointSelection, Range};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// What a file picked in the browser is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    /// Replace all equations.
    Load,
    /// Add after the loaded equations.
    Append,
}

impl BrowseMode {
    /// Short verb for titles.
    pub fn name(self) -> &'static str {
        match self {
            BrowseMode::Load => "Load",
            BrowseMode::Append => "Append",
        }
    }
}

/// Where the plotting area was last drawn, for mapping terminal cells back
/// to chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    /// Cells covered by the plotting area (axes excluded).
    pub area: Rect,
    /// X axis bounds.
    pub x_bounds: (f64, f64),
    /// Y axis bounds.
    pub y_bounds: (f64, f64),
}

impl ChartGeometry {
    /// Chart coordinates at the center of a terminal cell.
    pub fn to_chart(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let a = self.area;
        if a.width == 0 || a.height == 0 {
            return None;
        }
        if column < a.x || column >= a.x + a.width || row < a.y || row >= a.y + a.height {
            return None;
        }
        let fx = (f64::from(column - a.x) + 0.5) / f64::from(a.width);
        let fy = (f64::from(row - a.y) + 0.5) / f64::from(a.height);
        let (x0, x1) = self.x_bounds;
        let (y0, y1) = self.y_bounds;
        Some((x0 + fx * (x1 - x0), y1 - fy * (y1 - y0)))
    }

    /// X units per cell.
    pub fn x_per_cell(&self) -> f64 {
        (self.x_bounds.1 - self.x_bounds.0) / f64::from(self.area.width.max(1))
    }

    /// Ratio turning a y distance into an on-screen-equivalent x distance.
    pub fn y_scale(&self) -> f64 {
        let y_per_cell = (self.y_bounds.1 - self.y_bounds.0) / f64::from(self.area.height.max(1));
        if y_per_cell > 0.0 {
            self.x_per_cell() / y_per_cell
        } else {
            1.0
        }
    }
}

/// An in-progress mouse drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    column: u16,
    range: Range,
    moved: bool,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Equations and their series.
    pub model: GraphModel,
    /// Settings.
    pub config: GraphConfig,
    /// Last file loaded.
    pub file_path: Option<PathBuf>,
    /// File browser state.
    pub file_browser: FileBrowserState,
    /// Open browser and what it is for.
    pub browse_mode: Option<BrowseMode>,
    /// Highlighted row in the legend.
    pub legend_cursor: usize,
    /// X position of the keyboard probe.
    pub probe_x: f64,
    /// Selected sample.
    pub selection: Option<PointSelection>,
    /// Chart coordinates under the mouse pointer.
    pub pointer: Option<(f64, f64)>,
    /// Plotting area from the last draw.
    pub chart: Option<ChartGeometry>,
    /// Status message.
    pub status: String,
    /// Error message.
    pub error_message: Option<String>,
    /// Current theme.
    pub theme: Theme,
    drag: Option<Drag>,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: GraphConfig) -> Self {
        let model = GraphModel::new(&config);
        let probe_x = model.current_range().center();
        Self {
            model,
            config,
            file_path: None,
            file_browser: FileBrowserState::new(),
            browse_mode: None,
            legend_cursor: 0,
            probe_x,
            selection: None,
            pointer: None,
            chart: None,
            status: "Ready".to_string(),
            error_message: None,
            theme: Theme::GruvboxDark,
            drag: None,
        }
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string())
    }

    fn fail(&mut self, message: String) {
        self.status = "Error".to_string();
        self.error_message = Some(message);
    }

    fn ok(&mut self, status: String) {
        self.status = status;
        self.error_message = None;
    }

    /// Replace all equations with those of a file.
    pub fn load_file(&mut self, path: PathBuf) {
        match self.model.load_from_file(&path) {
            Ok(count) => {
                self.legend_cursor = 0;
                self.selection = None;
                self.ok(format!("{} loaded ({} equations)", Self::file_name(&path), count));
                self.remember_dir(&path);
                self.file_path = Some(path);
                tracing::info!("File loaded successfully");
            },
            Err(e) => self.fail(format!("Error in file: {}", e)),
        }
    }

    /// Append the equations of a file.
    pub fn append_file(&mut self, path: PathBuf) {
        match self.model.append_from_file(&path) {
            Ok(ids) => {
                self.ok(format!(
                    "{} appended ({} equations)",
                    Self::file_name(&path),
                    ids.len()
                ));
                self.remember_dir(&path);
            },
            Err(e) => self.fail(format!("Error in file: {}", e)),
        }
    }

    fn remember_dir(&mut self, path: &Path) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.file_browser.current_dir = parent.to_path_buf();
        }
    }

    /// Open the file browser.
    pub fn open_browser(&mut self, mode: BrowseMode) {
        self.file_browser.load_directory();
        self.browse_mode = Some(mode);
        self.status = format!(
            "{}: {}",
            mode.name(),
            self.file_browser.current_dir.display()
        );
    }

    /// Close the file browser without picking a file.
    pub fn close_browser(&mut self) {
        self.browse_mode = None;
        self.status = "Ready".to_string();
    }

    /// Enter the highlighted directory, or load/append the highlighted file.
    pub fn browser_select(&mut self) {
        let Some(mode) = self.browse_mode else {
            return;
        };
        if let Some(path) = self.file_browser.select_current() {
            self.browse_mode = None;
            match mode {
                BrowseMode::Load => self.load_file(path),
                BrowseMode::Append => self.append_file(path),
            }
        }
    }

    fn apply_range(&mut self, range: Range) {
        match self.model.rerange_x(range.left(), range.right()) {
            Ok(()) => {
                let range = self.model.current_range();
                if !range.contains(self.probe_x) {
                    self.probe_x = range.center();
                }
                self.status = format!("Range {}", range);
            },
            Err(e) => tracing::debug!("Ignoring range change: {}", e),
        }
    }

    /// Pan by a fraction of the visible width.
    pub fn pan(&mut self, fraction: f64) {
        let max_extent = self.config.view.max_extent;
        if let Ok(range) = self.model.current_range().pan(fraction, max_extent) {
            self.apply_range(range);
        }
    }

    /// Zoom in (`zoom_in`) or out by one step around `pivot`, or the center.
    pub fn zoom(&mut self, zoom_in: bool, pivot: Option<f64>) {
        let range = self.model.current_range();
        let step = self.config.view.zoom_factor;
        let factor = if zoom_in { 1.0 / step } else { step };
        let pivot = pivot.unwrap_or_else(|| range.center());
        if let Ok(range) = range.zoom(factor, pivot, self.config.view.max_extent) {
            self.apply_range(range);
        }
    }

    /// Return to the default range.
    pub fn reset_range(&mut self) {
        let (left, right) = self.config.view.default_range;
        if let Ok(range) = Range::new(left, right) {
            self.apply_range(range);
        }
    }

    /// Resample everything over the current range.
    pub fn refresh(&mut self) {
        self.model.update();
        self.status = format!("Refreshed {} series", self.model.series().len());
    }

    fn selected_id(&self) -> Option<EquationId> {
        self.model.equations().at(self.legend_cursor).map(|e| e.id())
    }

    /// Move the legend cursor up.
    pub fn legend_up(&mut self) {
        self.legend_cursor = self.legend_cursor.saturating_sub(1);
    }

    /// Move the legend cursor down.
    pub fn legend_down(&mut self) {
        if self.legend_cursor + 1 < self.model.equations().len() {
            self.legend_cursor += 1;
        }
    }

    /// Show or hide the highlighted equation.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.status = "No equation selected".to_string();
            return;
        };
        match self.model.toggle(id) {
            Ok(enabled) => {
                if !enabled && self.selection.as_ref().map(|s| s.equation) == Some(id) {
                    self.selection = None;
                }
                self.status = format!("{}: {}", id, if enabled { "ON" } else { "OFF" });
            },
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Remove the highlighted equation.
    pub fn remove_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.status = "No equation selected".to_string();
            return;
        };
        match self.model.remove(id) {
            Ok(()) => {
                if self.selection.as_ref().map(|s| s.equation) == Some(id) {
                    self.selection = None;
                }
                let len = self.model.equations().len();
                self.legend_cursor = self.legend_cursor.min(len.saturating_sub(1));
                self.status = format!("Removed {}", id);
            },
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Move the probe by `steps` samples and select the highlighted
    /// equation's sample nearest to it.
    pub fn move_probe(&mut self, steps: i32) {
        let range = self.model.current_range();
        let sampling = self.model.synchronizer().sampling();
        let step = range.width() / sampling.intervals(sampling.step_multiplier) as f64;
        self.probe_x = (self.probe_x + f64::from(steps) * step).clamp(range.left(), range.right());

        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(series) = self.model.synchronizer().series_for(id) else {
            self.status = format!("{} is not drawn", id);
            return;
        };
        let probe = self.probe_x;
        let nearest = series.points.iter().copied().min_by(|a, b| {
            (a.0 - probe).abs().total_cmp(&(b.0 - probe).abs())
        });
        if let Some((x, y)) = nearest {
            self.selection = Some(PointSelection {
                equation: id,
                label: series.label.clone(),
                x,
                y,
            });
        }
    }

    /// Select the sample nearest to a terminal cell.
    pub fn select_at(&mut self, column: u16, row: u16) {
        let Some(chart) = self.chart else {
            return;
        };
        let Some((x, y)) = chart.to_chart(column, row) else {
            return;
        };
        self.selection = self.model.select_point(x, y, chart.y_scale());
        if let Some(ref sel) = self.selection {
            self.probe_x = sel.x;
            if let Some(index) = self.model.equations().position(sel.equation) {
                self.legend_cursor = index;
            }
        }
    }

    /// Copy the selected sample to the clipboard.
    pub fn copy_selection(&mut self) {
        let Some(ref sel) = self.selection else {
            self.status = "No point selected".to_string();
            return;
        };
        match clipboard::copy_selection(sel) {
            Ok(()) => self.status = "Point copied!".to_string(),
            Err(e) => self.status = format!("Copy failed: {}", e),
        }
    }

    /// Track the pointer.
    pub fn mouse_moved(&mut self, column: u16, row: u16) {
        self.pointer = self.chart.and_then(|c| c.to_chart(column, row));
    }

    /// Start a drag, or a click if the mouse does not move.
    pub fn mouse_down(&mut self, column: u16, row: u16) {
        self.mouse_moved(column, row);
        if self.pointer.is_some() {
            self.drag = Some(Drag {
                column,
                range: self.model.current_range(),
                moved: false,
            });
        }
    }

    /// Pan with the drag so the grabbed point stays under the pointer.
    pub fn mouse_dragged(&mut self, column: u16, row: u16) {
        let (Some(mut drag), Some(chart)) = (self.drag, self.chart) else {
            return;
        };
        let cells = f64::from(column) - f64::from(drag.column);
        let dx = -cells * chart.x_per_cell();
        drag.moved = true;
        self.drag = Some(drag);
        if let Ok(range) = drag.range.shift(dx, self.config.view.max_extent) {
            self.apply_range(range);
        }
        self.mouse_moved(column, row);
    }

    /// Finish a drag; a drag that never moved is a click.
    pub fn mouse_up(&mut self, column: u16, row: u16) {
        if let Some(drag) = self.drag.take() {
            if !drag.moved {
                self.select_at(column, row);
            }
        }
    }

    /// Zoom around the pointer.
    pub fn scroll(&mut self, column: u16, row: u16, zoom_in: bool) {
        let pivot = self
            .chart
            .and_then(|c| c.to_chart(column, row))
            .map(|(x, _)| x);
        self.zoom(zoom_in, pivot);
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn app_with(source: &str) -> App {
        let mut app = App::new(GraphConfig::default());
        app.model.load_from_str(source).unwrap();
        app
    }

    fn geometry() -> ChartGeometry {
        ChartGeometry {
            area: Rect::new(10, 0, 100, 20),
            x_bounds: (-10.0, 10.0),
            y_bounds: (-5.0, 5.0),
        }
    }

    #[test]
    fn geometry_maps_cells_to_chart_coordinates() {
        let g = geometry();
        let (x, y) = g.to_chart(10, 0).unwrap();
        assert!((x - -9.9).abs() < 1e-9);
        assert!((y - 4.75).abs() < 1e-9);
        assert!(g.to_chart(9, 0).is_none());
        assert!(g.to_chart(10, 20).is_none());
        assert!((g.x_per_cell() - 0.2).abs() < 1e-12);
        assert!((g.y_scale() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn pan_zoom_and_reset() {
        let mut app = app_with("x");
        app.pan(0.1);
        assert_eq!(app.model.current_range(), Range::new(-8.0, 12.0).unwrap());

        app.reset_range();
        app.zoom(false, Some(0.0));
        assert_eq!(app.model.current_range(), Range::new(-12.5, 12.5).unwrap());
        app.zoom(true, Some(0.0));
        let r = app.model.current_range();
        assert!((r.left() + 10.0).abs() < 1e-9 && (r.right() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_keeps_working_at_the_extent() {
        let mut app = app_with("x");
        app.model.rerange_x(20_000.0, 20_020.0).unwrap();
        app.zoom(true, None);
        let r = app.model.current_range();
        assert_eq!((r.left(), r.right()), (9_984.0, 10_000.0));

        for _ in 0..30 {
            app.zoom(false, None);
        }
        for _ in 0..5 {
            app.pan(0.1);
        }
        assert_eq!(app.model.current_range(), Range::new(-10_000.0, 10_000.0).unwrap());
        app.zoom(true, None);
        assert_eq!(app.model.current_range(), Range::new(-8_000.0, 8_000.0).unwrap());
    }

    #[test]
    fn drag_pans_and_click_selects() {
        let mut app = app_with("x\nx + 5");
        app.chart = Some(geometry());

        app.mouse_down(60, 10);
        app.mouse_dragged(70, 10);
        app.mouse_up(70, 10);
        let r = app.model.current_range();
        assert!((r.left() + 12.0).abs() < 1e-9);
        assert!(app.selection.is_none());

        app.reset_range();
        // (x, y) ~ (0.1, 4.75): closest to the line y = x + 5
        app.mouse_down(60, 0);
        app.mouse_up(60, 0);
        let sel = app.selection.clone().unwrap();
        assert_eq!(sel.label, "x + 5= y");
        assert_eq!(app.legend_cursor, 1);
    }

    #[test]
    fn toggle_remove_and_probe() {
        let mut app = app_with("x\nx^2");
        app.legend_down();
        app.toggle_selected();
        assert_eq!(app.model.series().len(), 1);
        app.move_probe(1);
        assert!(app.selection.is_none());
        assert!(app.status.ends_with("is not drawn"));

        app.toggle_selected();
        app.move_probe(2);
        let sel = app.selection.clone().unwrap();
        assert_eq!(sel.label, "x^2= y");
        assert!((sel.x - 0.15).abs() < 1e-9);

        app.remove_selected();
        assert!(app.selection.is_none());
        assert_eq!(app.legend_cursor, 0);
        assert_eq!(app.model.equations().len(), 1);
    }

    #[test]
    fn failed_load_keeps_previous_equations() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sin(x)\ncos(x").unwrap();

        let mut app = app_with("x");
        app.load_file(file.path().to_path_buf());
        assert!(app.error_message.as_deref().unwrap().contains("line 2"));
        assert_eq!(app.model.equations().len(), 1);
        assert!(app.file_path.is_none());
    }

    #[test]
    fn load_and_append_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "x\nx^2\n").unwrap();
        std::fs::write(&second, "sin(x)\n").unwrap();

        let mut app = App::new(GraphConfig::default());
        app.load_file(first.clone());
        app.append_file(second);
        assert!(app.error_message.is_none());
        assert_eq!(app.model.series().len(), 3);
        assert_eq!(app.file_path, Some(first));
        assert_eq!(app.file_browser.current_dir, dir.path());
    }
}
