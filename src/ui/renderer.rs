//! Top-level rendering entry point.
//!
//! Computes the view model, lays it out into a [`Frame`] and writes the frame
//! to stdout in one go.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders the plugin UI into a string of ANSI output.
///
/// ```rust
/// use pantry::{initialize, Config};
/// use pantry::ui::{helpers::strip_ansi, render_to_string};
///
/// let state = initialize(&Config::default());
/// let screen = strip_ansi(&render_to_string(&state, 24, 80));
/// assert!(screen.contains("No items yet"));
/// ```
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = Frame::new();
    components::render_screen(&mut frame, &viewmodel, &state.theme, rows, cols);
    frame.into_string()
}
