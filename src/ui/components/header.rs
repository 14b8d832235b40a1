//! Title bar and error banner.

use crate::ui::helpers::{display_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

const LOADING_LABEL: &str = "Loading... ";

/// Draws the centered title, with a loading marker at the right edge.
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let marker_width = if header.loading { display_width(LOADING_LABEL) } else { 0 };
    let title_width = cols.saturating_sub(marker_width);

    frame.position(row, 1).push(Theme::bold()).fg(&theme.colors.header_fg);
    if let Some(bg) = &theme.colors.header_bg {
        frame.bg(bg);
    }
    frame.centered(&header.title, title_width);
    if header.loading {
        frame.fg(&theme.colors.loading_fg).push(LOADING_LABEL);
    }
    frame.reset();
    row + 1
}

/// Draws a full-width banner with the error text.
pub fn render_error_banner(frame: &mut Frame, row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    frame
        .position(row, 1)
        .push(Theme::bold())
        .fg(&theme.colors.error_fg)
        .bg(&theme.colors.error_bg)
        .centered(message, cols)
        .reset();
    row + 1
}
