//! Keybinding hints.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Draws the hints for the current mode; returns the next free row.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    frame
        .position(row, 1)
        .fg(&theme.colors.text_dim)
        .centered(&footer.keybindings, cols)
        .reset();
    row + 1
}
