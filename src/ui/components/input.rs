//! Boxed prompt for the filter and add inputs.

use crate::ui::helpers::{clip, display_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBarInfo;

/// Horizontal margin on each side of the box.
const MARGIN: usize = 2;

/// Draws a three-line box; a focused prompt ends with a block cursor.
///
/// ```text
///   ┌──────────────────────────────┐
///   │ Filter by title: sal█        │
///   └──────────────────────────────┘
/// ```
pub fn render_input_bar(frame: &mut Frame, row: usize, input: &InputBarInfo, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(MARGIN * 2 + 2);
    let border = &theme.colors.input_border;

    frame
        .position(row, 1)
        .pad(MARGIN)
        .fg(border)
        .push("┌")
        .push(&"─".repeat(inner))
        .push("┐")
        .reset();

    let cursor = if input.focused { "█" } else { "" };
    let busy = if input.busy { "  Loading..." } else { "" };
    let content = clip(&format!(" {}: {}{cursor}", input.label, input.text), inner);
    let content_width = display_width(&content);
    let busy = clip(busy, inner - content_width);

    frame
        .position(row + 1, 1)
        .pad(MARGIN)
        .fg(border)
        .push("│")
        .fg(&theme.colors.text_normal)
        .push(&content)
        .fg(&theme.colors.loading_fg)
        .push(&busy)
        .pad(inner - content_width - display_width(&busy))
        .fg(border)
        .push("│")
        .reset();

    frame
        .position(row + 2, 1)
        .pad(MARGIN)
        .fg(border)
        .push("└")
        .push(&"─".repeat(inner))
        .push("┘")
        .reset();

    row + 3
}
