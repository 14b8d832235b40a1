//! Item table and its empty state.

use crate::ui::helpers::{display_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, ItemRow};

/// Width of the TITLE column including its gap.
pub const TITLE_COLUMN: usize = 40;

pub fn render_table_headings(frame: &mut Frame, row: usize, theme: &Theme) -> usize {
    frame
        .position(row, 1)
        .push(Theme::bold())
        .fg(&theme.colors.header_fg)
        .push(&format!("{:<TITLE_COLUMN$}{}", "TITLE", "AMOUNT"))
        .reset();
    row + 1
}

/// Draws one line per item, highlighting the selected row.
///
/// # Returns
///
/// The row after the last item drawn.
pub fn render_table_rows(frame: &mut Frame, row: usize, rows: &[ItemRow], theme: &Theme, cols: usize) -> usize {
    rows.iter()
        .fold(row, |current, item| render_table_row(frame, current, item, theme, cols))
}

/// Draws one row padded to the full width so the selection bar spans it.
fn render_table_row(frame: &mut Frame, row: usize, item: &ItemRow, theme: &Theme, cols: usize) -> usize {
    frame.position(row, 1);
    if item.is_selected {
        frame.fg(&theme.colors.selection_fg).bg(&theme.colors.selection_bg);
    } else {
        frame.fg(&theme.colors.text_normal);
    }

    let title_width = display_width(&item.title);
    frame
        .push(&item.title)
        .pad(TITLE_COLUMN.saturating_sub(title_width));
    if !item.is_selected {
        frame.fg(&theme.colors.amount_fg);
    }
    frame
        .push(&item.amount)
        .pad(cols.saturating_sub(TITLE_COLUMN.max(title_width) + display_width(&item.amount)))
        .reset();
    row + 1
}

/// Draws the centered empty-state message below `row`.
pub fn render_empty_state(frame: &mut Frame, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    frame
        .position(row + 1, 1)
        .fg(&theme.colors.empty_state_fg)
        .centered(&empty.message, cols)
        .reset();
    if !empty.subtitle.is_empty() {
        frame
            .position(row + 2, 1)
            .push(Theme::dim())
            .fg(&theme.colors.text_dim)
            .centered(&empty.subtitle, cols)
            .reset();
    }
    row + 3
}
