//! Screen sections and the layout that stacks them.
//!
//! ```text
//! [blank]
//! [header]             title, loading marker
//! [error banner]       only when there is an error
//! [border]
//! [input box x3]       only in filter/add mode or with an active filter
//! [table headings]
//! [rows | empty state]
//! ...
//! [border]
//! [footer]
//! ```

mod footer;
mod header;
mod input;
mod table;

pub use table::TITLE_COLUMN;

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use header::{render_error_banner, render_header};
use input::render_input_bar;
use table::{render_empty_state, render_table_headings, render_table_rows};

fn render_border(frame: &mut Frame, row: usize, theme: &Theme, cols: usize) -> usize {
    frame
        .position(row, 1)
        .fg(&theme.colors.border)
        .push(&"─".repeat(cols))
        .reset();
    row + 1
}

/// Lays out every section of the view model into `frame`.
pub fn render_screen(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut row = 2;

    row = render_header(frame, row, &vm.header, theme, cols);
    if let Some(message) = &vm.error_banner {
        row = render_error_banner(frame, row, message, theme, cols);
    }
    row = render_border(frame, row, theme, cols);
    if let Some(input) = &vm.input_bar {
        row = render_input_bar(frame, row, input, theme, cols);
    }
    row = render_table_headings(frame, row, theme);
    match &vm.empty_state {
        Some(empty) => {
            render_empty_state(frame, row, empty, theme, cols);
        }
        None => {
            render_table_rows(frame, row, &vm.rows, theme, cols);
        }
    }

    let footer_row = rows.max(row + 1);
    render_border(frame, footer_row - 1, theme, cols);
    render_footer(frame, footer_row, &vm.footer, theme, cols);
}
