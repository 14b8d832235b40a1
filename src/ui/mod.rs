//! Terminal UI.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → Frame → stdout
//! ```
//!
//! - [`viewmodel`]: display-ready data
//! - [`renderer`]: entry point
//! - [`components`]: header, input box, table, footer
//! - [`helpers`]: the [`Frame`] buffer and text helpers
//! - [`theme`]: colors and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use helpers::Frame;
pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{EmptyState, FooterInfo, HeaderInfo, InputBarInfo, ItemRow, UIViewModel};
