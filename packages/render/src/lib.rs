//! # Folio Render
//!
//! Maps each content section, by its type tag, to a presentational view
//! tree: read-only for the public page, wrapped in hover-to-edit
//! affordances for the editor. Purely a function of variant → view; no
//! state of its own.

mod render;
mod view;

pub use render::{render_page, render_section, EditControl, RenderMode};
pub use view::ViewNode;
