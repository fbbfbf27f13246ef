//! Rendering layer: terminal lifecycle, screen layout, widgets.
pub mod terminal;
pub mod ui;
pub mod widgets;
