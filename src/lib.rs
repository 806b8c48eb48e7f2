//! SignPad: a call-off contract form with a freehand signature pad.
//!
//! - `app` holds the toolkit-free model: capture surface, form lifecycle,
//!   summary building, transport and printing.
//! - `ui` wires that model to FLTK widgets.

pub mod app;
pub mod ui;
