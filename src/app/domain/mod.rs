//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Strokes, points and signature snapshots
//! - Contract form fields
//! - Application settings
//! - Message types for the event system

pub mod form;
pub mod messages;
pub mod settings;
pub mod stroke;

pub use form::{FieldId, FormField, NOT_PROVIDED, Requirement};
pub use messages::Message;
pub use settings::{AppSettings, PLACEHOLDER_ENDPOINT, ResizeBehavior};
pub use stroke::{Point, Snapshot, Stroke};
