//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Stroke, FormField, Settings, Messages)
//! - `controllers/` - Orchestration (CaptureSurface, FormController)
//! - `services/` - Business operations (raster, summary, transport, print)
//! - `infrastructure/` - Error types and logging
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::capture::{CaptureSurface, PointerEvent, PointerKind, TouchEvent, TouchPhase};
pub use controllers::form::{FormController, SendState, SignedDocument};
pub use domain::{AppSettings, FieldId, Message, ResizeBehavior};
pub use infrastructure::error::{AppError, Result, TransportError, ValidationError};
pub use services::transport::{HttpTransport, Transport};
