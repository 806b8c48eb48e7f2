//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - Signature capture surface
//! - Form lifecycle (validation, freeze, send state)

pub mod capture;
pub mod form;
