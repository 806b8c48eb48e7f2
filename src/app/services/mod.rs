//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Signature rasterisation and PNG export
//! - Signing date formatting
//! - Contract summary text and payload
//! - Webhook transport
//! - Printable document output

pub mod date_format;
pub mod print;
pub mod raster;
pub mod summary;
pub mod transport;
