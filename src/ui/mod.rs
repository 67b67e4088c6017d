//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: Frame composition for the editor and preview views
//! - [`status`]: Status and toast bars on the bottom rows
//! - [`overlays`]: The help popup

mod overlays;
mod render;
mod status;

pub use render::render;
