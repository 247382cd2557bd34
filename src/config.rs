//! Configuration loader and schema types.
//!
//! This module exposes the settings schema that drives the render loop and
//! the display, and helpers to load it from the environment or a file.

mod load;
mod schema;

pub use schema::*;
