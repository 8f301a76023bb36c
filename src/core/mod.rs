// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod policy;

// Re-export public types for convenient access via `chromaq::core::TypeName`
pub use error::{ChromaError, Lane};
pub use policy::Policy;

pub mod constants;
pub use constants::chroma_constants::{MAX_TOKEN, MIN_TOKEN, PI, SEGMENT_WIDTH}; // Re-export
