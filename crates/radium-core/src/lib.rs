//! # radium-core
//! Foundation types, constants, and collaborator traits for Radium
//! checkpoint enforcement.

pub mod block_index;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
