//! Adversarial test suite for Radium checkpoint enforcement.
//!
//! Integration tests here attack the checkpoint subsystem from the outside:
//! alternate histories, partially synced indexes, and reorgs against the
//! moving sync boundary. Shared chain builders live in [`helpers`].

pub mod helpers;
