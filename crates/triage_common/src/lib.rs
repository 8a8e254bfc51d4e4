//! Shared foundational types used across the triage workspace.
//!
//! This crate provides the content hash that binds pagination cursors to the
//! request that issued them.

#![warn(missing_docs)]

pub mod hash;

pub use hash::ContentHash;
